//! Command-line argument definitions for the Cameo CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the input snapshot and element file,
//! which elements are rendered, the output path and format, configuration
//! file selection, and logging verbosity.

use clap::{Parser, ValueEnum};

/// Command-line arguments for the Cameo selection renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the SVG snapshot exported by the diagram editor
    #[arg(help = "Path to the input SVG file")]
    pub input: String,

    /// Path to the element description file (TOML)
    #[arg(short, long)]
    pub elements: String,

    /// Element to render; repeat to select several. Defaults to every element
    #[arg(short, long = "select", value_name = "ID")]
    pub select: Vec<String>,

    /// Expand the selection with the children of selected elements
    #[arg(long)]
    pub closure: bool,

    /// Path to the output file
    #[arg(short, long, default_value = "out.png")]
    pub output: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Png)]
    pub format: OutputFormat,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Image format written to the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Rasterized PNG image
    Png,
    /// The framed, filtered SVG
    Svg,
}

impl OutputFormat {
    /// Returns the MIME type of files in this format.
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => cameo::raster::PNG_MIME_TYPE,
            Self::Svg => "image/svg+xml",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_command_line() {
        let args = Args::try_parse_from([
            "cameo",
            "diagram.svg",
            "--elements",
            "elements.toml",
            "-s",
            "Task_1",
            "--select",
            "Task_2",
            "--closure",
            "-o",
            "copy.svg",
            "--format",
            "svg",
        ])
        .unwrap();

        assert_eq!(args.input, "diagram.svg");
        assert_eq!(args.elements, "elements.toml");
        assert_eq!(args.select, vec!["Task_1", "Task_2"]);
        assert!(args.closure);
        assert_eq!(args.output, "copy.svg");
        assert_eq!(args.format, OutputFormat::Svg);
        assert_eq!(args.config, None);
    }

    #[test]
    fn test_defaults() {
        let args =
            Args::try_parse_from(["cameo", "diagram.svg", "-e", "elements.toml"]).unwrap();

        assert!(args.select.is_empty());
        assert!(!args.closure);
        assert_eq!(args.output, "out.png");
        assert_eq!(args.format, OutputFormat::Png);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_elements_file_is_required() {
        assert!(Args::try_parse_from(["cameo", "diagram.svg"]).is_err());
    }
}
