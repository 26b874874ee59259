//! Error adapter for converting CameoError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use cameo::CameoError;

/// Adapter that renders a [`CameoError`] as a miette diagnostic.
///
/// Each variant gets a stable code and, where there is a likely fix, a help
/// message.
pub struct ErrorAdapter<'a>(pub &'a CameoError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(error_code(self.0)))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            CameoError::NothingToRender => {
                "check the selected identifiers against the element file"
            }
            CameoError::Markup(_) => "the input must be an SVG document exported by the editor",
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Returns the stable diagnostic code of an error.
pub fn error_code(err: &CameoError) -> &'static str {
    match err {
        CameoError::Configuration(_) => "cameo::configuration",
        CameoError::Render(_) => "cameo::render",
        CameoError::Document(_) => "cameo::document",
        CameoError::Markup(_) => "cameo::markup",
        CameoError::NothingToRender => "cameo::nothing_to_render",
        CameoError::Io(_) => "cameo::io",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        let err = CameoError::Configuration("missing copy/paste capability".to_string());
        let adapter = ErrorAdapter(&err);

        assert_eq!(adapter.code().unwrap().to_string(), "cameo::configuration");
        assert!(adapter.help().is_none());
        assert_eq!(
            adapter.to_string(),
            "Configuration error: missing copy/paste capability"
        );
    }

    #[test]
    fn test_nothing_to_render_has_help() {
        let err = CameoError::NothingToRender;
        let adapter = ErrorAdapter(&err);

        assert_eq!(error_code(&err), "cameo::nothing_to_render");
        assert!(adapter.help().is_some());
    }

    #[test]
    fn test_render_report() {
        let err = CameoError::Render("failed to encode PNG".to_string());
        let mut out = String::new();

        miette::GraphicalReportHandler::new_themed(miette::GraphicalTheme::unicode_nocolor())
            .render_report(&mut out, &ErrorAdapter(&err))
            .unwrap();

        assert!(out.contains("cameo::render"));
        assert!(out.contains("failed to encode PNG"));
    }
}
