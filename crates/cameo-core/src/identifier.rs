//! Element identifiers backed by string interning
//!
//! Diagram documents address every element by a string identifier such as
//! `"Task_1"` or `"Flow_0x7a"`. This module provides [`ElementId`], a `Copy`
//! handle to an interned string so identifiers can be stored in sets and
//! compared without repeated string allocation.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock, PoisonError},
};

use serde::{Deserialize, Deserializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner shared by every [`ElementId`].
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner. The
/// interner is append-only, so a poisoned lock still guards consistent data
/// and is recovered instead of propagated.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Identifier of a diagram element, unique within a document.
///
/// # Examples
///
/// ```
/// use cameo_core::identifier::ElementId;
///
/// let task = ElementId::new("Task_1");
/// let same = ElementId::new("Task_1");
///
/// assert_eq!(task, same);
/// assert_eq!(task, "Task_1");
/// assert_eq!(task.to_string(), "Task_1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(DefaultSymbol);

impl ElementId {
    /// Creates an `ElementId` from &str, interning it on first use.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Returns the identifier for `name` only if it has been interned before.
    ///
    /// An identifier that was never interned cannot belong to any registered
    /// element or requested set, which lets lookups by foreign strings skip
    /// growing the interner.
    pub fn lookup(name: &str) -> Option<Self> {
        interner().get(name).map(Self)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        f.write_str(interner.resolve(self.0).unwrap_or_default())
    }
}

impl From<&str> for ElementId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ElementId {
    fn from(name: String) -> Self {
        Self::new(&name)
    }
}

impl PartialEq<str> for ElementId {
    /// Allows direct comparison with string slices: `id == "Task_1"`
    fn eq(&self, other: &str) -> bool {
        interner().resolve(self.0) == Some(other)
    }
}

impl PartialEq<&str> for ElementId {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl<'de> Deserialize<'de> for ElementId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::new(&name))
    }
}
