//! Qualified names of the form `<path>.<identifier>`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A reference to a declaration, written as `<qualifier>.<identifier>`.
///
/// The qualifier is everything before the last `.` and names the package,
/// module or namespace that declares the identifier. A name without a dot is
/// universe scoped (a built-in like `int` or `string`) and never needs an
/// import. Names ending in `!` are stdlib sentinels which every renderer maps
/// onto its own types, see `loom_ir::stdlib`.
///
/// # Example
///
/// ```
/// use loom_core::Name;
///
/// let name = Name::new("github.com/google/uuid.UUID");
/// assert_eq!(name.qualifier(), "github.com/google/uuid");
/// assert_eq!(name.identifier(), "UUID");
/// assert!(!name.is_universe());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    /// Create a name from its full textual form.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Join a qualifier and an identifier. An empty qualifier yields a
    /// universe name.
    pub fn join(qualifier: &str, identifier: &str) -> Self {
        if qualifier.is_empty() {
            Self(identifier.to_string())
        } else {
            Self(format!("{qualifier}.{identifier}"))
        }
    }

    /// The full textual form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Everything before the last `.`, or the empty string.
    pub fn qualifier(&self) -> &str {
        if self.is_sentinel() {
            return "";
        }
        match self.0.rfind('.') {
            Some(idx) => &self.0[..idx],
            None => "",
        }
    }

    /// Everything after the last `.`, or the whole name.
    pub fn identifier(&self) -> &str {
        if self.is_sentinel() {
            return &self.0;
        }
        match self.0.rfind('.') {
            Some(idx) => &self.0[idx + 1..],
            None => &self.0,
        }
    }

    /// True if the name carries no qualifier.
    pub fn is_universe(&self) -> bool {
        self.qualifier().is_empty()
    }

    /// True for stdlib sentinels like `map!` or `string!`.
    pub fn is_sentinel(&self) -> bool {
        self.0.ends_with('!')
    }

    /// True if the name is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Name {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&Name> for Name {
    fn from(value: &Name) -> Self {
        value.clone()
    }
}
