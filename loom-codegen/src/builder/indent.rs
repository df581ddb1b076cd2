//! Indentation configuration for code generation.

use serde::{Deserialize, Serialize};

/// Indentation style for generated code.
///
/// In configuration files this is written as `"tab"` or as a number of
/// spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "IndentRepr", into = "IndentRepr")]
pub enum Indent {
    /// Spaces with the specified width (e.g., 2 or 4).
    Spaces(u8),
    /// Tab character.
    Tab,
}

impl Indent {
    /// Tab indentation (Go).
    pub const GO: Self = Self::Tab;

    /// 4-space indentation (Java).
    pub const JAVA: Self = Self::Spaces(4);

    /// Convert to the string representation for one indent level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spaces(2) => "  ",
            Self::Spaces(4) => "    ",
            Self::Spaces(8) => "        ",
            // Fallback to 4 whitespaces
            Self::Spaces(_) => "    ",
            Self::Tab => "\t",
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::GO
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum IndentRepr {
    Keyword(String),
    Width(u8),
}

impl TryFrom<IndentRepr> for Indent {
    type Error = String;

    fn try_from(value: IndentRepr) -> Result<Self, Self::Error> {
        match value {
            IndentRepr::Keyword(k) if k == "tab" => Ok(Indent::Tab),
            IndentRepr::Keyword(k) => Err(format!("unknown indent '{k}', expected \"tab\" or a width")),
            IndentRepr::Width(w) => Ok(Indent::Spaces(w)),
        }
    }
}

impl From<Indent> for IndentRepr {
    fn from(value: Indent) -> Self {
        match value {
            Indent::Tab => IndentRepr::Keyword("tab".to_string()),
            Indent::Spaces(w) => IndentRepr::Width(w),
        }
    }
}
