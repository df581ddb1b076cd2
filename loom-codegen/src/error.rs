//! Recoverable render errors.

use loom_ir::{IrError, Lang};
use thiserror::Error;

/// An error raised while rendering a model.
///
/// Render functions return these wrapped in an [`eyre::Report`] so that
/// every enclosing level can add its package, file, type or function name
/// as context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// A declaration which requires a name has none.
    #[error("{kind} has an empty identifier")]
    EmptyIdentifier { kind: &'static str },

    /// A public declaration is not named like an exported identifier.
    #[error("'{name}' is public but not an exported identifier")]
    NotExported { name: String },

    /// A non-public declaration is named like an exported identifier.
    #[error("'{name}' is not public but is an exported identifier")]
    Exported { name: String },

    /// The node or type has no representation in the target language.
    #[error("{what} is not supported by {lang}")]
    Unsupported { what: String, lang: Lang },

    /// A function returns several values but the target only has a single
    /// result plus an error channel.
    #[error("'{func}' has {count} non-error results, {lang} supports at most one")]
    MultipleResults {
        func: String,
        count: usize,
        lang: Lang,
    },

    /// A declared name collides with a member the renderer generates.
    #[error("'{name}' clashes with the generated {member}")]
    Clash { name: String, member: String },

    /// A node is not part of the module being rendered.
    #[error("{node} is not part of the rendered module")]
    Detached { node: String },

    /// A node is not inside a source file with an importer attached.
    #[error("{node} is not attached to a source file with an importer")]
    MissingImporter { node: String },

    /// A model invariant was violated while expanding a macro.
    #[error(transparent)]
    Ir(#[from] IrError),
}

/// Check the export-naming rule for identifiers whose visibility maps
/// onto case: public names start with an upper-case letter, all others
/// must not.
pub fn check_exported(name: &str, public: bool) -> Result<(), RenderError> {
    let Some(first) = name.chars().next() else {
        return Err(RenderError::EmptyIdentifier { kind: "identifier" });
    };
    match (public, first.is_uppercase()) {
        (true, false) => Err(RenderError::NotExported {
            name: name.to_string(),
        }),
        (false, true) => Err(RenderError::Exported {
            name: name.to_string(),
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_exported() {
        assert!(check_exported("Point", true).is_ok());
        assert!(check_exported("point", false).is_ok());
        assert_eq!(
            check_exported("point", true),
            Err(RenderError::NotExported {
                name: "point".to_string()
            })
        );
        assert_eq!(
            check_exported("Point", false),
            Err(RenderError::Exported {
                name: "Point".to_string()
            })
        );
    }

    #[test]
    fn test_empty_identifier() {
        assert!(matches!(
            check_exported("", true),
            Err(RenderError::EmptyIdentifier { .. })
        ));
    }

    #[test]
    fn test_messages() {
        let err = RenderError::Unsupported {
            what: "bounded type parameter".to_string(),
            lang: Lang::Go,
        };
        assert_eq!(err.to_string(), "bounded type parameter is not supported by go");

        let err = RenderError::Clash {
            name: "Unwrap".to_string(),
            member: "Unwrap method".to_string(),
        };
        assert_eq!(err.to_string(), "'Unwrap' clashes with the generated Unwrap method");
    }
}
