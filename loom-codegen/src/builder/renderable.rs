//! Renderable trait and CodeFragment for decoupled code generation.
//!
//! Renderers compose small syntax pieces (import blocks, doc comments,
//! declarations) as fragments and emit them through a CodeBuilder.

/// Represents a fragment of generated code.
///
/// Fragments sit between a renderer's syntax pieces and the final text.
#[derive(Debug, Clone, PartialEq)]
pub enum CodeFragment {
    /// A single line of code (will have newline appended).
    Line(String),
    /// A blank line.
    Blank,
    /// A block with header, body fragments, and optional closing line.
    Block {
        header: String,
        body: Vec<CodeFragment>,
        close: Option<String>,
    },
    /// A line comment; each line of `text` is prefixed with `marker`.
    Comment { marker: String, text: String },
    /// A `/** ... */` documentation block.
    DocBlock(String),
}

impl CodeFragment {
    /// Create a line fragment.
    pub fn line(s: impl Into<String>) -> Self {
        Self::Line(s.into())
    }

    /// Create a blank line fragment.
    pub fn blank() -> Self {
        Self::Blank
    }

    /// Create a block fragment.
    pub fn block(
        header: impl Into<String>,
        body: Vec<CodeFragment>,
        close: Option<String>,
    ) -> Self {
        Self::Block {
            header: header.into(),
            body,
            close,
        }
    }

    /// Create a line comment fragment.
    pub fn comment(marker: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Comment {
            marker: marker.into(),
            text: text.into(),
        }
    }

    /// Create a documentation block fragment.
    pub fn doc_block(s: impl Into<String>) -> Self {
        Self::DocBlock(s.into())
    }
}

/// Trait for types that can be rendered to code fragments.
///
/// Implemented by syntax pieces that renderers emit via
/// [`CodeBuilder::emit`](super::CodeBuilder::emit).
pub trait Renderable {
    /// Convert this node to a sequence of code fragments.
    fn to_fragments(&self) -> Vec<CodeFragment>;
}

/// Blanket implementation for references.
impl<T: Renderable + ?Sized> Renderable for &T {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        (*self).to_fragments()
    }
}

/// Blanket implementation for Box.
impl<T: Renderable + ?Sized> Renderable for Box<T> {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.as_ref().to_fragments()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_fragment_constructors() {
        assert_eq!(
            CodeFragment::line("test"),
            CodeFragment::Line("test".to_string())
        );
        assert_eq!(CodeFragment::blank(), CodeFragment::Blank);
        assert_eq!(
            CodeFragment::doc_block("doc"),
            CodeFragment::DocBlock("doc".to_string())
        );
    }

    #[test]
    fn test_block_fragment() {
        let block = CodeFragment::block(
            "if ok {",
            vec![CodeFragment::line("return 1")],
            Some("}".to_string()),
        );
        match block {
            CodeFragment::Block {
                header,
                body,
                close,
            } => {
                assert_eq!(header, "if ok {");
                assert_eq!(body.len(), 1);
                assert_eq!(close, Some("}".to_string()));
            }
            _ => panic!("Expected Block variant"),
        }
    }

    #[test]
    fn test_comment_fragment_renders_each_line() {
        use crate::builder::CodeBuilder;

        let mut builder = CodeBuilder::go();
        builder.apply_fragment(CodeFragment::comment("// ", "a\nb"));
        assert_eq!(builder.build(), "// a\n// b\n");
    }
}
