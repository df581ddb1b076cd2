//! Doc comment massaging.
//!
//! Docs in the model are plain text. A doc that starts with `...` refers
//! to the declared name, so `"...is a point."` on `Point` becomes
//! `"Point is a point."`.

use crate::builder::{CodeFragment, Renderable};

/// Replace a leading `...` with `name`. Surrounding whitespace is trimmed.
pub fn expand_ellipsis(name: &str, doc: &str) -> String {
    let doc = doc.trim();
    match doc.strip_prefix("...") {
        Some(rest) => format!("{name} {}", rest.trim()),
        None => doc.to_string(),
    }
}

/// How a doc comment is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocStyle {
    /// One `// ` comment per line.
    Line,
    /// A `/** ... */` block.
    Block,
}

/// A doc comment ready to be emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocComment {
    style: DocStyle,
    text: String,
}

impl DocComment {
    /// The doc for `name`, or `None` if `doc` is empty.
    pub fn new(style: DocStyle, name: &str, doc: Option<&str>) -> Option<Self> {
        let text = expand_ellipsis(name, doc?);
        (!text.is_empty()).then_some(Self { style, text })
    }

    /// A `// ` style doc.
    pub fn line(name: &str, doc: Option<&str>) -> Option<Self> {
        Self::new(DocStyle::Line, name, doc)
    }

    /// A `/** */` style doc.
    pub fn block(name: &str, doc: Option<&str>) -> Option<Self> {
        Self::new(DocStyle::Block, name, doc)
    }

    /// Append further paragraphs, e.g. `@param` lines.
    pub fn with_lines(mut self, lines: impl IntoIterator<Item = String>) -> Self {
        for line in lines {
            self.text.push('\n');
            self.text.push_str(&line);
        }
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Renderable for DocComment {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        match self.style {
            DocStyle::Line => vec![CodeFragment::comment("// ", self.text.clone())],
            DocStyle::Block => vec![CodeFragment::doc_block(self.text.clone())],
        }
    }
}
