//! Styled document structure: pages → blocks → lines → spans
//!
//! This is the shape the answer key scan walks. The response extractor only
//! needs [`StyledDocument::text`].

use crate::color::ColorValue;

/// A run of text drawn with one fill color
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Span {
    pub text: String,
    pub color: Option<ColorValue>,
}

impl Span {
    pub fn new(text: impl Into<String>, color: Option<ColorValue>) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// Concatenated span text, untrimmed
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub lines: Vec<Line>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyledDocument {
    pub pages: Vec<Page>,
}

impl StyledDocument {
    /// Every line in reading order across all pages and blocks
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.pages
            .iter()
            .flat_map(|page| page.blocks.iter())
            .flat_map(|block| block.lines.iter())
    }

    /// Plain text of one page, one line per row
    pub fn page_text(page: &Page) -> String {
        page.blocks
            .iter()
            .flat_map(|block| block.lines.iter())
            .map(Line::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Plain text of the whole document, pages joined by newlines
    pub fn text(&self) -> String {
        self.pages
            .iter()
            .map(Self::page_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
