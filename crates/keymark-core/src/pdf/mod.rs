//! PDF document provider backed by `lopdf`
//!
//! Parsing failures of the file itself are hard errors: nothing can be graded
//! from an unreadable document. A page whose content stream cannot be decoded
//! is logged and kept as an empty page.

pub mod content;
pub mod fonts;

use std::time::Instant;

use lopdf::content::Content;
use lopdf::Document;
use tracing::{debug, warn};

use self::fonts::PageFonts;
use crate::document::{Page, StyledDocument};
use crate::error::{KeymarkError, Result};
use crate::trace_time;

/// Parse PDF bytes into a styled document.
///
/// `role` names the document in error messages (e.g. "answer key").
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn load_document(bytes: &[u8], role: &str) -> Result<StyledDocument> {
    let start = Instant::now();

    let doc = Document::load_mem(bytes).map_err(|e| KeymarkError::document_open(role, e))?;
    if doc.trailer.get(b"Encrypt").is_ok() {
        return Err(KeymarkError::document_open(role, "document is encrypted"));
    }

    let mut pages = Vec::new();
    for (number, page_id) in doc.get_pages() {
        let fonts = PageFonts::load(&doc, page_id);
        let page = doc
            .get_page_content(page_id)
            .and_then(|data| Content::decode(&data))
            .map(|content| content::walk_operations(&content.operations, &fonts));
        match page {
            Ok(page) => pages.push(page),
            Err(e) => {
                warn!(page = number, error = %e, "failed to decode page content");
                pages.push(Page::default());
            }
        }
    }

    debug!(pages = pages.len(), "document loaded");
    trace_time!(start, "load_document");
    Ok(StyledDocument { pages })
}

/// Plain text of a PDF: every line of every page, newline-joined
pub fn load_text(bytes: &[u8], role: &str) -> Result<String> {
    Ok(load_document(bytes, role)?.text())
}
