//! Document loading: raw bytes plus a format hint into ordered segments.
//!
//! The loader knows two formats: PDF (one [`Segment`] per page, extracted
//! with `lopdf`) and plain text (the whole byte stream as UTF-8, one
//! segment). By default any non-PDF hint falls back to the text parser,
//! matching how uploads are dispatched on filename extension. A strict
//! loader can be constructed for callers that want unknown extensions
//! rejected instead.

use tracing::debug;

use crate::document::Segment;
use crate::error::{RagError, Result};

/// Declared format of an uploaded document, derived from its filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatHint {
    /// Parse as PDF, one segment per page.
    Pdf,
    /// Treat the whole byte stream as UTF-8 text.
    Text,
}

impl FormatHint {
    /// Derive a format hint from a filename extension.
    ///
    /// Anything that is not `.pdf` (case-insensitive) is treated as text,
    /// mirroring the upload dispatch of the service boundary.
    pub fn from_name(name: &str) -> Self {
        if name.to_lowercase().ends_with(".pdf") { FormatHint::Pdf } else { FormatHint::Text }
    }
}

/// Converts an uploaded byte stream into an ordered sequence of [`Segment`]s.
///
/// Every produced segment carries the caller-provided document name as its
/// `source` and its position within the document as `sequence_index`.
#[derive(Debug, Clone)]
pub struct DocumentLoader {
    /// When false, hints other than PDF are rejected with
    /// [`RagError::UnsupportedFormat`] instead of falling back to text.
    text_fallback: bool,
}

impl Default for DocumentLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentLoader {
    /// Create a loader with the plain-text fallback enabled.
    pub fn new() -> Self {
        Self { text_fallback: true }
    }

    /// Create a loader that rejects hints without a dedicated parser.
    pub fn strict() -> Self {
        Self { text_fallback: false }
    }

    /// Load `bytes` as `name` using the given format hint.
    ///
    /// # Errors
    ///
    /// - [`RagError::CorruptDocument`] if the bytes do not parse as the
    ///   declared format (broken PDF structure, invalid UTF-8 text).
    /// - [`RagError::UnsupportedFormat`] if this is a strict loader and the
    ///   hint has no dedicated parser.
    pub fn load(&self, bytes: &[u8], name: &str, hint: FormatHint) -> Result<Vec<Segment>> {
        let segments = match hint {
            FormatHint::Pdf => self.load_pdf(bytes, name)?,
            FormatHint::Text if self.text_fallback => self.load_text(bytes, name)?,
            FormatHint::Text => {
                return Err(RagError::UnsupportedFormat { hint: "text".to_string() });
            }
        };
        debug!(source = name, segment_count = segments.len(), "loaded document");
        Ok(segments)
    }

    /// Extract one segment per PDF page, in page order.
    ///
    /// Pages with no extractable text still produce a segment; the grounding
    /// gate downstream decides whether whitespace-only content is usable.
    fn load_pdf(&self, bytes: &[u8], name: &str) -> Result<Vec<Segment>> {
        let document = lopdf::Document::load_mem(bytes).map_err(|e| RagError::CorruptDocument {
            source_name: name.to_string(),
            message: format!("failed to parse PDF: {e}"),
        })?;

        let mut segments = Vec::new();
        for (sequence_index, (&page_number, _)) in document.get_pages().iter().enumerate() {
            let content = document.extract_text(&[page_number]).map_err(|e| {
                RagError::CorruptDocument {
                    source_name: name.to_string(),
                    message: format!("failed to extract text from page {page_number}: {e}"),
                }
            })?;
            segments.push(Segment { content, source: name.to_string(), sequence_index });
        }
        Ok(segments)
    }

    /// Treat the whole byte stream as one UTF-8 text segment.
    fn load_text(&self, bytes: &[u8], name: &str) -> Result<Vec<Segment>> {
        let content = std::str::from_utf8(bytes).map_err(|e| RagError::CorruptDocument {
            source_name: name.to_string(),
            message: format!("invalid UTF-8: {e}"),
        })?;
        Ok(vec![Segment {
            content: content.to_string(),
            source: name.to_string(),
            sequence_index: 0,
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hint_from_extension() {
        assert_eq!(FormatHint::from_name("report.PDF"), FormatHint::Pdf);
        assert_eq!(FormatHint::from_name("notes.txt"), FormatHint::Text);
        assert_eq!(FormatHint::from_name("README"), FormatHint::Text);
    }

    #[test]
    fn text_document_loads_as_single_segment() {
        let loader = DocumentLoader::new();
        let segments = loader.load(b"The sky is blue.", "notes.txt", FormatHint::Text).unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].content, "The sky is blue.");
        assert_eq!(segments[0].source, "notes.txt");
        assert_eq!(segments[0].sequence_index, 0);
    }

    #[test]
    fn invalid_utf8_is_corrupt() {
        let loader = DocumentLoader::new();
        let err = loader.load(&[0xff, 0xfe, 0x00], "raw.txt", FormatHint::Text).unwrap_err();
        assert!(matches!(err, RagError::CorruptDocument { .. }));
    }

    #[test]
    fn broken_pdf_is_corrupt() {
        let loader = DocumentLoader::new();
        let err = loader.load(b"not a pdf at all", "broken.pdf", FormatHint::Pdf).unwrap_err();
        assert!(matches!(err, RagError::CorruptDocument { .. }));
    }

    #[test]
    fn strict_loader_rejects_unknown_hints() {
        let loader = DocumentLoader::strict();
        let err = loader.load(b"hello", "notes.txt", FormatHint::Text).unwrap_err();
        assert!(matches!(err, RagError::UnsupportedFormat { .. }));
    }
}
