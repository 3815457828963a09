//! PDF text extraction using lopdf.

use lopdf::Document;
use tracing::{debug, trace, warn};

use super::{PdfProcessor, Result};
use crate::error::PdfError;
use crate::models::expense::{Provenance, ProvenanceSource};

/// PDF text extractor using lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
}

/// Embedded text of a PDF.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfText {
    /// Text of the contributing pages, joined with a newline.
    pub text: String,
    /// One record per page that contributed text, in page order.
    pub provenance: Vec<Provenance>,
}

impl PdfText {
    /// Number of characters in the extracted text.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self { document: None }
    }

    fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or_else(|| PdfError::Parse("no document loaded".to_string()))
    }

    /// Decode one page already known to exist.
    fn decode_page(doc: &Document, page: u32) -> String {
        match doc.extract_text(&[page]) {
            Ok(text) => text,
            Err(e) => {
                // Treated like a page without a text layer.
                warn!("Could not decode text on page {}: {}", page, e);
                String::new()
            }
        }
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");
        }

        debug!("Loaded PDF with {} pages", doc.get_pages().len());
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self.document()?;
        if !doc.get_pages().contains_key(&page) {
            return Err(PdfError::InvalidPage(page));
        }

        Ok(Self::decode_page(doc, page))
    }

    fn extract_text_layer(&self) -> Result<PdfText> {
        let doc = self.document()?;

        let pages = doc.get_pages();

        let mut parts = Vec::new();
        let mut provenance = Vec::new();

        for &page in pages.keys() {
            let text = Self::decode_page(doc, page);
            if text.trim().is_empty() {
                trace!("Page {} has no embedded text", page);
                continue;
            }
            parts.push(text);
            provenance.push(Provenance::new(ProvenanceSource::PdfText, page));
        }

        let layer = PdfText {
            text: parts.join("\n"),
            provenance,
        };

        debug!(
            "Extracted {} chars of text from {}/{} pages",
            layer.char_count(),
            layer.provenance.len(),
            pages.len()
        );

        Ok(layer)
    }
}

/// Parse PDF bytes and extract their embedded text layer.
pub fn extract_pdf_text(data: &[u8]) -> Result<PdfText> {
    let mut extractor = PdfExtractor::new();
    extractor.load(data)?;
    extractor.extract_text_layer()
}
