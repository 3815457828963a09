//! Ingestion pipeline: classify an upload, extract text, pick fields.

mod media;

pub use media::{
    guess_from_filename, resolve_media_type, MediaType, OCTET_STREAM_MIME_TYPE, PDF_MIME_TYPE,
};

use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::models::config::PipelineConfig;
use crate::models::expense::{ExpenseDraft, Provenance};
use crate::pdf::extract_pdf_text;
use crate::receipt::ReceiptParser;

/// Outcome of ingesting one upload.
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    /// Resolved media type.
    pub media_type: MediaType,
    /// Characters of embedded text found (0 when no extraction ran).
    pub text_chars: usize,
    /// Pages that contributed text.
    pub provenance: Vec<Provenance>,
    /// The draft expense.
    pub draft: ExpenseDraft,
}

impl IngestReport {
    fn empty(media_type: MediaType) -> Self {
        Self {
            media_type,
            text_chars: 0,
            provenance: Vec::new(),
            draft: ExpenseDraft::default(),
        }
    }
}

/// Ingest an upload and report how the draft was produced.
///
/// Images, unsupported types, and PDFs with too little embedded text all
/// produce an empty draft. Only a PDF that cannot be parsed is an error.
pub fn ingest(
    data: &[u8],
    filename: &str,
    declared_type: Option<&str>,
    config: &PipelineConfig,
) -> Result<IngestReport> {
    let media_type = resolve_media_type(filename, declared_type);
    debug!(
        "Resolved {:?} ({} bytes, declared {:?}) to {}",
        filename,
        data.len(),
        declared_type,
        media_type
    );

    match media_type {
        MediaType::Image(_) => {
            // TODO: send image bytes through an OCR engine once one is wired in.
            info!("Image upload, OCR not available; returning empty draft");
            Ok(IngestReport::empty(media_type))
        }
        MediaType::Pdf => {
            let layer = extract_pdf_text(data)?;
            let text_chars = layer.char_count();

            let draft = if text_chars >= config.min_text_chars {
                ReceiptParser::new().parse(&layer.text)
            } else {
                info!(
                    "PDF has {} chars of embedded text (< {}), treating as scanned",
                    text_chars, config.min_text_chars
                );
                ExpenseDraft::default()
            };

            Ok(IngestReport {
                media_type,
                text_chars,
                provenance: layer.provenance,
                draft,
            })
        }
        MediaType::Other(_) => {
            info!("Unsupported media type {}; returning empty draft", media_type);
            Ok(IngestReport::empty(media_type))
        }
    }
}

/// Turn an upload into a draft expense.
pub fn process_upload(
    data: &[u8],
    filename: &str,
    declared_type: Option<&str>,
    config: &PipelineConfig,
) -> Result<ExpenseDraft> {
    ingest(data, filename, declared_type, config).map(|report| report.draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PdfError, TripdraftError};
    use crate::testing::build_pdf;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    const RECEIPT_LINES: &[&str] = &[
        "Sonesta Simply Suites",
        "Check-in: Fri, Mar 14",
        "Check-out: Sat, Mar 15",
        "1 night $120.50",
        "Subtotal $120.50",
        "Taxes & fees $14.50",
        "Total $135.00",
    ];

    fn config(min_text_chars: usize) -> PipelineConfig {
        PipelineConfig::default().with_min_text_chars(min_text_chars)
    }

    #[test]
    fn test_image_returns_empty_draft() {
        // Even a text PDF is never opened when the declared type is an image.
        let data = build_pdf(&[RECEIPT_LINES]);
        let report = ingest(&data, "receipt.pdf", Some("image/jpeg"), &config(0)).unwrap();

        assert!(report.media_type.is_image());
        assert_eq!(report.draft, ExpenseDraft::default());
        assert!(report.provenance.is_empty());

        let draft = process_upload(b"\x89PNG", "scan.png", None, &config(0)).unwrap();
        assert!(draft.is_empty());
    }

    #[test]
    fn test_pdf_above_threshold_is_parsed() {
        let data = build_pdf(&[RECEIPT_LINES]);
        let report = ingest(&data, "receipt.pdf", None, &config(50)).unwrap();

        assert!(report.text_chars >= 50);
        assert_eq!(report.provenance.len(), 1);

        let draft = report.draft;
        assert_eq!(draft.vendor.as_deref(), Some("Sonesta Simply Suites"));
        assert_eq!(draft.date.as_deref(), Some("Fri, Mar 14"));
        assert_eq!(draft.end_date.as_deref(), Some("Sat, Mar 15"));
        assert_eq!(draft.subtotal, Some(Decimal::new(12050, 2)));
        assert_eq!(draft.taxes_fees, Some(Decimal::new(1450, 2)));
        assert_eq!(draft.total, Some(Decimal::new(13500, 2)));
        assert_eq!(draft.nights, Some(1));
        assert_eq!(draft.currency.as_deref(), Some("USD"));
        assert_eq!(draft.category.as_deref(), Some("Lodging"));
    }

    #[test]
    fn test_pdf_below_threshold_is_empty() {
        let data = build_pdf(&[RECEIPT_LINES]);
        let report = ingest(&data, "receipt.pdf", Some(PDF_MIME_TYPE), &config(10_000)).unwrap();

        assert!(report.text_chars > 0);
        assert_eq!(report.provenance.len(), 1);
        assert_eq!(report.draft, ExpenseDraft::default());
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let data = build_pdf(&[RECEIPT_LINES]);
        let chars = extract_pdf_text(&data).unwrap().char_count();

        let at = process_upload(&data, "receipt.pdf", None, &config(chars)).unwrap();
        assert!(!at.is_empty());

        let above = process_upload(&data, "receipt.pdf", None, &config(chars + 1)).unwrap();
        assert!(above.is_empty());
    }

    #[test]
    fn test_configured_currency_is_not_applied() {
        let data = build_pdf(&[RECEIPT_LINES]);
        let config = config(0).with_currency_default("EUR");
        let draft = process_upload(&data, "receipt.pdf", None, &config).unwrap();

        assert_eq!(draft.currency.as_deref(), Some("USD"));
    }

    #[test]
    fn test_whitespace_only_pdf_is_empty() {
        let data = build_pdf(&[&["   "], &[]]);
        let report = ingest(&data, "blank.pdf", None, &config(1)).unwrap();

        assert_eq!(report.text_chars, 0);
        assert!(report.provenance.is_empty());
        assert_eq!(report.draft, ExpenseDraft::default());
    }

    #[test]
    fn test_unknown_binary_skips_extraction() {
        let report = ingest(b"%PDF-garbage", "upload", Some(""), &config(0)).unwrap();

        assert_eq!(report.media_type.essence(), OCTET_STREAM_MIME_TYPE);
        assert_eq!(report.text_chars, 0);
        assert_eq!(report.draft, ExpenseDraft::default());
    }

    #[test]
    fn test_unsupported_type_is_empty() {
        let draft = process_upload(b"Total $135.00", "notes.txt", None, &config(0)).unwrap();
        assert_eq!(draft, ExpenseDraft::default());
    }

    #[test]
    fn test_malformed_pdf_is_an_error() {
        let result = process_upload(b"not a pdf at all", "receipt.pdf", None, &config(0));
        assert!(matches!(
            result,
            Err(TripdraftError::Pdf(PdfError::Parse(_)))
        ));

        let result = process_upload(b"", "upload.bin", Some("application/pdf"), &config(0));
        assert!(result.is_err());
    }

    #[test]
    fn test_report_serializes_media_type() {
        let report = ingest(b"", "scan.png", None, &config(0)).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["media_type"], "image/png");
        assert_eq!(json["draft"]["category"], "Lodging");
    }
}
