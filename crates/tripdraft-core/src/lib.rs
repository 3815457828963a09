//! Core library for lodging receipt ingestion.
//!
//! This crate provides:
//! - Media type resolution for uploads (declared type or filename extension)
//! - PDF embedded-text extraction with per-page provenance
//! - Heuristic field picking into a reviewable draft expense

pub mod error;
pub mod models;
pub mod pdf;
pub mod pipeline;
pub mod receipt;

#[cfg(test)]
mod testing;

pub use error::{PdfError, Result, TripdraftError};
pub use models::config::PipelineConfig;
pub use models::expense::{ExpenseDraft, Provenance, ProvenanceSource};
pub use pdf::{extract_pdf_text, PdfExtractor, PdfProcessor, PdfText};
pub use pipeline::{ingest, process_upload, resolve_media_type, IngestReport, MediaType};
pub use receipt::{simple_extract, ReceiptField, ReceiptParser};
