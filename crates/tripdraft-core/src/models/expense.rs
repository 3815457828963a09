//! Draft expense models produced by the ingestion pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currency put on every draft.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Category put on every draft.
pub const DEFAULT_CATEGORY: &str = "Lodging";

/// A best-effort expense record extracted from a receipt, meant for human
/// review.
///
/// Every field is independently optional. An absent field means the value
/// was not found; it is never an error marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpenseDraft {
    /// Merchant or property name.
    pub vendor: Option<String>,

    /// Start date (check-in), as written on the receipt.
    pub date: Option<String>,

    /// End date (check-out), as written on the receipt.
    pub end_date: Option<String>,

    /// Currency code.
    pub currency: Option<String>,

    /// Amount before taxes and fees.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub subtotal: Option<Decimal>,

    /// Taxes and fees.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub taxes_fees: Option<Decimal>,

    /// Amount charged.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub total: Option<Decimal>,

    /// Number of nights stayed.
    pub nights: Option<u32>,

    /// Expense category.
    pub category: Option<String>,
}

impl Default for ExpenseDraft {
    fn default() -> Self {
        Self {
            vendor: None,
            date: None,
            end_date: None,
            currency: Some(DEFAULT_CURRENCY.to_string()),
            subtotal: None,
            taxes_fees: None,
            total: None,
            nights: None,
            category: Some(DEFAULT_CATEGORY.to_string()),
        }
    }
}

impl ExpenseDraft {
    /// Create an empty draft (only the constant defaults are set).
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether none of the extracted fields has a value.
    pub fn is_empty(&self) -> bool {
        self.vendor.is_none()
            && self.date.is_none()
            && self.end_date.is_none()
            && self.subtotal.is_none()
            && self.taxes_fees.is_none()
            && self.total.is_none()
            && self.nights.is_none()
    }

    /// Names of the extracted fields that have no value.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let fields: [(&'static str, bool); 7] = [
            ("vendor", self.vendor.is_some()),
            ("date", self.date.is_some()),
            ("end_date", self.end_date.is_some()),
            ("subtotal", self.subtotal.is_some()),
            ("taxes_fees", self.taxes_fees.is_some()),
            ("total", self.total.is_some()),
            ("nights", self.nights.is_some()),
        ];
        fields
            .into_iter()
            .filter(|(_, present)| !present)
            .map(|(name, _)| name)
            .collect()
    }
}

/// Where a piece of extracted text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvenanceSource {
    /// Embedded text layer of a PDF page.
    PdfText,
}

impl ProvenanceSource {
    /// Fixed confidence weight for text from this source.
    pub fn score(self) -> f32 {
        match self {
            Self::PdfText => 0.9,
        }
    }
}

/// Provenance of the text contributed by one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    /// Source of the text.
    pub source: ProvenanceSource,
    /// Page number (1-indexed).
    pub page: u32,
    /// Confidence weight of the source.
    pub score: f32,
}

impl Provenance {
    pub fn new(source: ProvenanceSource, page: u32) -> Self {
        Self {
            source,
            page,
            score: source.score(),
        }
    }
}
