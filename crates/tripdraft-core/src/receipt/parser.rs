//! Heuristic receipt parser turning raw text into a draft expense.

use rust_decimal::Decimal;
use tracing::{debug, info, trace};

use crate::models::expense::{ExpenseDraft, DEFAULT_CATEGORY, DEFAULT_CURRENCY};

use super::rules::{
    parse_amount, parse_count, ExtractionMatch, FieldRule, CHECK_IN, CHECK_OUT, NIGHTS, SUBTOTAL,
    TAXES_FEES, TOTAL, VENDOR,
};

/// Fields the parser picks from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptField {
    Vendor,
    Date,
    EndDate,
    Subtotal,
    TaxesFees,
    Total,
    Nights,
}

impl ReceiptField {
    /// All picked fields, in draft order.
    pub const ALL: [ReceiptField; 7] = [
        Self::Vendor,
        Self::Date,
        Self::EndDate,
        Self::Subtotal,
        Self::TaxesFees,
        Self::Total,
        Self::Nights,
    ];

    /// The pattern list used for this field.
    pub fn rule(self) -> &'static FieldRule {
        match self {
            Self::Vendor => &*VENDOR,
            Self::Date => &*CHECK_IN,
            Self::EndDate => &*CHECK_OUT,
            Self::Subtotal => &*SUBTOTAL,
            Self::TaxesFees => &*TAXES_FEES,
            Self::Total => &*TOTAL,
            Self::Nights => &*NIGHTS,
        }
    }
}

/// Rule-based receipt parser.
///
/// Produces a draft for human review: fields that are not found, or whose
/// text does not coerce to the field's type, are left empty. No cross-field
/// checks are made (a total need not equal subtotal plus taxes).
#[derive(Debug, Clone, Copy, Default)]
pub struct ReceiptParser;

impl ReceiptParser {
    /// Create a new receipt parser.
    pub fn new() -> Self {
        Self
    }

    /// Pick the raw text of a single field.
    pub fn pick_field(&self, field: ReceiptField, text: &str) -> Option<ExtractionMatch<String>> {
        let picked = field.rule().pick(text);
        match &picked {
            Some(m) => trace!("{:?} matched pattern {}: {:?}", field, m.pattern, m.source),
            None => trace!("{:?} not found", field),
        }
        picked
    }

    fn pick_text(&self, field: ReceiptField, text: &str) -> Option<String> {
        self.pick_field(field, text).map(|m| m.value)
    }

    fn pick_amount(&self, field: ReceiptField, text: &str) -> Option<Decimal> {
        let picked = self.pick_field(field, text)?;
        let raw = picked.value.clone();
        let amount = picked.try_map(|v| parse_amount(v));
        if amount.is_none() {
            debug!("Discarding non-numeric {:?} value {:?}", field, raw);
        }
        amount.map(|m| m.value)
    }

    fn pick_count(&self, field: ReceiptField, text: &str) -> Option<u32> {
        let picked = self.pick_field(field, text)?;
        let raw = picked.value.clone();
        let count = picked.try_map(|v| parse_count(v));
        if count.is_none() {
            debug!("Discarding non-integer {:?} value {:?}", field, raw);
        }
        count.map(|m| m.value)
    }

    /// Parse a draft expense from receipt text.
    pub fn parse(&self, text: &str) -> ExpenseDraft {
        info!("Parsing receipt from {} characters of text", text.chars().count());

        let draft = ExpenseDraft {
            vendor: self.pick_text(ReceiptField::Vendor, text),
            date: self.pick_text(ReceiptField::Date, text),
            end_date: self.pick_text(ReceiptField::EndDate, text),
            currency: Some(DEFAULT_CURRENCY.to_string()),
            subtotal: self.pick_amount(ReceiptField::Subtotal, text),
            taxes_fees: self.pick_amount(ReceiptField::TaxesFees, text),
            total: self.pick_amount(ReceiptField::Total, text),
            nights: self.pick_count(ReceiptField::Nights, text),
            category: Some(DEFAULT_CATEGORY.to_string()),
        };

        let missing = draft.missing_fields();
        if !missing.is_empty() {
            debug!("Draft is missing fields: {}", missing.join(", "));
        }

        draft
    }
}

/// Parse a draft expense from receipt text with the default parser.
pub fn simple_extract(text: &str) -> ExpenseDraft {
    ReceiptParser::new().parse(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CONFIRMATION: &str = r#"
        Sonesta Simply Suites Boston Braintree
        Reservation confirmation #48213

        Check-in: Fri, Mar 14
        Check-out: Sun, Mar 16

        2 nights $241.00
        Subtotal $241.00
        Taxes & fees $28.92
        Total $269.92
    "#;

    #[test]
    fn test_parse_confirmation() {
        let draft = ReceiptParser::new().parse(CONFIRMATION);

        assert_eq!(
            draft,
            ExpenseDraft {
                vendor: Some("Sonesta Simply Suites Boston Braintree".to_string()),
                date: Some("Fri, Mar 14".to_string()),
                end_date: Some("Sun, Mar 16".to_string()),
                currency: Some("USD".to_string()),
                subtotal: Some(Decimal::new(24100, 2)),
                taxes_fees: Some(Decimal::new(2892, 2)),
                total: Some(Decimal::new(26992, 2)),
                nights: Some(2),
                category: Some("Lodging".to_string()),
            }
        );
    }

    #[test]
    fn test_amount_example() {
        let text = "Subtotal $120.50\nTaxes & fees $14.50\nTotal $135.00";
        let draft = simple_extract(text);

        assert_eq!(draft.subtotal, Some(Decimal::new(12050, 2)));
        assert_eq!(draft.taxes_fees, Some(Decimal::new(1450, 2)));
        assert_eq!(draft.total, Some(Decimal::new(13500, 2)));
    }

    #[test]
    fn test_fixed_fields_regardless_of_text() {
        for text in ["", "Currency: EUR\nCategory: Meals", "€ 120,00"] {
            let draft = simple_extract(text);
            assert_eq!(draft.currency.as_deref(), Some("USD"));
            assert_eq!(draft.category.as_deref(), Some("Lodging"));
        }
    }

    #[test]
    fn test_nothing_found() {
        let draft = simple_extract("Thank you for your business");
        assert!(draft.is_empty());
        assert_eq!(draft, ExpenseDraft::default());
    }

    #[test]
    fn test_bad_coercion_leaves_field_empty() {
        let text = "Hotel: Grand Plaza\nSubtotal $1.2.3\nTotal $135.00\n99999999999 nights";
        let draft = simple_extract(text);

        assert_eq!(draft.vendor.as_deref(), Some("Grand Plaza"));
        assert_eq!(draft.subtotal, None);
        assert_eq!(draft.total, Some(Decimal::new(13500, 2)));
        assert_eq!(draft.nights, None);
    }

    #[test]
    fn test_misgrouped_amounts_are_absent() {
        let text = "Subtotal $1,2,3\nTotal $120,00\nTaxes & fees $14.50.";
        let draft = simple_extract(text);

        assert_eq!(draft.subtotal, None);
        assert_eq!(draft.total, None);
        assert_eq!(draft.taxes_fees, Some(Decimal::new(1450, 2)));
    }

    #[test]
    fn test_no_cross_field_validation() {
        let text = "Subtotal $100.00\nTaxes & fees $10.00\nTotal $500.00";
        let draft = simple_extract(text);
        assert_eq!(draft.total, Some(Decimal::new(500, 0)));
    }

    #[test]
    fn test_pick_field_reports_pattern() {
        let parser = ReceiptParser::new();
        let picked = parser
            .pick_field(ReceiptField::Subtotal, "1 night $120.50")
            .unwrap();
        assert_eq!(picked.value, "120.50");
        assert_eq!(picked.pattern, 1);

        assert!(parser.pick_field(ReceiptField::Total, "no amounts").is_none());
    }

    #[test]
    fn test_every_field_has_rule() {
        for field in ReceiptField::ALL {
            assert!(!field.rule().is_empty());
        }
    }
}
