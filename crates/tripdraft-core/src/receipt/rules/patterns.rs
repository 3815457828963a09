//! Pattern lists for lodging receipt fields.
//!
//! Order inside each list is significant: earlier patterns take precedence.

use lazy_static::lazy_static;

use super::FieldRule;

lazy_static! {
    // Property / merchant name
    pub static ref VENDOR: FieldRule = FieldRule::new("vendor", &[
        r"(?m)^([^\n]*\b(?:Sonesta|Marriott|Hilton|Hyatt|Sheraton|Westin|Holiday Inn|Airbnb)\b[^\n]*)$",
        r"\bHotel[:\s]+([^\n]+)",
        r"\bVendor[:\s]+([^\n]+)",
        r"\bProperty[:\s]+([^\n]+)",
    ]).unwrap();

    // Stay dates ("Check-in: Fri, Mar 14" or labeled numeric dates)
    pub static ref CHECK_IN: FieldRule = FieldRule::new("date", &[
        r"Check-?in.*?([A-Za-z]{3},?\s?\w+\s?\d{1,2})",
        r"\bDate[:\s]+(\d{4}-\d{2}-\d{2})",
        r"\bDate[:\s]+(\d{1,2}/\d{1,2}/\d{2,4})",
    ]).unwrap();

    pub static ref CHECK_OUT: FieldRule = FieldRule::new("end_date", &[
        r"Check-?out.*?([A-Za-z]{3},?\s?\w+\s?\d{1,2})",
    ]).unwrap();

    // Amounts (US format: $1,234.56)
    pub static ref SUBTOTAL: FieldRule = FieldRule::new("subtotal", &[
        r"\bSubtotal\s*:?\s*\$\s*([\d.,]+)",
        r"\b\d+\s*nights?\s*\$\s*([\d.,]+)",
    ]).unwrap();

    pub static ref TAXES_FEES: FieldRule = FieldRule::new("taxes_fees", &[
        r"\bTaxes\s*(?:&|and)\s*fees\s*:?\s*\$\s*([\d.,]+)",
        r"\bTax(?:es)?\s*:?\s*\$\s*([\d.,]+)",
    ]).unwrap();

    pub static ref TOTAL: FieldRule = FieldRule::new("total", &[
        r"\bTotal\s*:?\s*\$\s*([\d.,]+)",
        r"\bAmount\s+(?:paid|charged)\s*:?\s*\$\s*([\d.,]+)",
    ]).unwrap();

    // Length of stay
    pub static ref NIGHTS: FieldRule = FieldRule::new("nights", &[
        r"\b(\d+)\s*nights?\b",
    ]).unwrap();
}

/// All built-in rules, in draft field order.
pub fn all_rules() -> [&'static FieldRule; 7] {
    [
        &*VENDOR,
        &*CHECK_IN,
        &*CHECK_OUT,
        &*SUBTOTAL,
        &*TAXES_FEES,
        &*TOTAL,
        &*NIGHTS,
    ]
}
