//! Receipt field extraction module.

mod parser;
pub mod rules;

pub use parser::{simple_extract, ReceiptField, ReceiptParser};
