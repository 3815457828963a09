//! Data models: configuration and draft expenses.

pub mod config;
pub mod expense;
