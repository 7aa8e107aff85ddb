//! # l4docs-core
//!
//! Core types, traits, and abstractions for the l4docs document generator.
//!
//! This crate provides the document kinds, the per-kind payload schemas,
//! the declarative payload-to-placeholder mapping tables, the currency
//! formatter, and the repository trait the log store implements.

pub mod currency;
pub mod error;
pub mod mapping;
pub mod models;
pub mod payloads;
pub mod traits;

// Re-export commonly used types at crate root
pub use currency::{format_brl, format_currency, CURRENCY_PREFIX};
pub use error::{Error, Result};
pub use mapping::{build_field_values, field_map, FieldMapping, FieldValues, Transform};
pub use models::*;
pub use payloads::{
    fields_for, parse_payload, AcknowledgmentPayload, ContractPayload, DeclarationPayload,
    DocumentPayload, FieldSpec, FieldType, PowerOfAttorneyPayload,
};
pub use traits::*;
