//! HTTP handlers, grouped by resource.

pub mod documents;
pub mod generate;
pub mod health;
