//! Data access services.

pub mod quote;
