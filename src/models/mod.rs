//! Persisted entities and request payloads.

pub mod quote;
