//! Request-policy middleware: rate limiting and the apiKey gate.

pub mod api_key;
pub mod rate_limit;
