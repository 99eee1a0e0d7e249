//! Port traits (interfaces for adapters).
//!
//! The conversion controller depends on these traits, not on a concrete
//! HTTP client.

mod rate_provider;

pub use rate_provider::RateProvider;
