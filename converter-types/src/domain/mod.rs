//! Domain models for the currency converter.

pub mod pair;
pub mod state;

pub use pair::ConversionPair;
pub use state::ConversionState;
