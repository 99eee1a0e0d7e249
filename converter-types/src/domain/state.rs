//! Observable conversion state.

use serde::{Deserialize, Serialize};

/// Snapshot of the flags a display layer renders from.
///
/// `loading` and `failed` are never both set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionState {
    /// A rate fetch is in flight.
    pub loading: bool,
    /// Amounts should be shown in the target currency.
    pub show_converted: bool,
    /// The most recent fetch failed.
    pub failed: bool,
}
