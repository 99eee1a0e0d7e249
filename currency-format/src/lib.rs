//! Currency Metadata and Localized Amount Formatting
//!
//! Currencies are defined declaratively with a macro that generates the
//! `Currency` enum together with its wire code, locale code, symbol and
//! rendering rules.
//!
//! Every currency carries two independently-cased codes:
//! - the **wire code** (`"USD"`), used in JSON payloads
//! - the **locale code** (`"usd"`), used to look up formatting rules
//!
//! # Example
//! ```
//! use currency_format::{AmountFormatter, Currency};
//!
//! let formatter = AmountFormatter::new();
//! assert_eq!(formatter.format(92.0, Currency::EUR.locale_code()), "€92.00");
//! assert_eq!(formatter.format(1234.5, "usd"), "$1,234.50");
//! ```

mod formatter;

pub use formatter::AmountFormatter;

/// Error returned when a currency code does not name a supported currency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown currency: {0}")]
pub struct UnknownCurrency(pub String);

// ─────────────────────────────────────────────────────────────────────────────
// THE MACRO: Defines the Currency enum and its metadata lookups
// ─────────────────────────────────────────────────────────────────────────────

/// Macro to define the supported currencies.
///
/// # Syntax
/// ```ignore
/// define_currencies! {
///     Name => ("WIRE", "locale", "symbol", fraction_digits),
/// }
/// ```
#[macro_export]
macro_rules! define_currencies {
    (
        $(
            $name:ident => ($wire:literal, $locale:literal, $symbol:literal, $digits:expr)
        ),* $(,)?
    ) => {
        /// Closed set of currencies the converter understands.
        ///
        /// Serializes as the uppercase wire code.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "UPPERCASE")]
        pub enum Currency {
            $($name),*
        }

        impl Currency {
            /// Uppercase ISO code used in request payloads.
            pub fn wire_code(&self) -> &'static str {
                match self {
                    $(Currency::$name => $wire),*
                }
            }

            /// Lowercase code used for formatting-rule lookup.
            pub fn locale_code(&self) -> &'static str {
                match self {
                    $(Currency::$name => $locale),*
                }
            }

            pub fn symbol(&self) -> &'static str {
                match self {
                    $(Currency::$name => $symbol),*
                }
            }

            /// Number of fractional digits used when rendering amounts.
            pub fn fraction_digits(&self) -> u32 {
                match self {
                    $(Currency::$name => $digits),*
                }
            }

            /// Looks a currency up by its locale code.
            pub fn from_locale_code(code: &str) -> Option<Currency> {
                match code.trim() {
                    $(c if c.eq_ignore_ascii_case($locale) => Some(Currency::$name),)*
                    _ => None,
                }
            }

            pub fn all() -> &'static [Currency] {
                &[$(Currency::$name),*]
            }
        }

        impl std::fmt::Display for Currency {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.wire_code())
            }
        }

        impl std::str::FromStr for Currency {
            type Err = UnknownCurrency;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_uppercase().as_str() {
                    $($wire => Ok(Currency::$name),)*
                    _ => Err(UnknownCurrency(s.to_string())),
                }
            }
        }
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// CURRENCY DEFINITIONS
// ─────────────────────────────────────────────────────────────────────────────

define_currencies! {
    USD => ("USD", "usd", "$", 2),
    EUR => ("EUR", "eur", "€", 2),
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
