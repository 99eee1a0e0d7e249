//! Conversion Controller
//!
//! Owns the cached rate and the observable conversion state, and turns
//! toggle events into debounced rate refreshes.
//!
//! State lives behind a mutex and is only mutated while it is held, so the
//! debounce task and fetch tasks re-enter the controller the same way a
//! caller does. Every transition is published on a `watch` channel.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use converter_types::{
    AmountFormatter, ConversionPair, ConversionResponse, ConversionState, ConverterError,
    RateProvider,
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::debounce::{DebounceGate, DEFAULT_WINDOW};

/// Rendered in place of an amount while converted display has no rate yet.
pub const PLACEHOLDER: &str = "...";

/// Controller configuration.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Quiet period between the last toggle and the rate refresh.
    pub debounce: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_WINDOW,
        }
    }
}

struct Inner {
    state: ConversionState,
    cached_rate: Option<f64>,
    /// Tag of the most recently started fetch.
    generation: u64,
}

struct Shared<P> {
    pair: ConversionPair,
    provider: P,
    inner: Mutex<Inner>,
    notifier: watch::Sender<ConversionState>,
}

impl<P: RateProvider + 'static> Shared<P> {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies `f` to the state and publishes the result.
    fn update<T>(&self, f: impl FnOnce(&mut Inner) -> T) -> T {
        let mut inner = self.lock();
        let out = f(&mut inner);
        self.notifier.send_replace(inner.state);
        out
    }

    /// Called by the debounce gate once the quiet window elapses.
    fn begin_refresh(self: Arc<Self>) {
        let generation = {
            let mut inner = self.lock();
            // Toggled off between the timer firing and this call.
            if !inner.state.show_converted {
                debug!("Skipping rate refresh, conversion no longer shown");
                return;
            }
            inner.generation += 1;
            inner.state.loading = true;
            inner.state.failed = false;
            self.notifier.send_replace(inner.state);
            inner.generation
        };

        info!(pair = %self.pair, generation, "Refreshing conversion rate");

        tokio::spawn(async move {
            let result = self.provider.fetch(self.pair).await;
            self.complete(generation, result);
        });
    }

    fn complete(&self, generation: u64, result: Result<ConversionResponse, ConverterError>) {
        let mut inner = self.lock();

        if generation != inner.generation {
            debug!(
                generation,
                latest = inner.generation,
                "Discarding stale rate result"
            );
            return;
        }

        inner.state.loading = false;
        match result {
            Ok(response) => {
                debug!(rate = response.rate, generation, "Caching conversion rate");
                inner.cached_rate = Some(response.rate);
            }
            Err(err) => {
                warn!(pair = %self.pair, error = %err, "Rate refresh failed");
                inner.state.failed = true;
                inner.state.show_converted = false;
            }
        }

        self.notifier.send_replace(inner.state);
    }
}

/// Converts and formats amounts for one fixed currency pair.
///
/// Generic over `P: RateProvider` so tests can inject an in-memory provider.
/// Must be used from within a Tokio runtime; dropping the controller cancels
/// a pending refresh timer.
pub struct ConversionController<P: RateProvider + 'static> {
    shared: Arc<Shared<P>>,
    gate: DebounceGate,
    formatter: AmountFormatter,
}

impl<P: RateProvider + 'static> ConversionController<P> {
    /// Creates a controller with the default debounce window.
    pub fn new(pair: ConversionPair, provider: P) -> Self {
        Self::with_config(pair, provider, ControllerConfig::default())
    }

    pub fn with_config(pair: ConversionPair, provider: P, config: ControllerConfig) -> Self {
        let (notifier, _) = watch::channel(ConversionState::default());
        Self {
            shared: Arc::new(Shared {
                pair,
                provider,
                inner: Mutex::new(Inner {
                    state: ConversionState::default(),
                    cached_rate: None,
                    generation: 0,
                }),
                notifier,
            }),
            gate: DebounceGate::new(config.debounce),
            formatter: AmountFormatter::new(),
        }
    }

    pub fn pair(&self) -> ConversionPair {
        self.shared.pair
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────────────────────────

    /// Shows or hides converted amounts.
    ///
    /// Turning on schedules a debounced refresh. Turning off cancels a pending
    /// refresh but leaves the cached rate and any in-flight fetch alone.
    pub fn toggle(&self, on: bool) {
        self.shared.update(|inner| inner.state.show_converted = on);

        if on {
            let shared = Arc::clone(&self.shared);
            self.gate.submit(true, move || shared.begin_refresh());
            debug!(window = ?self.gate.window(), "Scheduled rate refresh");
        } else if self.gate.cancel() {
            debug!("Cancelled pending rate refresh");
        }
    }

    /// Clears the failure flag once it has been shown to the user.
    pub fn dismiss_failure(&self) {
        let mut inner = self.shared.lock();
        if inner.state.failed {
            inner.state.failed = false;
            self.shared.notifier.send_replace(inner.state);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────────

    /// Formats `amount` in whichever currency is currently shown.
    ///
    /// Returns an empty string for `None` and [`PLACEHOLDER`] while converted
    /// display has no rate to apply.
    pub fn format(&self, amount: Option<f64>) -> String {
        let Some(amount) = amount else {
            return String::new();
        };

        let (show_converted, cached_rate) = {
            let inner = self.shared.lock();
            (inner.state.show_converted, inner.cached_rate)
        };

        let pair = self.shared.pair;
        if show_converted {
            match cached_rate {
                Some(rate) => self
                    .formatter
                    .format(amount * rate, pair.to().locale_code()),
                None => PLACEHOLDER.to_string(),
            }
        } else {
            self.formatter.format(amount, pair.from().locale_code())
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Observation
    // ─────────────────────────────────────────────────────────────────────────────

    /// Current state snapshot.
    pub fn state(&self) -> ConversionState {
        self.shared.lock().state
    }

    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    pub fn has_failed(&self) -> bool {
        self.state().failed
    }

    pub fn shows_converted(&self) -> bool {
        self.state().show_converted
    }

    /// Rate from the last successful fetch, if any.
    pub fn cached_rate(&self) -> Option<f64> {
        self.shared.lock().cached_rate
    }

    /// Whether a refresh is still waiting out the debounce window.
    pub fn refresh_pending(&self) -> bool {
        self.gate.is_pending()
    }

    /// Receives a notification after every state transition.
    pub fn subscribe(&self) -> watch::Receiver<ConversionState> {
        self.shared.notifier.subscribe()
    }
}
