//! Expense totals rendered through a conversion controller.

use std::time::Duration;

use converter_core::ConversionController;
use converter_types::{ConversionPair, ConversionState, RateProvider};
use serde::Serialize;
use tokio::sync::watch;
use tokio::time::timeout;

/// Shown when a rate refresh fails.
pub const FAILURE_NOTICE: &str = "Please try again later";

/// Shown while a rate fetch is in flight.
pub const REFRESH_NOTICE: &str = "Refreshing conversion rate";

/// Shown in place of the total when there are no expenses.
pub const EMPTY_NOTICE: &str = "No expenses data";

/// One category's summed expenses.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub category: String,
    pub amount: f64,
}

/// Parses a `category=amount` argument.
pub fn parse_expense(s: &str) -> Result<Expense, String> {
    let (category, amount) = s
        .split_once('=')
        .ok_or_else(|| format!("Expected category=amount, got {}", s))?;

    let category = category.trim();
    if category.is_empty() {
        return Err(format!("Missing category in {}", s));
    }

    let amount: f64 = amount
        .trim()
        .parse()
        .map_err(|_| format!("Invalid amount in {}", s))?;
    if !amount.is_finite() {
        return Err(format!("Invalid amount in {}", s));
    }

    Ok(Expense {
        category: category.to_string(),
        amount,
    })
}

/// Rendered dashboard contents.
#[derive(Debug, Serialize)]
pub struct Report {
    pub pair: ConversionPair,
    pub state: ConversionState,
    pub total: String,
    pub breakdown: Vec<ReportRow>,
}

#[derive(Debug, Serialize)]
pub struct ReportRow {
    pub category: String,
    pub amount: String,
}

pub struct Dashboard<P: RateProvider + 'static> {
    controller: ConversionController<P>,
    expenses: Vec<Expense>,
}

impl<P: RateProvider + 'static> Dashboard<P> {
    pub fn new(controller: ConversionController<P>, expenses: Vec<Expense>) -> Self {
        Self {
            controller,
            expenses,
        }
    }

    pub fn controller(&self) -> &ConversionController<P> {
        &self.controller
    }

    /// Sum of all categories, absent when there is nothing to sum.
    pub fn total(&self) -> Option<f64> {
        if self.expenses.is_empty() {
            None
        } else {
            Some(self.expenses.iter().map(|e| e.amount).sum())
        }
    }

    pub fn report(&self) -> Report {
        Report {
            pair: self.controller.pair(),
            state: self.controller.state(),
            total: self.controller.format(self.total()),
            breakdown: self
                .expenses
                .iter()
                .map(|e| ReportRow {
                    category: e.category.clone(),
                    amount: self.controller.format(Some(e.amount)),
                })
                .collect(),
        }
    }

    pub fn render(&self) -> String {
        let report = self.report();
        let mut out = String::new();
        if report.state.loading {
            out.push_str(&format!("{}...\n", REFRESH_NOTICE));
        }
        if self.total().is_none() {
            out.push_str(EMPTY_NOTICE);
            out.push('\n');
            return out;
        }
        out.push_str(&format!("Total expenses: {}\n", report.total));
        if !report.breakdown.is_empty() {
            out.push_str("Breakdown\n");
            for row in &report.breakdown {
                out.push_str(&format!("  {:<16} {}\n", row.category, row.amount));
            }
        }
        out
    }

    /// Switches to converted display and waits until the refresh settles.
    ///
    /// Returns the settled state; on failure the display has already
    /// reverted to the source currency.
    pub async fn show_converted(&self, deadline: Duration) -> anyhow::Result<ConversionState> {
        let rx = self.controller.subscribe();
        self.controller.toggle(true);

        match timeout(deadline, self.wait_settled(rx)).await {
            Ok(state) => state,
            Err(_) => anyhow::bail!("Conversion rate did not arrive within {:?}", deadline),
        }
    }

    async fn wait_settled(
        &self,
        mut rx: watch::Receiver<ConversionState>,
    ) -> anyhow::Result<ConversionState> {
        let mut announced = false;
        loop {
            rx.changed().await?;
            let state = *rx.borrow_and_update();
            if state.loading && !announced {
                eprintln!("{}...", REFRESH_NOTICE);
                announced = true;
            }
            if state.failed {
                return Ok(state);
            }
            if !state.loading
                && !self.controller.refresh_pending()
                && self.controller.cached_rate().is_some()
            {
                return Ok(state);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use converter_types::{ConversionResponse, ConverterError, Currency};

    struct FixedRate(Result<f64, ConverterError>);

    #[async_trait]
    impl RateProvider for FixedRate {
        async fn fetch(&self, _pair: ConversionPair) -> Result<ConversionResponse, ConverterError> {
            self.0
                .clone()
                .map(|rate| ConversionResponse { amount: rate, rate })
        }
    }

    struct NeverReplies;

    #[async_trait]
    impl RateProvider for NeverReplies {
        async fn fetch(&self, _pair: ConversionPair) -> Result<ConversionResponse, ConverterError> {
            std::future::pending().await
        }
    }

    fn dashboard(rate: Result<f64, ConverterError>) -> Dashboard<FixedRate> {
        let pair = ConversionPair::new(Currency::USD, Currency::EUR).unwrap();
        let expenses = vec![
            parse_expense("groceries=60").unwrap(),
            parse_expense("transport=40").unwrap(),
        ];
        Dashboard::new(ConversionController::new(pair, FixedRate(rate)), expenses)
    }

    #[test]
    fn test_parse_expense() {
        let expense = parse_expense("rent = 1200.50").unwrap();
        assert_eq!(expense.category, "rent");
        assert_eq!(expense.amount, 1200.50);
    }

    #[test]
    fn test_parse_expense_rejects_bad_input() {
        assert!(parse_expense("rent").is_err());
        assert!(parse_expense("=12").is_err());
        assert!(parse_expense("rent=abc").is_err());
        assert!(parse_expense("rent=NaN").is_err());
    }

    #[tokio::test]
    async fn test_render_unconverted() {
        let dashboard = dashboard(Ok(0.92));
        assert_eq!(
            dashboard.render(),
            "Total expenses: $100.00\nBreakdown\n  groceries        $60.00\n  transport        $40.00\n"
        );
    }

    #[tokio::test]
    async fn test_empty_dashboard_renders_empty_notice() {
        let pair = ConversionPair::new(Currency::USD, Currency::EUR).unwrap();
        let controller = ConversionController::new(pair, FixedRate(Ok(0.92)));
        let dashboard = Dashboard::new(controller, vec![]);
        assert_eq!(dashboard.total(), None);
        assert_eq!(dashboard.render(), "No expenses data\n");
    }

    #[tokio::test(start_paused = true)]
    async fn test_render_shows_refresh_notice_while_loading() {
        let pair = ConversionPair::new(Currency::USD, Currency::EUR).unwrap();
        let expenses = vec![parse_expense("groceries=60").unwrap()];
        let dashboard = Dashboard::new(ConversionController::new(pair, NeverReplies), expenses);

        dashboard.controller().toggle(true);
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert!(dashboard.controller().is_loading());
        assert_eq!(
            dashboard.render(),
            "Refreshing conversion rate...\nTotal expenses: ...\nBreakdown\n  groceries        ...\n"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_show_converted_times_out_while_loading() {
        let pair = ConversionPair::new(Currency::USD, Currency::EUR).unwrap();
        let dashboard = Dashboard::new(ConversionController::new(pair, NeverReplies), vec![]);

        let result = dashboard.show_converted(Duration::from_secs(5)).await;

        assert!(result.is_err());
        assert!(dashboard.render().starts_with(REFRESH_NOTICE));
    }

    #[tokio::test(start_paused = true)]
    async fn test_show_converted_renders_target_currency() {
        let dashboard = dashboard(Ok(0.92));

        let state = dashboard
            .show_converted(Duration::from_secs(5))
            .await
            .unwrap();

        assert!(state.show_converted && !state.failed);
        let report = dashboard.report();
        assert_eq!(report.total, "€92.00");
        assert_eq!(report.breakdown[0].amount, "€55.20");
    }

    #[tokio::test(start_paused = true)]
    async fn test_show_converted_failure_reverts() {
        let dashboard = dashboard(Err(ConverterError::Transport("offline".into())));

        let state = dashboard
            .show_converted(Duration::from_secs(5))
            .await
            .unwrap();

        assert!(state.failed && !state.show_converted);
        assert_eq!(dashboard.report().total, "$100.00");
    }
}
