// In crates/engine/src/handler.rs

use crate::{Error, HandlerSettings, Outcome, Result};
use api_client::MarketDataProvider;
use core_types::{Action, Alert, AlertDetails, AlertKind, TradingInstruction};
use execution::Executor;
use std::sync::Arc;
use strategies::Strategy;

/// Turns one alert into at most one trading instruction.
///
/// The handler holds no mutable state, so one instance serves every request.
pub struct AlertHandler {
    settings: HandlerSettings,
    market_data: Arc<dyn MarketDataProvider>,
    executor: Arc<dyn Executor>,
    strategy: Box<dyn Strategy>,
}

impl AlertHandler {
    pub fn new(
        settings: HandlerSettings,
        market_data: Arc<dyn MarketDataProvider>,
        executor: Arc<dyn Executor>,
        strategy: Box<dyn Strategy>,
    ) -> Self {
        Self {
            settings,
            market_data,
            executor,
            strategy,
        }
    }

    pub fn settings(&self) -> &HandlerSettings {
        &self.settings
    }

    /// Classifies the alert and carries out the matching branch.
    pub async fn handle(&self, alert: &Alert) -> Result<Outcome> {
        let kind = alert.kind();
        let details = alert.details();
        if let Some(ticker) = details.ticker.as_deref() {
            if ticker != self.settings.trading_ticker {
                tracing::warn!(
                    alert_ticker = ticker,
                    trading_ticker = %self.settings.trading_ticker,
                    "Alert names a different ticker; trading the configured one."
                );
            }
        }

        match kind {
            AlertKind::NewTrade => self.handle_new_trade(details).await,
            AlertKind::Exit => self.handle_exit(details).await,
            AlertKind::Unrecognized => {
                tracing::info!(received_at = %alert.received_at, "Alert matched no known phrase; ignoring.");
                Ok(Outcome::Ignored)
            }
        }
    }

    async fn handle_new_trade(&self, details: AlertDetails) -> Result<Outcome> {
        let ticker = &self.settings.market_data_ticker;
        tracing::info!(
            provider = self.market_data.name(),
            %ticker,
            "New trade alert; fetching recent price samples."
        );

        let samples = self
            .market_data
            .recent_samples(ticker, self.settings.sample_count)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Market data fetch failed. Aborting trade.");
                Error::MarketData(e)
            })?;

        let required = self.strategy.min_samples();
        if samples.len() < required {
            tracing::error!(required, received = samples.len(), "Not enough price samples. Aborting trade.");
            return Err(Error::InsufficientData {
                required,
                received: samples.len(),
            });
        }

        let assessment = self.strategy.assess(&samples)?;
        tracing::info!(
            strategy = self.strategy.name(),
            close = assessment.close,
            ema = assessment.ema,
            signal = ?assessment.signal,
            "Strategy assessed."
        );

        let Some(action) = assessment.signal.action() else {
            tracing::info!("Close equals EMA; holding without dispatch.");
            return Ok(Outcome::Held { assessment });
        };

        let instruction = TradingInstruction::new(&self.settings.trading_ticker, action)
            .with_quantity(self.settings.entry_quantity())
            .with_price(details.price);
        let receipt = self.executor.execute(&instruction).await?;

        Ok(Outcome::Dispatched {
            instruction,
            receipt,
            assessment: Some(assessment),
        })
    }

    async fn handle_exit(&self, details: AlertDetails) -> Result<Outcome> {
        tracing::info!(ticker = %self.settings.trading_ticker, "Exit alert; flattening position.");

        // The exit flattens the whole position, so no quantity is sent.
        let instruction = TradingInstruction::new(&self.settings.trading_ticker, Action::Exit)
            .with_price(details.price);
        let receipt = self.executor.execute(&instruction).await?;

        Ok(Outcome::Dispatched {
            instruction,
            receipt,
            assessment: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use core_types::{PriceSample, Signal};
    use execution::DispatchReceipt;
    use mockall::mock;
    use mockall::predicate::eq;
    use strategies::{Assessment, EmaTrend};

    mock! {
        pub MarketData {}

        #[async_trait]
        impl MarketDataProvider for MarketData {
            fn name(&self) -> &'static str;
            async fn recent_samples(&self, ticker: &str, count: usize) -> api_client::Result<Vec<PriceSample>>;
        }
    }

    mock! {
        pub Exec {}

        #[async_trait]
        impl Executor for Exec {
            fn name(&self) -> &'static str;
            async fn execute(&self, instruction: &TradingInstruction) -> execution::Result<DispatchReceipt>;
        }
    }

    mock! {
        pub Trend {}

        impl Strategy for Trend {
            fn name(&self) -> &'static str;
            fn min_samples(&self) -> usize;
            fn assess(&self, samples: &[PriceSample]) -> strategies::Result<Assessment>;
        }
    }

    const TRADING_TICKER: &str = "MNQZ2025";
    const DATA_TICKER: &str = "I:NDX";

    fn settings() -> HandlerSettings {
        HandlerSettings {
            trading_ticker: TRADING_TICKER.into(),
            market_data_ticker: DATA_TICKER.into(),
            sample_count: 50,
            default_quantity: 1,
        }
    }

    fn samples(closes: &[f64]) -> Vec<PriceSample> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceSample {
                timestamp: i as i64 * 60_000,
                open: close,
                high: close,
                low: close,
                close,
                volume: 1.0,
            })
            .collect()
    }

    fn market_data_returning(closes: Vec<f64>) -> MockMarketData {
        let mut market_data = MockMarketData::new();
        market_data.expect_name().return_const("MockMarketData");
        market_data
            .expect_recent_samples()
            .with(eq(DATA_TICKER), eq(50usize))
            .times(1)
            .returning(move |_, _| Ok(samples(&closes)));
        market_data
    }

    fn no_market_data() -> MockMarketData {
        let mut market_data = MockMarketData::new();
        market_data.expect_name().return_const("MockMarketData");
        market_data.expect_recent_samples().never();
        market_data
    }

    fn executor_expecting(action: Action, times: usize) -> MockExec {
        let mut executor = MockExec::new();
        executor.expect_name().return_const("MockExec");
        executor
            .expect_execute()
            .withf(move |i| i.action == action && i.ticker == TRADING_TICKER)
            .times(times)
            .returning(|_| Ok(DispatchReceipt { executor: "MockExec", status: Some(200) }));
        executor
    }

    fn no_executor() -> MockExec {
        let mut executor = MockExec::new();
        executor.expect_name().return_const("MockExec");
        executor.expect_execute().never();
        executor
    }

    fn handler(market_data: MockMarketData, executor: MockExec) -> AlertHandler {
        AlertHandler::new(
            settings(),
            Arc::new(market_data),
            Arc::new(executor),
            Box::new(EmaTrend::default()),
        )
    }

    fn rising() -> Vec<f64> {
        (100..=113).map(f64::from).collect()
    }

    #[tokio::test]
    async fn close_above_ema_buys() {
        let handler = handler(market_data_returning(rising()), executor_expecting(Action::Buy, 1));

        let outcome = handler
            .handle(&Alert::new("MNQZ2025 New Trade Design , Price = 25787.50"))
            .await
            .unwrap();

        let Outcome::Dispatched { instruction, assessment, .. } = outcome else {
            panic!("expected a dispatch, got {outcome:?}");
        };
        assert_eq!(instruction.quantity, Some(1));
        assert_eq!(instruction.price, Some(25787.50));
        let assessment = assessment.unwrap();
        assert!((assessment.ema - 107.0).abs() < 1e-6);
        assert_eq!(assessment.close, 113.0);
    }

    #[tokio::test]
    async fn close_below_ema_sells() {
        let falling: Vec<f64> = (100..=113).rev().map(f64::from).collect();
        let handler = handler(market_data_returning(falling), executor_expecting(Action::Sell, 1));

        let outcome = handler.handle(&Alert::new("New Trade Design")).await.unwrap();

        assert_eq!(outcome.event(), "sell");
    }

    #[tokio::test]
    async fn close_on_ema_holds_without_dispatch() {
        let mut trend = MockTrend::new();
        trend.expect_name().return_const("MockTrend");
        trend.expect_min_samples().return_const(14usize);
        trend.expect_assess().times(1).returning(|_| {
            Ok(Assessment { signal: Signal::Hold, close: 106.0, ema: 106.0 })
        });
        let handler = AlertHandler::new(
            settings(),
            Arc::new(market_data_returning(rising())),
            Arc::new(no_executor()),
            Box::new(trend),
        );

        let outcome = handler.handle(&Alert::new("New Trade Design")).await.unwrap();

        assert!(matches!(outcome, Outcome::Held { .. }));
        assert_eq!(outcome.event(), "hold");
    }

    #[tokio::test]
    async fn exit_signal_dispatches_exit_without_fetching() {
        let handler = handler(no_market_data(), executor_expecting(Action::Exit, 1));

        let outcome = handler
            .handle(&Alert::new("MNQZ2025 Exit Signal,  Price = 25787.00"))
            .await
            .unwrap();

        let Outcome::Dispatched { instruction, assessment, .. } = outcome else {
            panic!("expected a dispatch, got {outcome:?}");
        };
        assert_eq!(instruction.quantity, None);
        assert_eq!(instruction.price, Some(25787.0));
        assert!(assessment.is_none());
    }

    #[tokio::test]
    async fn repeated_exit_alerts_dispatch_twice() {
        let handler = handler(no_market_data(), executor_expecting(Action::Exit, 2));
        let alert = Alert::new("Exit Signal");

        handler.handle(&alert).await.unwrap();
        handler.handle(&alert).await.unwrap();
    }

    #[tokio::test]
    async fn unrecognized_alert_is_ignored() {
        let handler = handler(no_market_data(), no_executor());

        for text in ["", "   ", "{not json", "Some other alert"] {
            let outcome = handler.handle(&Alert::new(text)).await.unwrap();
            assert_eq!(outcome, Outcome::Ignored);
        }
    }

    #[tokio::test]
    async fn too_few_samples_aborts_without_dispatch() {
        let closes: Vec<f64> = (100..113).map(f64::from).collect();
        let handler = handler(market_data_returning(closes), no_executor());

        let err = handler.handle(&Alert::new("New Trade Design")).await.unwrap_err();

        assert!(matches!(err, Error::InsufficientData { required: 14, received: 13 }));
    }

    #[tokio::test]
    async fn fetch_failure_aborts_without_dispatch() {
        let mut market_data = MockMarketData::new();
        market_data.expect_name().return_const("MockMarketData");
        market_data
            .expect_recent_samples()
            .times(1)
            .returning(|_, _| Err(api_client::Error::Timeout(std::time::Duration::from_secs(10))));
        let handler = handler(market_data, no_executor());

        let err = handler.handle(&Alert::new("New Trade Design")).await.unwrap_err();

        assert!(matches!(err, Error::MarketData(api_client::Error::Timeout(_))));
    }

    #[tokio::test]
    async fn dispatch_failure_is_reported() {
        let mut executor = MockExec::new();
        executor.expect_name().return_const("MockExec");
        executor.expect_execute().times(1).returning(|_| {
            Err(execution::Error::Rejected { status: 500, body: "down".into() })
        });
        let handler = handler(no_market_data(), executor);

        let err = handler.handle(&Alert::new("Exit Signal")).await.unwrap_err();

        assert!(matches!(err, Error::Dispatch(execution::Error::Rejected { status: 500, .. })));
    }

    #[tokio::test]
    async fn zero_default_quantity_omits_quantity() {
        let mut handler = handler(market_data_returning(rising()), executor_expecting(Action::Buy, 1));
        handler.settings.default_quantity = 0;

        let outcome = handler.handle(&Alert::new("New Trade Design")).await.unwrap();

        let Outcome::Dispatched { instruction, .. } = outcome else {
            panic!("expected a dispatch, got {outcome:?}");
        };
        assert_eq!(instruction.quantity, None);
        assert_eq!(instruction.price, None);
    }
}
