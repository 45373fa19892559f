//! End-to-end batch execution tests: simulate a ladder, run it through the
//! batch engine against exchange doubles.

use async_trait::async_trait;
use chrono::Utc;
use dca_ladder::batch::{
    BatchEngine, BatchEvent, BatchOutcome, BatchRequest, LevelFailureKind,
};
use dca_ladder::exchange::{
    ExchangeClient, MarginMode, MarketEnvironment, OrderConfirmation, OrderError, OrderIntent,
    PaperExchange,
};
use dca_ladder::simulation::{simulate, SimulationInput};
use rust_decimal_macros::dec;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn known_ladder() -> Vec<dca_ladder::simulation::PriceLevel> {
    let result = simulate(&SimulationInput {
        balance: dec!(1000),
        entry_price: dec!(40),
        floor_price: dec!(4),
        drop_percent: dec!(50),
    })
    .unwrap();
    result.levels
}

fn request(levels: Vec<dca_ladder::simulation::PriceLevel>) -> BatchRequest {
    BatchRequest {
        symbol: "BTC/USDT".to_string(),
        environment: MarketEnvironment::Spot,
        margin_mode: MarginMode::Isolated,
        leverage: 1,
        levels,
    }
}

#[tokio::test]
async fn test_simulated_ladder_executes_on_paper_exchange() {
    let exchange = Arc::new(PaperExchange::new());
    let engine = BatchEngine::new(exchange.clone()).with_pacing(Duration::ZERO);

    let mut run = engine.start(request(known_ladder())).unwrap();

    let mut successes = 0;
    let mut terminal = None;
    while let Some(event) = run.events.recv().await {
        match event {
            BatchEvent::Level(level) => {
                assert!(level.outcome.is_ok());
                successes += 1;
            }
            BatchEvent::Finished { outcome, summary } => {
                assert!(summary.contains("5 order(s)"));
                terminal = Some(outcome);
            }
        }
    }

    assert_eq!(successes, 5);
    assert_eq!(terminal, Some(BatchOutcome::Completed { placed: 5 }));

    // All five LIMIT orders rest on the paper book.
    let open = exchange.open_orders().await;
    assert_eq!(open.len(), 5);
    assert_eq!(open[0].price, dec!(40));
    assert_eq!(open[4].price, dec!(2.5));
}

/// Fails every placement after the first two, recording cancellations.
struct FailingExchange {
    placements: AtomicUsize,
    cancellations: Mutex<Vec<String>>,
}

#[async_trait]
impl ExchangeClient for FailingExchange {
    async fn place_order(&self, intent: &OrderIntent) -> Result<OrderConfirmation, OrderError> {
        let n = self.placements.fetch_add(1, Ordering::SeqCst) + 1;
        if n > 2 {
            return Err(OrderError::Network("connection reset".into()));
        }
        Ok(OrderConfirmation {
            order_id: format!("order-{}", n),
            symbol: intent.symbol.clone(),
            price: intent.price,
            quantity: intent.quantity,
            status: "open".to_string(),
            timestamp: Utc::now(),
        })
    }

    async fn cancel_order(&self, order_id: &str, _symbol: &str) -> Result<(), OrderError> {
        self.cancellations.lock().unwrap().push(order_id.to_string());
        Ok(())
    }

    async fn set_margin_mode(&self, _mode: MarginMode, _symbol: &str) -> Result<(), OrderError> {
        Ok(())
    }

    async fn set_leverage(&self, _leverage: u32, _symbol: &str) -> Result<(), OrderError> {
        Ok(())
    }
}

#[tokio::test]
async fn test_mid_batch_failure_restores_pre_batch_state() {
    let exchange = Arc::new(FailingExchange {
        placements: AtomicUsize::new(0),
        cancellations: Mutex::new(Vec::new()),
    });
    let engine = BatchEngine::new(exchange.clone()).with_pacing(Duration::ZERO);

    let mut run = engine.start(request(known_ladder())).unwrap();

    let mut level_events = Vec::new();
    let mut terminal = None;
    while let Some(event) = run.events.recv().await {
        match event {
            BatchEvent::Level(level) => level_events.push(level),
            BatchEvent::Finished { outcome, .. } => terminal = Some(outcome),
        }
    }

    match terminal.unwrap() {
        BatchOutcome::RolledBack {
            failed_level,
            reason,
        } => {
            assert_eq!(failed_level, 3);
            assert_eq!(reason.kind, LevelFailureKind::Network);
        }
        other => panic!("expected RolledBack, got {:?}", other),
    }

    // Both placed orders were cancelled; levels 4 and 5 never attempted.
    assert_eq!(
        exchange.cancellations.lock().unwrap().clone(),
        vec!["order-1", "order-2"]
    );
    assert_eq!(exchange.placements.load(Ordering::SeqCst), 3);
    assert_eq!(level_events.len(), 3);
}
