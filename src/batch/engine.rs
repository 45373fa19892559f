//! Batch execution engine
//!
//! One tokio task per run; progress streamed over an mpsc channel; a
//! cooperative cancellation flag is checked between levels so no request
//! is ever issued twice.

use super::{
    BatchError, BatchEvent, BatchOutcome, BatchRequest, LevelEvent, LevelFailure, OrderRecord,
};
use crate::exchange::{ExchangeClient, OrderError, OrderIntent, OrderSide, OrderType};
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Default inter-level pacing. Backpressure against exchange-side rate
/// limiting; tune it, never remove it outright.
const DEFAULT_PACING: Duration = Duration::from_millis(200);

/// Default capacity of the event channel
const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Caller-side control for a running batch
#[derive(Clone, Debug)]
pub struct BatchHandle {
    cancelled: Arc<AtomicBool>,
}

impl BatchHandle {
    /// Request cooperative cancellation. Takes effect between levels: the
    /// run stops submitting, rolls back, and finishes with
    /// [`BatchOutcome::Cancelled`].
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// A started batch: the event stream plus its cancellation handle
#[derive(Debug)]
pub struct BatchRun {
    /// Per-level events followed by exactly one terminal event
    pub events: mpsc::Receiver<BatchEvent>,
    /// Handle for cooperative cancellation
    pub handle: BatchHandle,
}

/// Submits ladders as sequential LIMIT BUY orders with all-or-nothing
/// rollback. At most one batch runs per engine instance.
pub struct BatchEngine {
    client: Arc<dyn ExchangeClient>,
    pacing: Duration,
    channel_capacity: usize,
    active: Arc<AtomicBool>,
}

impl BatchEngine {
    /// Create an engine over the given exchange client
    pub fn new(client: Arc<dyn ExchangeClient>) -> Self {
        Self {
            client,
            pacing: DEFAULT_PACING,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            active: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Override the inter-level pacing delay
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Start a batch on a background task.
    ///
    /// Rejects with [`BatchError::AlreadyRunning`] while a previous run is
    /// still active; a second batch is never queued.
    pub fn start(&self, request: BatchRequest) -> Result<BatchRun, BatchError> {
        if self.active.swap(true, Ordering::SeqCst) {
            return Err(BatchError::AlreadyRunning);
        }

        let (tx, rx) = mpsc::channel(self.channel_capacity);
        let cancelled = Arc::new(AtomicBool::new(false));
        let handle = BatchHandle {
            cancelled: cancelled.clone(),
        };

        let worker = BatchWorker {
            client: self.client.clone(),
            pacing: self.pacing,
            request,
            events: tx,
            cancelled,
            _active: ActiveGuard(self.active.clone()),
        };
        tokio::spawn(worker.run());

        Ok(BatchRun { events: rx, handle })
    }
}

/// Clears the engine's active flag when the run task exits, panics included
struct ActiveGuard(Arc<AtomicBool>);

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// State owned by one batch run
struct BatchWorker {
    client: Arc<dyn ExchangeClient>,
    pacing: Duration,
    request: BatchRequest,
    events: mpsc::Sender<BatchEvent>,
    cancelled: Arc<AtomicBool>,
    _active: ActiveGuard,
}

impl BatchWorker {
    async fn run(mut self) {
        let outcome = self.execute().await;
        let summary = self.summarize(&outcome);
        tracing::info!(?outcome, "Batch finished");

        // The single-flight slot must already be free when the terminal
        // event is delivered.
        drop(self._active);

        let _ = self
            .events
            .send(BatchEvent::Finished { outcome, summary })
            .await;
    }

    async fn execute(&mut self) -> BatchOutcome {
        let levels = std::mem::take(&mut self.request.levels);
        if levels.is_empty() {
            return BatchOutcome::Completed { placed: 0 };
        }

        if self.request.environment.is_futures() {
            if let Err(err) = self.preflight().await {
                tracing::error!(%err, "Margin/leverage pre-flight failed, batch aborted");
                // Nothing has been placed yet, so there is nothing to roll
                // back; level 0 marks the pre-flight step.
                return BatchOutcome::RolledBack {
                    failed_level: 0,
                    reason: LevelFailure::from(&err),
                };
            }
        }

        let total = levels.len();
        let mut placed: Vec<OrderRecord> = Vec::new();

        for (i, level) in levels.iter().enumerate() {
            if self.cancelled.load(Ordering::SeqCst) {
                tracing::info!(after_level = i, "Batch cancelled by user");
                self.rollback(&placed).await;
                return BatchOutcome::Cancelled;
            }

            if level.price <= Decimal::ZERO || level.quantity <= Decimal::ZERO {
                // Data problem local to this level; report it and move on.
                self.emit_level(LevelEvent {
                    level_index: level.index,
                    symbol: self.request.symbol.clone(),
                    outcome: Err(LevelFailure::invalid_level_data(
                        "Price and quantity must be positive",
                    )),
                })
                .await;
                continue;
            }

            let intent = OrderIntent {
                symbol: self.request.symbol.clone(),
                side: OrderSide::Buy,
                order_type: OrderType::Limit,
                price: level.price,
                quantity: level.quantity,
            };

            match self.client.place_order(&intent).await {
                Ok(confirmation) => {
                    tracing::info!(
                        level = level.index,
                        order_id = %confirmation.order_id,
                        price = %level.price,
                        "Level order placed"
                    );
                    placed.push(OrderRecord {
                        level_index: level.index,
                        intent,
                        order_id: confirmation.order_id.clone(),
                        status: confirmation.status.clone(),
                    });
                    self.emit_level(LevelEvent {
                        level_index: level.index,
                        symbol: self.request.symbol.clone(),
                        outcome: Ok(confirmation),
                    })
                    .await;

                    if i < total - 1 {
                        tokio::time::sleep(self.pacing).await;
                    }
                }
                Err(err) => {
                    tracing::error!(level = level.index, %err, "Level order failed, rolling back");
                    let failure = LevelFailure::from(&err);
                    self.emit_level(LevelEvent {
                        level_index: level.index,
                        symbol: self.request.symbol.clone(),
                        outcome: Err(failure.clone()),
                    })
                    .await;
                    self.rollback(&placed).await;
                    return BatchOutcome::RolledBack {
                        failed_level: level.index,
                        reason: failure,
                    };
                }
            }
        }

        BatchOutcome::Completed {
            placed: placed.len(),
        }
    }

    /// Margin mode and leverage are applied once per batch, before the
    /// first order.
    async fn preflight(&self) -> Result<(), OrderError> {
        self.client
            .set_margin_mode(self.request.margin_mode, &self.request.symbol)
            .await?;
        self.client
            .set_leverage(self.request.leverage, &self.request.symbol)
            .await?;
        Ok(())
    }

    /// Best-effort compensating cancellation of every placed order.
    /// Failures are logged and swallowed; the remote exchange is outside
    /// our control.
    async fn rollback(&self, placed: &[OrderRecord]) {
        if placed.is_empty() {
            return;
        }
        tracing::warn!(count = placed.len(), "Cancelling previously placed orders");
        for record in placed {
            if let Err(err) = self
                .client
                .cancel_order(&record.order_id, &record.intent.symbol)
                .await
            {
                tracing::warn!(
                    order_id = %record.order_id,
                    level = record.level_index,
                    %err,
                    "Cancellation failed during rollback"
                );
            }
        }
    }

    async fn emit_level(&self, event: LevelEvent) {
        if self
            .events
            .send(BatchEvent::Level(event))
            .await
            .is_err()
        {
            tracing::debug!("Batch event receiver dropped");
        }
    }

    fn summarize(&self, outcome: &BatchOutcome) -> String {
        match outcome {
            BatchOutcome::Completed { placed } => {
                format!("DCA batch completed: {} order(s) placed.", placed)
            }
            BatchOutcome::RolledBack {
                failed_level: 0,
                reason,
            } => format!(
                "Margin/leverage setup failed before any order was placed: {}",
                reason.message
            ),
            BatchOutcome::RolledBack {
                failed_level,
                reason,
            } => format!(
                "Order placement failed at level {}: {}. \
                 All previously placed orders were cancelled (best-effort).",
                failed_level, reason.message
            ),
            BatchOutcome::Cancelled => "DCA batch cancelled by user. \
                 All previously placed orders were cancelled (best-effort)."
                .to_string(),
        }
    }
}
