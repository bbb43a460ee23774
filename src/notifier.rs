use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    CustomerAdded,
    CustomerDeleted,
    PurchaseAdded,
    PurchaseUpdated,
    PurchaseDeleted,
    ReceiptAdded,
    ReceiptUpdated,
    ReceiptDeleted,
    LoginAttempt,
}

/// Structured event handed to the notification sink after a commit.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerEvent {
    pub kind: EventKind,
    /// Who performed the mutation (token subject).
    pub actor: String,
    /// Display name of the affected customer, when one is involved.
    pub customer: String,
    pub details: Value,
    /// Display-formatted instant of the mutation.
    pub occurred_at: String,
}

/// Notification sink. Implementations must not block the caller for long;
/// a slow delivery channel should hand the event off internally. Delivery is
/// best-effort: errors are logged by `dispatch` and never surface to clients.
pub trait Notifier: Send + Sync {
    fn notify(&self, event: LedgerEvent) -> anyhow::Result<()>;
}

/// Default sink: structured log line per event.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, event: LedgerEvent) -> anyhow::Result<()> {
        tracing::info!(
            kind = ?event.kind,
            actor = %event.actor,
            customer = %event.customer,
            occurred_at = %event.occurred_at,
            details = %event.details,
            "ledger event"
        );
        Ok(())
    }
}

/// Sink that keeps every event in memory; used by tests to assert emissions.
#[derive(Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<LedgerEvent>>,
}

impl RecordingNotifier {
    pub fn events(&self) -> Vec<LedgerEvent> {
        self.events.lock().expect("notifier lock poisoned").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, event: LedgerEvent) -> anyhow::Result<()> {
        self.events
            .lock()
            .map_err(|_| anyhow::anyhow!("notifier lock poisoned"))?
            .push(event);
        Ok(())
    }
}

/// Emit an event after a committed mutation. Failures are logged and
/// swallowed; a broken sink must never roll back or fail the request.
pub fn dispatch(notifier: &Arc<dyn Notifier>, event: LedgerEvent) {
    let kind = event.kind;
    if let Err(err) = notifier.notify(event) {
        tracing::warn!(error = %err, kind = ?kind, "notifier delivery failed");
    }
}
