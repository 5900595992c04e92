//! Payment Storage
//!
//! Document-store abstraction for pending and processed payments. Pending
//! payments expire after a time-to-live; processed payments are kept.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::payment::{PaymentId, PendingPayment, ProcessedPayment};

/// Default lifetime of a pending payment (one hour)
pub const DEFAULT_PENDING_TTL_SECS: i64 = 60 * 60;

/// Payment storage trait
///
/// Implement this for each backend. The in-memory store is used for
/// development and tests.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Store a newly registered payment
    async fn insert_pending(&self, payment: PendingPayment) -> Result<PaymentId>;

    /// Look up a pending payment; expired records are reported as absent
    async fn find_pending(&self, id: &PaymentId) -> Result<Option<PendingPayment>>;

    /// Store a payment that passed the checksum
    async fn insert_processed(&self, payment: ProcessedPayment) -> Result<PaymentId>;

    /// Look up a processed payment
    async fn find_processed(&self, id: &PaymentId) -> Result<Option<ProcessedPayment>>;

    /// All processed payments, oldest first
    async fn list_processed(&self) -> Result<Vec<ProcessedPayment>>;

    /// Drop expired pending payments, returning how many were removed
    async fn purge_expired(&self) -> Result<usize>;

    /// Lifetime applied to pending payments
    fn pending_ttl(&self) -> Duration;
}

/// In-memory payment store (for development)
pub struct MemoryPaymentStore {
    pending: RwLock<HashMap<PaymentId, PendingPayment>>,
    processed: RwLock<HashMap<PaymentId, ProcessedPayment>>,
    ttl: Duration,
}

impl Default for MemoryPaymentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPaymentStore {
    pub fn new() -> Self {
        Self::with_ttl(Duration::seconds(DEFAULT_PENDING_TTL_SECS))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            pending: RwLock::new(HashMap::new()),
            processed: RwLock::new(HashMap::new()),
            ttl,
        }
    }
}

#[async_trait]
impl PaymentStore for MemoryPaymentStore {
    async fn insert_pending(&self, payment: PendingPayment) -> Result<PaymentId> {
        let id = payment.id.clone();
        self.pending.write().await.insert(id.clone(), payment);
        Ok(id)
    }

    async fn find_pending(&self, id: &PaymentId) -> Result<Option<PendingPayment>> {
        let pending = self.pending.read().await;
        let now = Utc::now();

        Ok(pending
            .get(id)
            .filter(|payment| !payment.is_expired(self.ttl, now))
            .cloned())
    }

    async fn insert_processed(&self, payment: ProcessedPayment) -> Result<PaymentId> {
        let id = payment.id.clone();
        self.processed.write().await.insert(id.clone(), payment);
        Ok(id)
    }

    async fn find_processed(&self, id: &PaymentId) -> Result<Option<ProcessedPayment>> {
        Ok(self.processed.read().await.get(id).cloned())
    }

    async fn list_processed(&self) -> Result<Vec<ProcessedPayment>> {
        let processed = self.processed.read().await;
        let mut payments: Vec<_> = processed.values().cloned().collect();
        payments.sort_by(|a, b| {
            a.processed_at
                .cmp(&b.processed_at)
                .then_with(|| a.id.as_str().cmp(b.id.as_str()))
        });
        Ok(payments)
    }

    async fn purge_expired(&self) -> Result<usize> {
        let mut pending = self.pending.write().await;
        let now = Utc::now();
        let before = pending.len();

        pending.retain(|_, payment| !payment.is_expired(self.ttl, now));

        let removed = before - pending.len();
        if removed > 0 {
            tracing::debug!(removed, remaining = pending.len(), "Purged expired pending payments");
        }
        Ok(removed)
    }

    fn pending_ttl(&self) -> Duration {
        self.ttl
    }
}
