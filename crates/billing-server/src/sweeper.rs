//! Expiry Sweeper
//!
//! Background task removing pending payments whose time-to-live has passed.

use std::sync::Arc;
use std::time::Duration;

use billing_core::PaymentStore;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Spawn the sweeper; it runs until the returned handle is aborted
pub fn spawn_expiry_sweeper(store: Arc<dyn PaymentStore>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            match store.purge_expired().await {
                Ok(0) => {}
                Ok(removed) => tracing::info!(removed, "Expired pending payments removed"),
                Err(e) => tracing::warn!("Expiry sweep failed: {}", e),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use billing_core::{MemoryPaymentStore, PendingPayment};
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_sweeper_purges_expired() {
        let store = Arc::new(MemoryPaymentStore::with_ttl(chrono::Duration::zero()));
        store
            .insert_pending(PendingPayment::new(Decimal::ONE, "Gone soon"))
            .await
            .unwrap();

        let handle = spawn_expiry_sweeper(store.clone(), Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.abort();

        assert_eq!(store.purge_expired().await.unwrap(), 0);
    }
}
