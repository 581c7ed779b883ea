// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bootstrap decision: is the account population still empty?
//!
//! The answer is read fresh on every bootstrap-sensitive request. It is a
//! hint for the gate only; the account insert re-checks emptiness inside
//! its own write transaction (see [`Database::create_first_account`]).
//!
//! [`Database::create_first_account`]: crate::storage::Database::create_first_account

use std::sync::Arc;

use super::AuthError;
use crate::storage::StoreResult;

/// Source of the top-level account count.
pub trait AccountCensus: Send + Sync + 'static {
    fn count_accounts(&self) -> StoreResult<u64>;
}

#[derive(Clone)]
pub struct BootstrapPolicy {
    census: Arc<dyn AccountCensus>,
}

impl BootstrapPolicy {
    pub fn new(census: Arc<dyn AccountCensus>) -> Self {
        Self { census }
    }

    /// Whether no top-level account exists yet.
    ///
    /// The count runs on the blocking pool. A failure is reported as
    /// [`AuthError::StoreUnavailable`] and never counts as empty.
    pub async fn is_population_empty(&self) -> Result<bool, AuthError> {
        let census = Arc::clone(&self.census);
        let count = tokio::task::spawn_blocking(move || census.count_accounts())
            .await
            .map_err(|e| AuthError::StoreUnavailable(format!("census task failed: {e}")))?
            .map_err(|e| AuthError::StoreUnavailable(e.to_string()))?;
        Ok(count == 0)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::storage::StoreError;
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Census with a settable count.
    #[derive(Default)]
    pub(crate) struct FixedCensus(pub AtomicU64);

    impl AccountCensus for FixedCensus {
        fn count_accounts(&self) -> StoreResult<u64> {
            Ok(self.0.load(Ordering::SeqCst))
        }
    }

    /// Census whose store is unreachable.
    pub(crate) struct BrokenCensus;

    impl AccountCensus for BrokenCensus {
        fn count_accounts(&self) -> StoreResult<u64> {
            Err(StoreError::Io(std::io::Error::other("disk unavailable")))
        }
    }

    #[tokio::test]
    async fn empty_population() {
        let policy = BootstrapPolicy::new(Arc::new(FixedCensus::default()));
        assert!(policy.is_population_empty().await.unwrap());
    }

    #[tokio::test]
    async fn populated_store_is_not_empty() {
        let census = Arc::new(FixedCensus::default());
        census.0.store(1, Ordering::SeqCst);
        let policy = BootstrapPolicy::new(census);

        assert!(!policy.is_population_empty().await.unwrap());
    }

    #[tokio::test]
    async fn store_error_is_reported() {
        let policy = BootstrapPolicy::new(Arc::new(BrokenCensus));
        let err = policy.is_population_empty().await.unwrap_err();
        assert!(matches!(err, AuthError::StoreUnavailable(ref detail) if detail.contains("disk unavailable")));
    }
}
