use async_trait::async_trait;
use common::error::Res;
use uuid::Uuid;

use crate::{
    dtos::subscription::SubscriptionWrite, filter::SubscriptionFilter,
    models::subscription::Subscription,
};

/// Page size used when the caller asks for no limit or a non-positive one.
pub const DEFAULT_LIST_LIMIT: i64 = 10;

/// Data access contract for subscription records.
///
/// Every method is a single statement against the backing store; there is
/// no cross-call transaction.
#[async_trait]
pub trait SubscriptionStore: Send + Sync + 'static {
    /// Inserts a record under an id the caller already generated.
    async fn create(&self, id: Uuid, data: SubscriptionWrite) -> Res<Subscription>;

    /// Returns `AppError::NotFound` when no record has this id.
    async fn get(&self, id: Uuid) -> Res<Subscription>;

    /// Replaces every mutable field, keeping `id` and `created_at`.
    /// Returns `AppError::NotFound` when no record has this id.
    async fn update(&self, id: Uuid, data: SubscriptionWrite) -> Res<Subscription>;

    /// Hard delete. Deleting an unknown id succeeds.
    async fn delete(&self, id: Uuid) -> Res<()>;

    /// Newest first (`created_at` descending), filtered, then paged.
    async fn list(
        &self,
        limit: i64,
        offset: i64,
        filter: SubscriptionFilter,
    ) -> Res<Vec<Subscription>>;

    /// Sum of `price` over records with `start_date >= period_from` whose
    /// `end_date` is either `<= period_to` or absent. Zero when nothing matches.
    async fn summary(
        &self,
        period_from: &str,
        period_to: &str,
        filter: SubscriptionFilter,
    ) -> Res<i64>;
}

/// Clamps caller supplied paging values: a non-positive limit becomes
/// [`DEFAULT_LIST_LIMIT`], a negative offset becomes zero.
pub fn page_bounds(limit: i64, offset: i64) -> (i64, i64) {
    let limit = if limit <= 0 { DEFAULT_LIST_LIMIT } else { limit };
    (limit, offset.max(0))
}
