use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime, Utc};
use common::error::{AppError, Res};
use db::{
    SubscriptionStore,
    dtos::subscription::SubscriptionWrite,
    filter::SubscriptionFilter,
    models::subscription::Subscription,
    store::page_bounds,
};
use uuid::Uuid;

/// Summary period rule of the Postgres backend: markers compare as plain
/// strings and open-ended records count whatever `period_to` is.
fn in_period(sub: &Subscription, period_from: &str, period_to: &str) -> bool {
    sub.start_date.as_str() >= period_from
        && sub
            .end_date
            .as_deref()
            .is_none_or(|end_date| end_date <= period_to)
}

/// In-memory [`SubscriptionStore`] with the same ordering, filtering and
/// summary rules as the Postgres backend.
pub struct MemoryStore {
    rows: Mutex<Vec<Subscription>>,
    epoch: NaiveDateTime,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            epoch: Utc::now().naive_utc(),
        }
    }

    fn matches(sub: &Subscription, filter: &SubscriptionFilter) -> bool {
        filter.user_id.is_none_or(|user_id| sub.user_id == user_id)
            && filter
                .service_name
                .as_deref()
                .is_none_or(|name| sub.service_name == name)
    }
}

#[async_trait]
impl SubscriptionStore for MemoryStore {
    async fn create(&self, id: Uuid, data: SubscriptionWrite) -> Res<Subscription> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|sub| sub.id == id) {
            return Err(AppError::Database(sqlx::Error::Protocol(format!(
                "duplicate id {}",
                id
            ))));
        }
        // strictly increasing so ordering by created_at is deterministic
        let created_at = self.epoch + Duration::milliseconds(rows.len() as i64);
        let sub = Subscription {
            id,
            service_name: data.service_name,
            price: data.price,
            user_id: data.user_id,
            start_date: data.start_date,
            end_date: data.end_date,
            created_at,
        };
        rows.push(sub.clone());
        Ok(sub)
    }

    async fn get(&self, id: Uuid) -> Res<Subscription> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|sub| sub.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("subscription {}", id)))
    }

    async fn update(&self, id: Uuid, data: SubscriptionWrite) -> Res<Subscription> {
        let mut rows = self.rows.lock().unwrap();
        let sub = rows
            .iter_mut()
            .find(|sub| sub.id == id)
            .ok_or_else(|| AppError::NotFound(format!("subscription {}", id)))?;
        sub.service_name = data.service_name;
        sub.price = data.price;
        sub.user_id = data.user_id;
        sub.start_date = data.start_date;
        sub.end_date = data.end_date;
        Ok(sub.clone())
    }

    async fn delete(&self, id: Uuid) -> Res<()> {
        self.rows.lock().unwrap().retain(|sub| sub.id != id);
        Ok(())
    }

    async fn list(
        &self,
        limit: i64,
        offset: i64,
        filter: SubscriptionFilter,
    ) -> Res<Vec<Subscription>> {
        let (limit, offset) = page_bounds(limit, offset);
        let mut subs: Vec<Subscription> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|sub| Self::matches(sub, &filter))
            .cloned()
            .collect();
        subs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(subs
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn summary(
        &self,
        period_from: &str,
        period_to: &str,
        filter: SubscriptionFilter,
    ) -> Res<i64> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|sub| Self::matches(sub, &filter))
            .filter(|sub| in_period(sub, period_from, period_to))
            .map(|sub| i64::from(sub.price))
            .sum())
    }
}

/// Store whose every call fails the way a lost database connection does.
pub struct FailingStore;

#[async_trait]
impl SubscriptionStore for FailingStore {
    async fn create(&self, _id: Uuid, _data: SubscriptionWrite) -> Res<Subscription> {
        Err(AppError::Database(sqlx::Error::PoolClosed))
    }

    async fn get(&self, _id: Uuid) -> Res<Subscription> {
        Err(AppError::Database(sqlx::Error::PoolClosed))
    }

    async fn update(&self, _id: Uuid, _data: SubscriptionWrite) -> Res<Subscription> {
        Err(AppError::Database(sqlx::Error::PoolClosed))
    }

    async fn delete(&self, _id: Uuid) -> Res<()> {
        Err(AppError::Database(sqlx::Error::PoolClosed))
    }

    async fn list(
        &self,
        _limit: i64,
        _offset: i64,
        _filter: SubscriptionFilter,
    ) -> Res<Vec<Subscription>> {
        Err(AppError::Database(sqlx::Error::PoolClosed))
    }

    async fn summary(
        &self,
        _period_from: &str,
        _period_to: &str,
        _filter: SubscriptionFilter,
    ) -> Res<i64> {
        Err(AppError::Database(sqlx::Error::PoolClosed))
    }
}
