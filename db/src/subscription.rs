use std::sync::Arc;

use async_trait::async_trait;
use common::error::{AppError, Res};
use sqlx::{Executor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    dtos::subscription::SubscriptionWrite,
    filter::SubscriptionFilter,
    models::subscription::Subscription,
    store::{SubscriptionStore, page_bounds},
};

pub async fn insert_subscription<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    id: Uuid,
    data: SubscriptionWrite,
) -> Res<Subscription> {
    sqlx::query_as::<_, Subscription>(
        r#"
        INSERT INTO subscriptions (id, service_name, price, user_id, start_date, end_date, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, now())
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(data.service_name)
    .bind(data.price)
    .bind(data.user_id)
    .bind(data.start_date)
    .bind(data.end_date)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn get_subscription_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    id: Uuid,
) -> Res<Subscription> {
    sqlx::query_as::<_, Subscription>("SELECT * FROM subscriptions WHERE id = $1")
        .bind(id)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("subscription {}", id)))
}

pub async fn update_subscription<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    id: Uuid,
    data: SubscriptionWrite,
) -> Res<Subscription> {
    sqlx::query_as::<_, Subscription>(
        r#"
        UPDATE subscriptions
        SET service_name = $1, price = $2, user_id = $3, start_date = $4, end_date = $5
        WHERE id = $6
        RETURNING *
        "#,
    )
    .bind(data.service_name)
    .bind(data.price)
    .bind(data.user_id)
    .bind(data.start_date)
    .bind(data.end_date)
    .bind(id)
    .fetch_optional(executor)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("subscription {}", id)))
}

/// Returns the number of deleted rows, zero for an unknown id.
pub async fn delete_subscription<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    id: Uuid,
) -> Res<u64> {
    let result = sqlx::query("DELETE FROM subscriptions WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}

pub async fn list_subscriptions<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    limit: i64,
    offset: i64,
    filter: &SubscriptionFilter,
) -> Res<Vec<Subscription>> {
    let mut qb = list_query(limit, offset, filter);

    qb.build_query_as::<Subscription>()
        .fetch_all(executor)
        .await
        .map_err(AppError::from)
}

pub async fn sum_subscription_prices<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    period_from: &str,
    period_to: &str,
    filter: &SubscriptionFilter,
) -> Res<i64> {
    let mut qb = summary_query(period_from, period_to, filter);

    qb.build_query_scalar::<i64>()
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}

fn list_query(limit: i64, offset: i64, filter: &SubscriptionFilter) -> QueryBuilder<'static, Postgres> {
    let (limit, offset) = page_bounds(limit, offset);

    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM subscriptions");
    filter.push_where(&mut qb);
    qb.push(" ORDER BY created_at DESC LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);
    qb
}

fn summary_query(
    period_from: &str,
    period_to: &str,
    filter: &SubscriptionFilter,
) -> QueryBuilder<'static, Postgres> {
    // SUM over INTEGER yields BIGINT, NULL when no row matches
    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
        "SELECT COALESCE(SUM(price), 0)::BIGINT FROM subscriptions WHERE start_date >= ",
    );
    qb.push_bind(period_from.to_string())
        .push(" AND (end_date <= ")
        .push_bind(period_to.to_string())
        .push(" OR end_date IS NULL)");
    filter.push_and(&mut qb);
    qb
}

/// [`SubscriptionStore`] backed by a shared Postgres pool.
#[derive(Clone)]
pub struct PgSubscriptionStore {
    pool: Arc<PgPool>,
}

impl PgSubscriptionStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionStore for PgSubscriptionStore {
    async fn create(&self, id: Uuid, data: SubscriptionWrite) -> Res<Subscription> {
        let sub = insert_subscription(&*self.pool, id, data).await?;
        log::debug!("Created subscription {} for user {}", sub.id, sub.user_id);
        Ok(sub)
    }

    async fn get(&self, id: Uuid) -> Res<Subscription> {
        get_subscription_by_id(&*self.pool, id).await
    }

    async fn update(&self, id: Uuid, data: SubscriptionWrite) -> Res<Subscription> {
        let result = update_subscription(&*self.pool, id, data).await;
        if let Err(AppError::NotFound(_)) = &result {
            log::warn!("Update of unknown subscription {}", id);
        }
        result
    }

    async fn delete(&self, id: Uuid) -> Res<()> {
        let deleted = delete_subscription(&*self.pool, id).await?;
        log::debug!("Deleted subscription {} ({} rows)", id, deleted);
        Ok(())
    }

    async fn list(
        &self,
        limit: i64,
        offset: i64,
        filter: SubscriptionFilter,
    ) -> Res<Vec<Subscription>> {
        list_subscriptions(&*self.pool, limit, offset, &filter).await
    }

    async fn summary(
        &self,
        period_from: &str,
        period_to: &str,
        filter: SubscriptionFilter,
    ) -> Res<i64> {
        sum_subscription_prices(&*self.pool, period_from, period_to, &filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_without_filters() {
        let qb = list_query(0, 0, &SubscriptionFilter::default());
        assert_eq!(
            qb.sql(),
            "SELECT * FROM subscriptions ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        );
    }

    #[test]
    fn list_query_binds_filters_before_paging() {
        let filter = SubscriptionFilter {
            user_id: Some(Uuid::new_v4()),
            service_name: Some("Plan A".to_string()),
        };
        let qb = list_query(5, 10, &filter);
        assert_eq!(
            qb.sql(),
            "SELECT * FROM subscriptions WHERE user_id = $1 AND service_name = $2 \
             ORDER BY created_at DESC LIMIT $3 OFFSET $4"
        );
    }

    #[test]
    fn summary_query_is_null_safe() {
        let qb = summary_query("01-2025", "12-2025", &SubscriptionFilter::default());
        assert_eq!(
            qb.sql(),
            "SELECT COALESCE(SUM(price), 0)::BIGINT FROM subscriptions WHERE start_date >= $1 \
             AND (end_date <= $2 OR end_date IS NULL)"
        );
    }

    #[test]
    fn summary_query_appends_filters() {
        let filter = SubscriptionFilter {
            user_id: None,
            service_name: Some("Plan A".to_string()),
        };
        let qb = summary_query("01-2025", "12-2025", &filter);
        assert!(qb.sql().ends_with("OR end_date IS NULL) AND service_name = $3"));
    }
}
