use common::error::{AppError, Res};
use db::{
    SubscriptionStore, filter::SubscriptionFilter, models::subscription::Subscription,
    store::DEFAULT_LIST_LIMIT,
};
use uuid::Uuid;

use crate::dtos::sub::{ListQuery, SubscriptionRequest, SummaryQuery};

/// Paging and filters extracted from a list query.
#[derive(Debug, PartialEq)]
pub(crate) struct ListParams {
    pub limit: i64,
    pub offset: i64,
    pub filter: SubscriptionFilter,
}

/// Parses a path id into a UUID.
pub(crate) fn parse_id(raw: &str) -> Res<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest("invalid id".to_string()))
}

/// Builds the optional filters. A malformed `user_id` and an empty
/// `service_name` are treated as absent.
fn parse_filter(user_id: Option<&str>, service_name: Option<&str>) -> SubscriptionFilter {
    SubscriptionFilter {
        user_id: user_id.and_then(|raw| Uuid::parse_str(raw).ok()),
        service_name: service_name
            .filter(|name| !name.is_empty())
            .map(str::to_string),
    }
}

pub(crate) fn list_params(query: &ListQuery) -> ListParams {
    let limit = query
        .limit
        .as_deref()
        .and_then(|raw| raw.parse::<i64>().ok())
        .filter(|limit| *limit > 0)
        .unwrap_or(DEFAULT_LIST_LIMIT);
    let offset = query
        .offset
        .as_deref()
        .and_then(|raw| raw.parse::<i64>().ok())
        .filter(|offset| *offset > 0)
        .unwrap_or(0);

    ListParams {
        limit,
        offset,
        filter: parse_filter(query.user_id.as_deref(), query.service_name.as_deref()),
    }
}

/// Returns `(period_from, period_to, filter)`; both periods are required.
pub(crate) fn summary_params(query: &SummaryQuery) -> Res<(String, String, SubscriptionFilter)> {
    let period_from = query.period_from.as_deref().filter(|p| !p.is_empty());
    let period_to = query.period_to.as_deref().filter(|p| !p.is_empty());

    match (period_from, period_to) {
        (Some(from), Some(to)) => Ok((
            from.to_string(),
            to.to_string(),
            parse_filter(query.user_id.as_deref(), query.service_name.as_deref()),
        )),
        _ => Err(AppError::BadRequest(
            "period_from and period_to required".to_string(),
        )),
    }
}

/// Stores a new subscription under a freshly generated id.
pub async fn create_subscription(
    store: &dyn SubscriptionStore,
    req: SubscriptionRequest,
) -> Res<Subscription> {
    let id = Uuid::new_v4();
    let sub = store.create(id, req.into()).await?;
    log::info!("Subscription {} created for user {}", sub.id, sub.user_id);
    Ok(sub)
}

pub async fn get_subscription(store: &dyn SubscriptionStore, raw_id: &str) -> Res<Subscription> {
    let id = parse_id(raw_id)?;
    store.get(id).await
}

/// Replaces the subscription at `raw_id`; the path id wins over anything in the body.
pub async fn update_subscription(
    store: &dyn SubscriptionStore,
    raw_id: &str,
    req: SubscriptionRequest,
) -> Res<Subscription> {
    let id = parse_id(raw_id)?;
    store.update(id, req.into()).await
}

pub async fn delete_subscription(store: &dyn SubscriptionStore, raw_id: &str) -> Res<()> {
    let id = parse_id(raw_id)?;
    store.delete(id).await?;
    log::info!("Subscription {} deleted", id);
    Ok(())
}

pub async fn list_subscriptions(
    store: &dyn SubscriptionStore,
    query: &ListQuery,
) -> Res<Vec<Subscription>> {
    let params = list_params(query);
    store.list(params.limit, params.offset, params.filter).await
}

pub async fn summarize_subscriptions(
    store: &dyn SubscriptionStore,
    query: &SummaryQuery,
) -> Res<i64> {
    let (period_from, period_to, filter) = summary_params(query)?;
    store.summary(&period_from, &period_to, filter).await
}
