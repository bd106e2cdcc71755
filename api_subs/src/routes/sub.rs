use std::sync::Arc;

use actix_web::{
    Responder, delete, get, post, put,
    web::{self},
};
use common::{error::Res, http::Success};
use db::SubscriptionStore;

use crate::{
    dtos::sub::{ListQuery, SubscriptionRequest, SummaryQuery, SummaryResponse},
    services,
};

/// Creates a subscription.
///
/// Any `id` in the body is replaced by a server generated one.
///
/// # Arguments
///
/// * `store` - The subscription store.
/// * `req` - The subscription fields.
///
/// # Returns
///
/// A `Result` containing a `201 Created` response with the stored record or an `AppError` if an error occurs.
#[post("")]
pub async fn post_subscription(
    store: web::Data<Arc<dyn SubscriptionStore>>,
    req: web::Json<SubscriptionRequest>,
) -> Res<impl Responder> {
    let sub = services::sub::create_subscription(store.get_ref().as_ref(), req.into_inner()).await?;
    Success::created(sub)
}

/// Lists subscriptions, newest first.
///
/// The query string is read as raw pairs so that repeated or malformed
/// parameters fall back to defaults; the first occurrence of a key wins.
///
/// # Query
///
/// * `limit` - Page size, 10 when missing, zero or unparsable.
/// * `offset` - Rows to skip, 0 by default.
/// * `user_id` - Optional owner filter; ignored when not a valid UUID.
/// * `service_name` - Optional exact service name filter.
///
/// # Returns
///
/// A `Result` containing a `Success` response with the page of records or an `AppError` if an error occurs.
#[get("")]
pub async fn get_subscriptions(
    store: web::Data<Arc<dyn SubscriptionStore>>,
    query: web::Query<Vec<(String, String)>>,
) -> Res<impl Responder> {
    let query = ListQuery::from(query.into_inner());
    let subs = services::sub::list_subscriptions(store.get_ref().as_ref(), &query).await?;
    Success::ok(subs)
}

/// Sums `price` over the subscriptions active within a period range.
///
/// # Query
///
/// * `period_from` - Required lower bound for `start_date`.
/// * `period_to` - Required upper bound for `end_date`; open-ended subscriptions always count.
/// * `user_id`, `service_name` - Optional filters, as in the list endpoint.
///
/// # Returns
///
/// A `Result` containing a `Success` response with `{"total": <int>}` or an `AppError` if an error occurs.
#[get("/summary")]
pub async fn get_summary(
    store: web::Data<Arc<dyn SubscriptionStore>>,
    query: web::Query<Vec<(String, String)>>,
) -> Res<impl Responder> {
    let query = SummaryQuery::from(query.into_inner());
    let total =
        services::sub::summarize_subscriptions(store.get_ref().as_ref(), &query).await?;
    Success::ok(SummaryResponse { total })
}

/// Retrieves a single subscription.
///
/// # Arguments
///
/// * `store` - The subscription store.
/// * `id` - The subscription id from the path.
///
/// # Returns
///
/// A `Result` containing a `Success` response with the record, or an `AppError`:
/// bad request for a malformed id, not found for an unknown one.
#[get("/{id}")]
pub async fn get_subscription(
    store: web::Data<Arc<dyn SubscriptionStore>>,
    id: web::Path<String>,
) -> Res<impl Responder> {
    let sub = services::sub::get_subscription(store.get_ref().as_ref(), &id).await?;
    Success::ok(sub)
}

/// Replaces a subscription. The id in the path is authoritative.
///
/// # Arguments
///
/// * `store` - The subscription store.
/// * `id` - The subscription id from the path.
/// * `req` - The new subscription fields.
///
/// # Returns
///
/// A `Result` containing a `Success` response with the stored record or an `AppError` if an error occurs.
#[put("/{id}")]
pub async fn put_subscription(
    store: web::Data<Arc<dyn SubscriptionStore>>,
    id: web::Path<String>,
    req: web::Json<SubscriptionRequest>,
) -> Res<impl Responder> {
    let sub =
        services::sub::update_subscription(store.get_ref().as_ref(), &id, req.into_inner())
            .await?;
    Success::ok(sub)
}

/// Deletes a subscription. Unknown ids still answer `204 No Content`.
///
/// # Arguments
///
/// * `store` - The subscription store.
/// * `id` - The subscription id from the path.
#[delete("/{id}")]
pub async fn delete_subscription(
    store: web::Data<Arc<dyn SubscriptionStore>>,
    id: web::Path<String>,
) -> Res<impl Responder> {
    services::sub::delete_subscription(store.get_ref().as_ref(), &id).await?;
    Success::no_content()
}
