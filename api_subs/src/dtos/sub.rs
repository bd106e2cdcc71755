use db::dtos::subscription::SubscriptionWrite;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of create and update requests.
///
/// `id` and `created_at` are assigned by the server; if a client sends them
/// they are ignored.
#[derive(Debug, Serialize, Deserialize)]
pub struct SubscriptionRequest {
    pub service_name: String,
    pub price: i32,
    pub user_id: Uuid,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
}

impl From<SubscriptionRequest> for SubscriptionWrite {
    fn from(req: SubscriptionRequest) -> Self {
        SubscriptionWrite {
            service_name: req.service_name,
            price: req.price,
            user_id: req.user_id,
            start_date: req.start_date,
            end_date: req.end_date,
        }
    }
}

/// Raw query of `GET /subscriptions`. Values stay strings so that bad input
/// falls back to defaults instead of rejecting the request.
#[derive(Debug, Default)]
pub struct ListQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub user_id: Option<String>,
    pub service_name: Option<String>,
}

/// Raw query of `GET /subscriptions/summary`.
#[derive(Debug, Default)]
pub struct SummaryQuery {
    pub period_from: Option<String>,
    pub period_to: Option<String>,
    pub user_id: Option<String>,
    pub service_name: Option<String>,
}

/// First value of `key`; later repetitions are ignored.
fn first_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.clone())
}

impl From<Vec<(String, String)>> for ListQuery {
    fn from(pairs: Vec<(String, String)>) -> Self {
        ListQuery {
            limit: first_value(&pairs, "limit"),
            offset: first_value(&pairs, "offset"),
            user_id: first_value(&pairs, "user_id"),
            service_name: first_value(&pairs, "service_name"),
        }
    }
}

impl From<Vec<(String, String)>> for SummaryQuery {
    fn from(pairs: Vec<(String, String)>) -> Self {
        SummaryQuery {
            period_from: first_value(&pairs, "period_from"),
            period_to: first_value(&pairs, "period_to"),
            user_id: first_value(&pairs, "user_id"),
            service_name: first_value(&pairs, "service_name"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub total: i64,
}
