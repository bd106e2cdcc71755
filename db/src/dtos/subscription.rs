use uuid::Uuid;

/// Mutable fields of a subscription, written by create and update.
pub struct SubscriptionWrite {
    pub service_name: String,
    pub price: i32,
    pub user_id: Uuid,
    pub start_date: String,
    pub end_date: Option<String>,
}
