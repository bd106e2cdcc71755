use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One user's paid subscription to a named service.
///
/// `start_date` and `end_date` are `MM-YYYY` period markers kept as plain text.
/// A missing `end_date` means the subscription is still active.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
pub struct Subscription {
    pub id: Uuid,
    pub service_name: String,
    pub price: i32,
    pub user_id: Uuid,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub created_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample(end_date: Option<&str>) -> Subscription {
        Subscription {
            id: Uuid::new_v4(),
            service_name: "Streaming Plus".to_string(),
            price: 400,
            user_id: Uuid::new_v4(),
            start_date: "07-2025".to_string(),
            end_date: end_date.map(str::to_string),
            created_at: NaiveDate::from_ymd_opt(2025, 7, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn omits_absent_end_date() {
        let json = serde_json::to_value(sample(None)).unwrap();
        assert!(json.get("end_date").is_none());
        assert_eq!(json["start_date"], "07-2025");
        assert_eq!(json["price"], 400);
    }

    #[test]
    fn keeps_empty_end_date_distinct_from_absent() {
        let json = serde_json::to_value(sample(Some(""))).unwrap();
        assert_eq!(json["end_date"], "");
    }
}
