use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

/// Optional equality filters shared by list and summary queries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubscriptionFilter {
    pub user_id: Option<Uuid>,
    pub service_name: Option<String>,
}

/// A single `column = $n` predicate together with the value it binds.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    UserId(Uuid),
    ServiceName(String),
}

impl Predicate {
    fn column(&self) -> &'static str {
        match self {
            Predicate::UserId(_) => "user_id",
            Predicate::ServiceName(_) => "service_name",
        }
    }

    fn push(self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push(self.column()).push(" = ");
        match self {
            Predicate::UserId(user_id) => qb.push_bind(user_id),
            Predicate::ServiceName(name) => qb.push_bind(name),
        };
    }
}

impl SubscriptionFilter {
    /// Predicates for the filters that are present, in a stable order.
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::new();
        if let Some(user_id) = self.user_id {
            predicates.push(Predicate::UserId(user_id));
        }
        if let Some(name) = &self.service_name {
            predicates.push(Predicate::ServiceName(name.clone()));
        }
        predicates
    }

    /// Appends ` WHERE a = $n AND b = $m` for the present filters.
    /// Nothing is pushed when the filter is empty.
    pub fn push_where(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        for (i, predicate) in self.predicates().into_iter().enumerate() {
            qb.push(if i == 0 { " WHERE " } else { " AND " });
            predicate.push(qb);
        }
    }

    /// Appends ` AND a = $n` for each present filter, for queries that already
    /// carry a WHERE clause.
    pub fn push_and(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        for predicate in self.predicates() {
            qb.push(" AND ");
            predicate.push(qb);
        }
    }
}
