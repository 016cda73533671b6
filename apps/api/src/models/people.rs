use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An HR account, identified by unique email. Owns interview definitions.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HrRow {
    pub id: Uuid,
    pub email: String,
    pub company_name: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A candidate, identified by unique email. May attempt many interviews but
/// at most once per interview link.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}
