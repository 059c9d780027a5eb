use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::HasId;

/// A patient or client of the account.
///
/// Only the fields used by the communication and scheduling resources are
/// modelled; anything else in the payload is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub preferred_name: Option<String>,
    pub email: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Member {
    pub fn full_name(&self) -> String {
        let first = self.preferred_name.as_deref().or(self.first_name.as_deref());
        format!(
            "{} {}",
            first.unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        )
        .trim()
        .to_string()
    }
}

impl HasId for Member {
    fn id(&self) -> &str {
        &self.id
    }
}
