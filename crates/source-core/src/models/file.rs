use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::HasId;

/// An uploaded file, as referenced by message attachments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    pub id: String,
    pub name: Option<String>,
    pub purpose: Option<String>,
    pub content_type: Option<String>,
    pub size: Option<u64>,
    pub url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl HasId for File {
    fn id(&self) -> &str {
        &self.id
    }
}
