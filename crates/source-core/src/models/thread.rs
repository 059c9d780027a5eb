//! Messaging threads between a member and the care team.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    AttachmentParams, AttachmentType, Expandable, File, HasId, ListResponse, Member, Person,
    ThreadActions, User,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadStatus {
    AwaitingCareTeam,
    AwaitingMember,
    Closed,
}

impl ThreadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThreadStatus::AwaitingCareTeam => "awaiting_care_team",
            ThreadStatus::AwaitingMember => "awaiting_member",
            ThreadStatus::Closed => "closed",
        }
    }
}

impl std::fmt::Display for ThreadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThreadStatus::AwaitingCareTeam => write!(f, "Awaiting Care Team"),
            ThreadStatus::AwaitingMember => write!(f, "Awaiting Member"),
            ThreadStatus::Closed => write!(f, "Closed"),
        }
    }
}

impl std::str::FromStr for ThreadStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "awaiting_care_team" => Ok(ThreadStatus::AwaitingCareTeam),
            "awaiting_member" => Ok(ThreadStatus::AwaitingMember),
            "closed" => Ok(ThreadStatus::Closed),
            other => Err(format!("unknown thread status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadLastMessageAttachment {
    #[serde(rename = "type")]
    pub kind: AttachmentType,
    /// File name for uploaded files, otherwise the supplied description.
    pub description: Option<String>,
    pub url: String,
    pub resource: Option<Expandable<File>>,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

/// Preview of the most recent message in a thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadLastMessage {
    pub text: String,
    #[serde(default)]
    pub attachments: Vec<ThreadLastMessageAttachment>,
    pub sender: Expandable<Person>,
    pub sent_at: DateTime<Utc>,
    pub redacted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thread {
    pub id: String,
    pub member: Expandable<Member>,
    /// User notified of new messages.
    pub assignee: Option<Expandable<User>>,
    pub status: ThreadStatus,
    pub subject: Option<String>,
    pub last_message: ThreadLastMessage,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    /// Messages sent after this point are unread by the member.
    pub member_last_read: Option<DateTime<Utc>>,
    pub last_message_at: DateTime<Utc>,
}

impl Thread {
    /// Whether the member has read through the latest message.
    pub fn is_read_by_member(&self) -> bool {
        self.member_last_read
            .map(|read| read >= self.last_message_at)
            .unwrap_or(false)
    }
}

impl HasId for Thread {
    fn id(&self) -> &str {
        &self.id
    }
}

pub type ThreadListResponse = ListResponse<Thread>;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ThreadListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ending_before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_after: Option<String>,
    /// Between 1 and 100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<String>,
    /// A user ID, or `current` for the authenticated user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub status: Vec<ThreadStatus>,
}

/// Initial message of a new thread.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ThreadCreateMessage {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_actions: Option<ThreadActions>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<AttachmentParams>,
    /// Required with API key authentication: who the message is sent as.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    /// Backdate the message, API key authentication only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<DateTime<Utc>>,
}

impl ThreadCreateMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ThreadCreateParams {
    pub member: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// `Some(None)` sends an explicit `null` subject.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Option<String>>,
    pub message: ThreadCreateMessage,
}

/// Fields left as `None` are unchanged. `Some(None)` clears the field.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ThreadUpdateParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ThreadStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Option<String>>,
}

/// `None` marks the whole thread unread.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreadMarkParams {
    pub member_last_read: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const THREAD_JSON: &str = r#"{
        "object": "thread",
        "id": "thrd_1",
        "member": "mem_123",
        "assignee": {"id": "usr_1", "first_name": "Grace", "last_name": "Hopper"},
        "status": "awaiting_care_team",
        "subject": "Refill",
        "last_message": {
            "text": "Can I get a refill?",
            "attachments": [{"type": "link", "description": "Rx", "url": "https://example.com/rx", "resource": null, "metadata": {}}],
            "sender": "mem_123",
            "sent_at": "2024-03-01T12:00:00Z",
            "redacted_at": null
        },
        "created_at": "2024-03-01T12:00:00Z",
        "updated_at": "2024-03-01T12:00:00Z",
        "closed_at": null,
        "member_last_read": "2024-03-01T12:00:00Z",
        "last_message_at": "2024-03-01T12:00:00Z"
    }"#;

    #[test]
    fn test_parse_thread() {
        let thread: Thread = serde_json::from_str(THREAD_JSON).unwrap();
        assert_eq!(thread.id, "thrd_1");
        assert_eq!(thread.member.id(), "mem_123");
        assert_eq!(thread.assignee.as_ref().map(|a| a.id()), Some("usr_1"));
        assert_eq!(thread.status, ThreadStatus::AwaitingCareTeam);
        assert_eq!(thread.last_message.attachments[0].kind, AttachmentType::Link);
        assert_eq!(thread.last_message.sender.id(), "mem_123");
        assert!(thread.is_read_by_member());
    }

    #[test]
    fn test_update_params_distinguish_clear_from_unchanged() {
        let params = ThreadUpdateParams {
            assignee: Some(None),
            status: Some(ThreadStatus::Closed),
            subject: None,
        };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            serde_json::json!({ "assignee": null, "status": "closed" })
        );
    }

    #[test]
    fn test_create_params_subject_null_or_omitted() {
        let mut params = ThreadCreateParams {
            member: "mem_123".to_string(),
            subject: Some(None),
            message: ThreadCreateMessage::text("Hi"),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            serde_json::json!({ "member": "mem_123", "subject": null, "message": { "text": "Hi" } })
        );

        params.subject = None;
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            serde_json::json!({ "member": "mem_123", "message": { "text": "Hi" } })
        );
    }

    #[test]
    fn test_mark_params_serialize_null() {
        let params = ThreadMarkParams { member_last_read: None };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            serde_json::json!({ "member_last_read": null })
        );
    }

    #[test]
    fn test_status_round_trips_through_str() {
        for status in [ThreadStatus::AwaitingCareTeam, ThreadStatus::AwaitingMember, ThreadStatus::Closed] {
            assert_eq!(status.as_str().parse::<ThreadStatus>(), Ok(status));
        }
        assert!("open".parse::<ThreadStatus>().is_err());
    }
}
