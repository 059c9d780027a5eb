//! Individual messages within a thread.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    AttachmentParams, AttachmentType, Expandable, File, HasId, ListResponse, Member, Person,
    Thread, ThreadActions,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageAttachment {
    #[serde(rename = "type")]
    pub kind: AttachmentType,
    pub description: Option<String>,
    pub url: String,
    pub resource: Option<Expandable<File>>,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub thread: Expandable<Thread>,
    pub member: Expandable<Member>,
    pub text: String,
    #[serde(default)]
    pub attachments: Vec<MessageAttachment>,
    pub sender: Expandable<Person>,
    pub sent_at: DateTime<Utc>,
    pub redacted_at: Option<DateTime<Utc>>,
}

impl Message {
    pub fn is_redacted(&self) -> bool {
        self.redacted_at.is_some()
    }
}

impl HasId for Message {
    fn id(&self) -> &str {
        &self.id
    }
}

pub type MessageListResponse = ListResponse<Message>;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MessageListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ending_before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_after: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<String>,
}

/// A message sent on an existing thread.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MessageCreateParams {
    pub thread: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_actions: Option<ThreadActions>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<AttachmentParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ThreadStatus;

    #[test]
    fn test_parse_message_with_expanded_sender() {
        let json = r#"{
            "object": "message",
            "id": "msg_1",
            "thread": "thrd_1",
            "member": "mem_123",
            "text": "See you Tuesday",
            "attachments": [],
            "sender": {"object": "member", "id": "mem_123", "first_name": "Ada", "last_name": "Lovelace"},
            "sent_at": "2024-03-02T09:30:00Z",
            "redacted_at": null
        }"#;
        let message: Message = serde_json::from_str(json).unwrap();
        assert_eq!(message.thread.id(), "thrd_1");
        assert_eq!(message.sender.as_object().unwrap().display_name(), "Ada Lovelace");
        assert!(!message.is_redacted());
    }

    #[test]
    fn test_create_params_serialization() {
        let params = MessageCreateParams {
            thread: "thrd_1".to_string(),
            text: "Closing this out".to_string(),
            thread_actions: Some(ThreadActions { status: Some(ThreadStatus::Closed) }),
            sender: Some("usr_1".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            serde_json::json!({
                "thread": "thrd_1",
                "text": "Closing this out",
                "thread_actions": { "status": "closed" },
                "sender": "usr_1"
            })
        );
    }
}
