use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{Member, User};

/// Resources that carry a unique ID.
pub trait HasId {
    fn id(&self) -> &str;
}

/// A reference that is either the bare ID or, when requested with
/// `expand`, the embedded object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expandable<T> {
    Id(String),
    Object(Box<T>),
}

impl<T: HasId> Expandable<T> {
    pub fn id(&self) -> &str {
        match self {
            Expandable::Id(id) => id,
            Expandable::Object(object) => object.id(),
        }
    }
}

impl<T> Expandable<T> {
    pub fn as_object(&self) -> Option<&T> {
        match self {
            Expandable::Id(_) => None,
            Expandable::Object(object) => Some(object),
        }
    }

    pub fn is_expanded(&self) -> bool {
        matches!(self, Expandable::Object(_))
    }
}

/// One page of a cursor-paginated list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    /// Always `list`.
    pub object: String,
    pub data: Vec<T>,
    /// `true` if another page is available after the last item.
    pub has_more: bool,
}

impl<T: HasId> ListResponse<T> {
    /// Cursor for `starting_after` on the next page, if there is one.
    pub fn next_cursor(&self) -> Option<&str> {
        if self.has_more {
            self.data.last().map(|item| item.id())
        } else {
            None
        }
    }
}

/// A message sender: someone on the care team or the member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "object", rename_all = "snake_case")]
pub enum Person {
    User(User),
    Member(Member),
}

impl HasId for Person {
    fn id(&self) -> &str {
        match self {
            Person::User(user) => &user.id,
            Person::Member(member) => &member.id,
        }
    }
}

impl Person {
    pub fn display_name(&self) -> String {
        match self {
            Person::User(user) => user.full_name(),
            Person::Member(member) => member.full_name(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentType {
    File,
    Link,
}

/// Attachment to send with a new message.
///
/// `File` attachments need `resource` (an uploaded file ID), `Link`
/// attachments need `url`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttachmentParams {
    #[serde(rename = "type")]
    pub kind: AttachmentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Only accepted with API key authentication.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

impl AttachmentParams {
    pub fn file(file_id: impl Into<String>) -> Self {
        Self {
            kind: AttachmentType::File,
            description: None,
            resource: Some(file_id.into()),
            url: None,
            metadata: None,
        }
    }

    pub fn link(url: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: AttachmentType::Link,
            description: Some(description.into()),
            resource: None,
            url: Some(url.into()),
            metadata: None,
        }
    }
}

/// Actions applied to the thread once a message is sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ThreadActions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<super::ThreadStatus>,
}
