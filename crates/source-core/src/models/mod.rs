//! Data models for Source API resources.
//!
//! This module contains the request and response types of the wrapped
//! endpoints:
//!
//! - `Expandable`, `ListResponse`: shapes shared by every resource
//! - `Member`, `User`, `File`: referenced from threads, messages and slots
//! - `Thread`, `Message`: care team / member communication
//! - `Slot`: bookable appointment availability

pub mod file;
pub mod member;
pub mod message;
pub mod shared;
pub mod slot;
pub mod thread;
pub mod user;

pub use file::File;
pub use member::Member;
pub use message::{
    Message, MessageAttachment, MessageCreateParams, MessageListParams, MessageListResponse,
};
pub use shared::{
    AttachmentParams, AttachmentType, Expandable, HasId, ListResponse, Person, ThreadActions,
};
pub use slot::{Slot, SlotListParams, SlotListResponse, SlotRoutingStrategy};
pub use thread::{
    Thread, ThreadCreateMessage, ThreadCreateParams, ThreadLastMessage, ThreadLastMessageAttachment,
    ThreadListParams, ThreadListResponse, ThreadMarkParams, ThreadStatus, ThreadUpdateParams,
};
pub use user::User;
