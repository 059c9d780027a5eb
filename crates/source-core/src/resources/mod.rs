//! Endpoint wrappers.
//!
//! Each resource borrows a [`SourceClient`](crate::api::SourceClient) and
//! maps one method to one endpoint. Every method takes optional
//! [`RequestOptions`](crate::api::RequestOptions).

pub mod messages;
pub mod slots;
pub mod threads;

pub use messages::MessageResource;
pub use slots::SlotResource;
pub use threads::ThreadResource;
