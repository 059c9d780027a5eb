use anyhow::{Context, Result};

use crate::api::{RequestOptions, SourceClient};
use crate::models::{Message, MessageCreateParams, MessageListParams, MessageListResponse};

const MESSAGES_PATH: [&str; 3] = ["v1", "communication", "messages"];

/// `/v1/communication/messages`
pub struct MessageResource<'a> {
    client: &'a SourceClient,
}

impl<'a> MessageResource<'a> {
    pub(crate) fn new(client: &'a SourceClient) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        params: Option<&MessageListParams>,
        options: Option<&RequestOptions>,
    ) -> Result<MessageListResponse> {
        self.client
            .get(&MESSAGES_PATH, params, options)
            .await
            .context("Failed to list messages")
    }

    /// Send a message on an existing thread.
    pub async fn create(
        &self,
        params: &MessageCreateParams,
        options: Option<&RequestOptions>,
    ) -> Result<Message> {
        self.client
            .post(&MESSAGES_PATH, Some(params), options)
            .await
            .with_context(|| format!("Failed to send message on thread {}", params.thread))
    }

    pub async fn retrieve(&self, id: &str, options: Option<&RequestOptions>) -> Result<Message> {
        let [v, ns, messages] = MESSAGES_PATH;
        self.client
            .get::<_, ()>(&[v, ns, messages, id], None, options)
            .await
            .with_context(|| format!("Failed to retrieve message {}", id))
    }
}
