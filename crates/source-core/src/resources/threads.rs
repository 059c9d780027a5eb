use anyhow::{Context, Result};

use crate::api::{RequestOptions, SourceClient};
use crate::models::{
    Thread, ThreadCreateParams, ThreadListParams, ThreadListResponse, ThreadMarkParams,
    ThreadUpdateParams,
};

const THREADS_PATH: [&str; 3] = ["v1", "communication", "threads"];

/// `/v1/communication/threads`
pub struct ThreadResource<'a> {
    client: &'a SourceClient,
}

impl<'a> ThreadResource<'a> {
    pub(crate) fn new(client: &'a SourceClient) -> Self {
        Self { client }
    }

    /// List threads in the account, most recently updated first.
    pub async fn list(
        &self,
        params: Option<&ThreadListParams>,
        options: Option<&RequestOptions>,
    ) -> Result<ThreadListResponse> {
        self.client
            .get(&THREADS_PATH, params, options)
            .await
            .context("Failed to list threads")
    }

    /// Create a thread with its first message.
    pub async fn create(
        &self,
        params: &ThreadCreateParams,
        options: Option<&RequestOptions>,
    ) -> Result<Thread> {
        self.client
            .post(&THREADS_PATH, Some(params), options)
            .await
            .with_context(|| format!("Failed to create thread for member {}", params.member))
    }

    pub async fn retrieve(&self, id: &str, options: Option<&RequestOptions>) -> Result<Thread> {
        let [v, ns, threads] = THREADS_PATH;
        self.client
            .get::<_, ()>(&[v, ns, threads, id], None, options)
            .await
            .with_context(|| format!("Failed to retrieve thread {}", id))
    }

    /// Change status, subject or assignee. Unset fields are left unchanged.
    pub async fn update(
        &self,
        id: &str,
        params: Option<&ThreadUpdateParams>,
        options: Option<&RequestOptions>,
    ) -> Result<Thread> {
        let [v, ns, threads] = THREADS_PATH;
        self.client
            .post(&[v, ns, threads, id], params, options)
            .await
            .with_context(|| format!("Failed to update thread {}", id))
    }

    /// Record how far the member has read. `member_last_read: None` marks
    /// the whole thread unread.
    pub async fn mark(
        &self,
        id: &str,
        params: &ThreadMarkParams,
        options: Option<&RequestOptions>,
    ) -> Result<Thread> {
        let [v, ns, threads] = THREADS_PATH;
        self.client
            .post(&[v, ns, threads, id, "mark"], Some(params), options)
            .await
            .with_context(|| format!("Failed to mark thread {}", id))
    }
}
