use anyhow::{Context, Result};

use crate::api::{RequestOptions, SourceClient};
use crate::models::{SlotListParams, SlotListResponse};

/// `/v1/scheduling/slots`
pub struct SlotResource<'a> {
    client: &'a SourceClient,
}

impl<'a> SlotResource<'a> {
    pub(crate) fn new(client: &'a SourceClient) -> Self {
        Self { client }
    }

    /// List bookable appointment slots. Callable with member tokens.
    pub async fn list(
        &self,
        params: &SlotListParams,
        options: Option<&RequestOptions>,
    ) -> Result<SlotListResponse> {
        self.client
            .get(&["v1", "scheduling", "slots"], Some(params), options)
            .await
            .with_context(|| format!("Failed to list slots for {}", params.appointment_type))
    }
}
