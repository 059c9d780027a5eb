//! Appointment availability.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use super::{Expandable, User};

/// A bookable window. Slots may overlap when the slot interval is shorter
/// than the appointment duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    /// Formatted in `output_time_zone` when one was requested.
    pub start_at: DateTime<FixedOffset>,
    pub end_at: DateTime<FixedOffset>,
    /// User picked by the routing strategy for this slot.
    pub preferred: Expandable<User>,
    /// Every available user, including the preferred one.
    #[serde(default)]
    pub available: Vec<Expandable<User>>,
}

impl Slot {
    pub fn duration(&self) -> chrono::Duration {
        self.end_at - self.start_at
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotListResponse {
    pub slots: Vec<Slot>,
    /// Users considered, in routing order.
    #[serde(default)]
    pub participants: Vec<Expandable<User>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotRoutingStrategy {
    CareTeamRequired,
    CareTeamPreferred,
    CareTeamHybrid,
    RoundRobin,
}

/// Availability query. The window may span at most 31 days.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotListParams {
    /// Appointment type ID or key.
    pub appointment_type: String,
    /// Inferred when called with a member token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<String>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_time_zone: Option<String>,
    /// Users and groups to include.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub participants: Vec<String>,
    /// Users and groups to exclude. Takes precedence over `participants`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude_participants: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_strategy: Option<SlotRoutingStrategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rescheduling_appointment: Option<String>,
    /// Minutes, between 5 and 360.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

impl SlotListParams {
    pub fn new(appointment_type: impl Into<String>, start_at: DateTime<Utc>, end_at: DateTime<Utc>) -> Self {
        Self {
            appointment_type: appointment_type.into(),
            member: None,
            start_at,
            end_at,
            output_time_zone: None,
            participants: Vec::new(),
            exclude_participants: Vec::new(),
            routing_strategy: None,
            rescheduling_appointment: None,
            duration: None,
        }
    }
}
