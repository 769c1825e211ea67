//! Typed request bodies for the resource methods.
//!
//! Shapes the API leaves open (participant groups, event times with
//! optional time zones, attendee lists) are carried as [`serde_json::Value`];
//! everything with a fixed shape gets a struct.

use serde::{Serialize, Serializer};
use serde_json::Value;

/// Serializes a list of OAuth scopes as one space-separated string.
fn space_separated<S: Serializer>(scope: &[String], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&scope.join(" "))
}

/// Whether an event blocks time in free/busy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Transparency {
    Transparent,
    Opaque,
}

/// The fields of an event shared by managed and external upserts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventDetails {
    pub summary: String,
    /// A time string, or an object with `time` and `tzid`.
    pub start: Value,
    pub end: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tzid: Option<String>,
    /// `{"description", "lat", "long"}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Value>,
    /// e.g. `[{"minutes": 30}, {"minutes": 1440}]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminders: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminders_create_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_private: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transparency: Option<Transparency>,
    /// `{"invite": [...], "reject": [...]}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Value>,
}

impl EventDetails {
    pub fn new(summary: impl Into<String>, start: impl Into<Value>, end: impl Into<Value>) -> Self {
        Self {
            summary: summary.into(),
            start: start.into(),
            end: end.into(),
            description: None,
            tzid: None,
            location: None,
            reminders: None,
            reminders_create_only: None,
            event_private: None,
            transparency: None,
            attendees: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tzid(mut self, tzid: impl Into<String>) -> Self {
        self.tzid = Some(tzid.into());
        self
    }

    pub fn with_location(mut self, location: Value) -> Self {
        self.location = Some(location);
        self
    }
}

/// Body of an availability query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailabilityRequest {
    pub available_periods: Value,
    pub participants: Value,
    /// e.g. `{"minutes": 60}`.
    pub required_duration: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buffer: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_interval: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<String>,
}

impl AvailabilityRequest {
    pub fn new(available_periods: Value, participants: Value, required_duration: Value) -> Self {
        Self {
            available_periods,
            participants,
            required_duration,
            buffer: None,
            max_results: None,
            start_interval: None,
            response_format: None,
        }
    }
}

/// Body shared by real-time scheduling and real-time sequencing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RealTimeRequest {
    /// `{"redirect_uri", "scope"}` applied after the event is created.
    pub oauth: Value,
    pub event: Value,
    pub availability: Value,
    pub target_calendars: Value,
    pub tzid: String,
}

/// Body of an add-to-calendar request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddToCalendarRequest {
    pub oauth: Value,
    pub event: Value,
}

/// Who a smart invite goes to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SmartInviteRecipients {
    #[serde(rename = "recipient")]
    Single(Value),
    #[serde(rename = "recipients")]
    Many(Vec<Value>),
}

/// Body of a smart invite creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmartInvite {
    pub event: Value,
    pub smart_invite_id: String,
    pub callback_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer: Option<Value>,
    #[serde(flatten)]
    pub recipients: SmartInviteRecipients,
}

/// Day of the week a weekly period applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyPeriod {
    pub day: Day,
    /// `HH:MM`
    pub start_time: String,
    pub end_time: String,
}

impl WeeklyPeriod {
    pub fn new(day: Day, start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            day,
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }
}

/// An availability rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityRule {
    pub availability_rule_id: String,
    pub tzid: String,
    pub calendar_ids: Vec<String>,
    pub weekly_periods: Vec<WeeklyPeriod>,
}

/// Request for delegated access to another account through a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DelegatedAuthorizationRequest {
    pub profile_id: String,
    pub email: String,
    pub callback_url: String,
    #[serde(serialize_with = "space_separated")]
    pub scope: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// Request to authorize a user through a service account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceAccountAuthorization {
    pub email: String,
    #[serde(serialize_with = "space_separated")]
    pub scope: Vec<String>,
    pub callback_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionRequest {
    pub calendar_id: String,
    /// e.g. `"unrestricted"`.
    pub permission_level: String,
}

/// Request to elevate calendar permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElevatedPermissions {
    pub permissions: Vec<PermissionRequest>,
    pub redirect_uri: String,
}

/// Request to create a calendar on a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateCalendar {
    pub profile_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// An attendee's response to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipationStatus {
    Accepted,
    Tentative,
    Declined,
}
