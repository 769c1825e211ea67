//! The Cronofy client and its resource methods.
//!
//! Each method shapes its arguments into a path and a body and hands them to
//! the [`RequestPipeline`]. Paths are the API's `v1` routes; identifiers are
//! inserted verbatim, so an identifier that would make the URL malformed
//! fails with [`CronofyError::InvalidUrl`](crate::CronofyError::InvalidUrl)
//! before anything is sent.

use chrono::Utc;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{info, warn};

#[cfg(feature = "http")]
use crate::transport::HttpTransport;

use crate::auth::AuthContext;
use crate::config::ClientConfig;
use crate::error::CronofyResult;
use crate::oauth::{self, AuthorizationParams, EnterpriseConnectParams};
use crate::paged::PagedResultIterator;
use crate::params::{
    AddToCalendarRequest, AvailabilityRequest, AvailabilityRule, CreateCalendar,
    DelegatedAuthorizationRequest, ElevatedPermissions, EventDetails, ParticipationStatus,
    RealTimeRequest, ServiceAccountAuthorization, SmartInvite,
};
use crate::pipeline::RequestPipeline;
use crate::query::QueryParams;
use crate::response::Payload;
use crate::tokens::TokenExchange;
use crate::transport::Transport;

const API_VERSION: &str = "v1";

/// A Cronofy API client.
///
/// Methods that can replace the access token take `&mut self`; everything
/// else borrows the client immutably. Paged listings borrow the client for as
/// long as they are iterated.
#[derive(Debug)]
pub struct Cronofy<T> {
    config: ClientConfig,
    pipeline: RequestPipeline<T>,
}

#[cfg(feature = "http")]
impl Cronofy<HttpTransport> {
    /// Creates a client using the blocking HTTP transport with the
    /// configuration's timeout.
    pub fn new(config: ClientConfig) -> CronofyResult<Self> {
        let transport = HttpTransport::new(config.timeout())?;
        Ok(Self::with_transport(config, transport))
    }
}

/// Event identifier for upserts; managed events use `event_id`, events
/// created elsewhere are addressed by `event_uid`.
#[derive(Serialize)]
struct UpsertEventBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    event_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    event_uid: Option<&'a str>,
    #[serde(flatten)]
    details: &'a EventDetails,
}

/// Wraps a request body with the application's client credentials.
#[derive(Serialize)]
struct WithClientCredentials<'a, B> {
    client_id: &'a str,
    client_secret: &'a str,
    #[serde(flatten)]
    body: &'a B,
}

impl<T: Transport> Cronofy<T> {
    /// Creates a client that sends requests through `transport`.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        let pipeline = RequestPipeline::for_data_center(transport, config.data_center());
        Self { config, pipeline }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn into_config(self) -> ClientConfig {
        self.config
    }

    pub fn pipeline(&self) -> &RequestPipeline<T> {
        &self.pipeline
    }

    fn bearer(&self) -> AuthContext<'_> {
        AuthContext::BearerToken(self.config.access_token())
    }

    fn api_key(&self) -> AuthContext<'_> {
        AuthContext::ApiKey(self.config.client_secret())
    }

    fn get(&self, path: &str) -> CronofyResult<Payload> {
        self.pipeline.get(path, self.bearer(), &QueryParams::new())
    }

    fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> CronofyResult<Payload> {
        self.pipeline.post(path, self.bearer(), body)
    }

    fn delete<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> CronofyResult<Payload> {
        self.pipeline.delete(path, self.bearer(), body)
    }

    fn with_client_credentials<'a, B>(&'a self, body: &'a B) -> WithClientCredentials<'a, B> {
        WithClientCredentials {
            client_id: self.config.client_id(),
            client_secret: self.config.client_secret(),
            body,
        }
    }

    /// Posts to a token-issuing endpoint and stores any credentials issued.
    fn exchange<B: Serialize + ?Sized>(
        &mut self,
        path: &str,
        body: &B,
    ) -> CronofyResult<TokenExchange> {
        let payload = self.post(path, body)?;
        let granted = payload
            .as_json()
            .is_some_and(|value| self.config.apply_token_payload(value, Utc::now()));

        match payload {
            Payload::Json(value) if granted => {
                info!(path, expires_in = ?self.config.expires_in(), "access token issued");
                Ok(TokenExchange::Granted(value))
            }
            other => {
                let outcome = TokenExchange::denied_from(&other);
                warn!(
                    path,
                    reason = outcome.denial().unwrap_or_default(),
                    "token exchange denied"
                );
                Ok(outcome)
            }
        }
    }

    // OAuth

    /// URL to send a user to for authorizing this application.
    pub fn authorization_url(&self, params: &AuthorizationParams) -> String {
        oauth::authorization_url(&self.config.app_root_url(), self.config.client_id(), params)
    }

    /// URL to send an administrator to for Enterprise Connect authorization.
    pub fn enterprise_connect_authorization_url(&self, params: &EnterpriseConnectParams) -> String {
        oauth::enterprise_connect_authorization_url(
            &self.config.app_root_url(),
            self.config.client_id(),
            params,
        )
    }

    /// Exchanges an authorization code for tokens.
    pub fn request_token(
        &mut self,
        code: &str,
        redirect_uri: &str,
    ) -> CronofyResult<TokenExchange> {
        let body = json!({
            "client_id": self.config.client_id(),
            "client_secret": self.config.client_secret(),
            "grant_type": "authorization_code",
            "code": code,
            "redirect_uri": redirect_uri,
        });
        self.exchange("/oauth/token", &body)
    }

    /// Exchanges the stored refresh token for a new access token.
    pub fn refresh_token(&mut self) -> CronofyResult<TokenExchange> {
        let body = json!({
            "client_id": self.config.client_id(),
            "client_secret": self.config.client_secret(),
            "grant_type": "refresh_token",
            "refresh_token": self.config.refresh_token(),
        });
        self.exchange("/oauth/token", &body)
    }

    /// Revokes an access or refresh token.
    pub fn revoke_authorization(&self, token: &str) -> CronofyResult<Payload> {
        let body = json!({
            "client_id": self.config.client_id(),
            "client_secret": self.config.client_secret(),
            "token": token,
        });
        self.post("/oauth/token/revoke", &body)
    }

    pub fn request_delegated_authorization(
        &self,
        request: &DelegatedAuthorizationRequest,
    ) -> CronofyResult<Payload> {
        self.post(&format!("/{API_VERSION}/delegated_authorizations"), request)
    }

    pub fn request_link_token(&self) -> CronofyResult<Payload> {
        self.post(&format!("/{API_VERSION}/link_tokens"), &json!({}))
    }

    pub fn revoke_profile(&self, profile_id: &str) -> CronofyResult<Payload> {
        self.post(
            &format!("/{API_VERSION}/profiles/{profile_id}/revoke"),
            &json!({}),
        )
    }

    /// Creates (or fetches) an application calendar and adopts its tokens.
    pub fn application_calendar(
        &mut self,
        application_calendar_id: &str,
    ) -> CronofyResult<TokenExchange> {
        let body = json!({
            "client_id": self.config.client_id(),
            "client_secret": self.config.client_secret(),
            "application_calendar_id": application_calendar_id,
        });
        self.exchange(&format!("/{API_VERSION}/application_calendars"), &body)
    }

    /// Authorizes a user through a service account.
    ///
    /// The API answers asynchronously through `callback_url`; the client's
    /// own tokens are left unchanged.
    pub fn authorize_with_service_account(
        &self,
        request: &ServiceAccountAuthorization,
    ) -> CronofyResult<Payload> {
        self.post(
            &format!("/{API_VERSION}/service_account_authorizations"),
            request,
        )
    }

    pub fn elevated_permissions(&self, request: &ElevatedPermissions) -> CronofyResult<Payload> {
        self.post(&format!("/{API_VERSION}/permissions"), request)
    }

    // Account and calendars

    pub fn get_account(&self) -> CronofyResult<Payload> {
        self.get(&format!("/{API_VERSION}/account"))
    }

    pub fn get_user_info(&self) -> CronofyResult<Payload> {
        self.get(&format!("/{API_VERSION}/userinfo"))
    }

    pub fn get_profiles(&self) -> CronofyResult<Payload> {
        self.get(&format!("/{API_VERSION}/profiles"))
    }

    pub fn list_calendars(&self) -> CronofyResult<Payload> {
        self.get(&format!("/{API_VERSION}/calendars"))
    }

    pub fn list_accessible_calendars(&self, profile_id: &str) -> CronofyResult<Payload> {
        let path = format!("/{API_VERSION}/accessible_calendars");
        let query = QueryParams::new().scalar("profile_id", profile_id);
        self.pipeline.get(&path, self.bearer(), &query)
    }

    pub fn create_calendar(&self, request: &CreateCalendar) -> CronofyResult<Payload> {
        self.post(&format!("/{API_VERSION}/calendars"), request)
    }

    pub fn resources(&self) -> CronofyResult<Payload> {
        self.get(&format!("/{API_VERSION}/resources"))
    }

    // Events

    /// Lists events across all pages.
    ///
    /// Typical parameters: `tzid` (required), `from`, `to`,
    /// `include_managed`, and the sequence `calendar_ids`.
    pub fn read_events(&self, query: &QueryParams) -> CronofyResult<PagedResultIterator<'_, T>> {
        let path = format!("/{API_VERSION}/events");
        self.pipeline
            .paginate(&path, self.bearer(), "events", query)
    }

    /// Lists free/busy periods across all pages.
    pub fn free_busy(&self, query: &QueryParams) -> CronofyResult<PagedResultIterator<'_, T>> {
        let path = format!("/{API_VERSION}/free_busy");
        self.pipeline
            .paginate(&path, self.bearer(), "free_busy", query)
    }

    /// Creates or updates an event managed by this application.
    pub fn upsert_event(
        &self,
        calendar_id: &str,
        event_id: &str,
        details: &EventDetails,
    ) -> CronofyResult<Payload> {
        let body = UpsertEventBody {
            event_id: Some(event_id),
            event_uid: None,
            details,
        };
        self.post(
            &format!("/{API_VERSION}/calendars/{calendar_id}/events"),
            &body,
        )
    }

    /// Updates an event that was created outside this application.
    pub fn upsert_external_event(
        &self,
        calendar_id: &str,
        event_uid: &str,
        details: &EventDetails,
    ) -> CronofyResult<Payload> {
        let body = UpsertEventBody {
            event_id: None,
            event_uid: Some(event_uid),
            details,
        };
        self.post(
            &format!("/{API_VERSION}/calendars/{calendar_id}/events"),
            &body,
        )
    }

    pub fn delete_event(&self, calendar_id: &str, event_id: &str) -> CronofyResult<Payload> {
        self.delete(
            &format!("/{API_VERSION}/calendars/{calendar_id}/events"),
            &json!({ "event_id": event_id }),
        )
    }

    pub fn delete_external_event(
        &self,
        calendar_id: &str,
        event_uid: &str,
    ) -> CronofyResult<Payload> {
        self.delete(
            &format!("/{API_VERSION}/calendars/{calendar_id}/events"),
            &json!({ "event_uid": event_uid }),
        )
    }

    pub fn change_participation_status(
        &self,
        calendar_id: &str,
        event_uid: &str,
        status: ParticipationStatus,
    ) -> CronofyResult<Payload> {
        let event = format!("/{API_VERSION}/calendars/{calendar_id}/events/{event_uid}");
        self.post(
            &format!("{event}/participation_status"),
            &json!({ "status": status }),
        )
    }

    // Push notification channels

    pub fn create_channel(
        &self,
        callback_url: &str,
        filters: Option<&Value>,
    ) -> CronofyResult<Payload> {
        let mut body = json!({ "callback_url": callback_url });
        if let Some(filters) = filters {
            body["filters"] = filters.clone();
        }
        self.post(&format!("/{API_VERSION}/channels"), &body)
    }

    pub fn list_channels(&self) -> CronofyResult<Payload> {
        self.get(&format!("/{API_VERSION}/channels"))
    }

    pub fn close_channel(&self, channel_id: &str) -> CronofyResult<Payload> {
        self.delete(&format!("/{API_VERSION}/channels/{channel_id}"), &json!({}))
    }

    // Scheduling

    /// Queries availability; authenticated with the client secret.
    pub fn availability(&self, request: &AvailabilityRequest) -> CronofyResult<Payload> {
        let path = format!("/{API_VERSION}/availability");
        self.pipeline.post(&path, self.api_key(), request)
    }

    pub fn real_time_scheduling(&self, request: &RealTimeRequest) -> CronofyResult<Payload> {
        self.post(
            &format!("/{API_VERSION}/real_time_scheduling"),
            &self.with_client_credentials(request),
        )
    }

    pub fn real_time_sequencing(&self, request: &RealTimeRequest) -> CronofyResult<Payload> {
        self.post(
            &format!("/{API_VERSION}/real_time_sequencing"),
            &self.with_client_credentials(request),
        )
    }

    pub fn add_to_calendar(&self, request: &AddToCalendarRequest) -> CronofyResult<Payload> {
        self.post(
            &format!("/{API_VERSION}/add_to_calendar"),
            &self.with_client_credentials(request),
        )
    }

    // Smart invites, authenticated with the client secret

    pub fn create_smart_invite(&self, invite: &SmartInvite) -> CronofyResult<Payload> {
        let path = format!("/{API_VERSION}/smart_invites");
        self.pipeline.post(&path, self.api_key(), invite)
    }

    pub fn cancel_smart_invite(
        &self,
        recipient: &Value,
        smart_invite_id: &str,
    ) -> CronofyResult<Payload> {
        let body = json!({
            "recipient": recipient,
            "smart_invite_id": smart_invite_id,
            "method": "cancel",
        });
        let path = format!("/{API_VERSION}/smart_invites");
        self.pipeline.post(&path, self.api_key(), &body)
    }

    pub fn get_smart_invite(
        &self,
        smart_invite_id: &str,
        recipient_email: &str,
    ) -> CronofyResult<Payload> {
        let path = format!("/{API_VERSION}/smart_invites");
        let query = QueryParams::new()
            .scalar("smart_invite_id", smart_invite_id)
            .scalar("recipient_email", recipient_email);
        self.pipeline.get(&path, self.api_key(), &query)
    }

    // Availability rules

    pub fn get_availability_rule(&self, availability_rule_id: &str) -> CronofyResult<Payload> {
        let path = format!("/{API_VERSION}/availability_rules/{availability_rule_id}");
        self.get(&path)
    }

    pub fn list_availability_rules(&self) -> CronofyResult<Payload> {
        self.get(&format!("/{API_VERSION}/availability_rules"))
    }

    pub fn create_availability_rule(&self, rule: &AvailabilityRule) -> CronofyResult<Payload> {
        self.post(&format!("/{API_VERSION}/availability_rules"), rule)
    }

    pub fn delete_availability_rule(&self, availability_rule_id: &str) -> CronofyResult<Payload> {
        self.delete(
            &format!("/{API_VERSION}/availability_rules/{availability_rule_id}"),
            &json!({}),
        )
    }
}
