//! Authorization URLs for the OAuth consent flow.
//!
//! These are pure string builders; nothing is sent. The user is directed to
//! the returned URL and comes back to `redirect_uri` with a `code` that
//! [`Cronofy::request_token`](crate::Cronofy::request_token) exchanges.

use url::form_urlencoded;

/// Parameters of the standard authorization URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorizationParams {
    pub redirect_uri: String,
    pub scope: Vec<String>,
    /// Returned unaltered alongside the authorization decision.
    pub state: Option<String>,
    /// Avoid linking calendar accounts together under one set of credentials.
    pub avoid_linking: bool,
    /// Explicitly link to a pre-existing account.
    pub link_token: Option<String>,
    /// Scopes the account may grant on to its users.
    pub delegated_scope: Vec<String>,
}

impl AuthorizationParams {
    pub fn new<I, S>(redirect_uri: impl Into<String>, scope: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            redirect_uri: redirect_uri.into(),
            scope: scope.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn with_avoid_linking(mut self, avoid_linking: bool) -> Self {
        self.avoid_linking = avoid_linking;
        self
    }

    pub fn with_link_token(mut self, link_token: impl Into<String>) -> Self {
        self.link_token = Some(link_token.into());
        self
    }

    pub fn with_delegated_scope<I, S>(mut self, scope: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.delegated_scope = scope.into_iter().map(Into::into).collect();
        self
    }
}

/// Parameters of the Enterprise Connect authorization URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnterpriseConnectParams {
    pub redirect_uri: String,
    pub scope: Vec<String>,
    pub delegated_scope: Vec<String>,
    pub state: Option<String>,
}

/// Builds `{app_root}/oauth/authorize?...`.
pub fn authorization_url(app_root: &str, client_id: &str, params: &AuthorizationParams) -> String {
    let mut url = base_url(
        app_root,
        "/oauth/authorize",
        client_id,
        &params.redirect_uri,
        &params.scope,
    );
    if let Some(state) = non_empty(&params.state) {
        push(&mut url, "state", &urlencoding::encode(state));
    }
    if params.avoid_linking {
        push(&mut url, "avoid_linking", "true");
    }
    if let Some(link_token) = non_empty(&params.link_token) {
        push(&mut url, "link_token", &urlencoding::encode(link_token));
    }
    if !params.delegated_scope.is_empty() {
        let delegated_scope = encode_scope(&params.delegated_scope);
        push(&mut url, "delegated_scope", &delegated_scope);
    }
    url
}

/// Builds `{app_root}/enterprise_connect/oauth/authorize?...`.
pub fn enterprise_connect_authorization_url(
    app_root: &str,
    client_id: &str,
    params: &EnterpriseConnectParams,
) -> String {
    let mut url = base_url(
        app_root,
        "/enterprise_connect/oauth/authorize",
        client_id,
        &params.redirect_uri,
        &params.scope,
    );
    let delegated_scope = encode_scope(&params.delegated_scope);
    push(&mut url, "delegated_scope", &delegated_scope);
    if let Some(state) = non_empty(&params.state) {
        push(&mut url, "state", &urlencoding::encode(state));
    }
    url
}

/// The client id is issued by Cronofy and goes in as is.
fn base_url(
    app_root: &str,
    path: &str,
    client_id: &str,
    redirect_uri: &str,
    scope: &[String],
) -> String {
    let redirect_uri: String = form_urlencoded::byte_serialize(redirect_uri.as_bytes()).collect();
    let scope = encode_scope(scope);
    format!(
        "{app_root}{path}?response_type=code&client_id={client_id}\
         &redirect_uri={redirect_uri}&scope={scope}"
    )
}

/// Space-joins scopes and percent-encodes the result (space as `%20`).
fn encode_scope(scope: &[String]) -> String {
    urlencoding::encode(&scope.join(" ")).into_owned()
}

fn push(url: &mut String, key: &str, value: &str) {
    url.push('&');
    url.push_str(key);
    url.push('=');
    url.push_str(value);
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const APP_ROOT: &str = "https://app.cronofy.com";
    const REDIRECT: &str = "http://yoursite.dev/oauth2/callback";

    #[test]
    fn standard_authorization_url() {
        let params = AuthorizationParams::new(REDIRECT, ["read_account", "list_calendars"]);
        insta::assert_snapshot!(
            authorization_url(APP_ROOT, "clientId", &params),
            @"https://app.cronofy.com/oauth/authorize?response_type=code&client_id=clientId&redirect_uri=http%3A%2F%2Fyoursite.dev%2Foauth2%2Fcallback&scope=read_account%20list_calendars"
        );
    }

    #[test]
    fn client_id_is_not_reencoded() {
        let params = AuthorizationParams::new(REDIRECT, ["read_events"]);
        let url = authorization_url(APP_ROOT, "app/123", &params);
        assert!(url.contains("&client_id=app/123&redirect_uri="));

        let enterprise = EnterpriseConnectParams {
            redirect_uri: REDIRECT.into(),
            scope: vec!["read_events".into()],
            ..EnterpriseConnectParams::default()
        };
        let url = enterprise_connect_authorization_url(APP_ROOT, "id%2Fkept", &enterprise);
        assert!(url.contains("&client_id=id%2Fkept&redirect_uri="));
    }

    #[test]
    fn delegated_scope_is_appended() {
        let params = AuthorizationParams::new(REDIRECT, ["read_account", "list_calendars"])
            .with_delegated_scope(["create_calendar", "read_free_busy"]);
        assert_eq!(
            authorization_url(APP_ROOT, "clientId", &params),
            "https://app.cronofy.com/oauth/authorize?response_type=code&client_id=clientId\
             &redirect_uri=http%3A%2F%2Fyoursite.dev%2Foauth2%2Fcallback\
             &scope=read_account%20list_calendars&delegated_scope=create_calendar%20read_free_busy"
        );
    }

    #[test]
    fn optional_parameters_in_order() {
        let params = AuthorizationParams::new(REDIRECT, ["read_events"])
            .with_state("csrf token")
            .with_avoid_linking(true)
            .with_link_token("lnk_1");
        let app_root = "https://app-de.cronofy.com";
        let url = authorization_url(app_root, "clientId", &params);
        assert!(url.starts_with(&format!("{app_root}/oauth/authorize?")));
        assert!(url.ends_with(concat!(
            "&scope=read_events&state=csrf%20token",
            "&avoid_linking=true&link_token=lnk_1"
        )));
    }

    #[test]
    fn empty_optionals_are_skipped() {
        let params = AuthorizationParams::new(REDIRECT, ["read_events"])
            .with_state("")
            .with_avoid_linking(false);
        let url = authorization_url(APP_ROOT, "clientId", &params);
        assert!(url.ends_with("&scope=read_events"));
    }

    #[test]
    fn enterprise_connect_url() {
        let params = EnterpriseConnectParams {
            redirect_uri: REDIRECT.into(),
            scope: vec!["service_account/accounts/manage".into()],
            delegated_scope: vec!["read_events".into(), "create_event".into()],
            state: Some("s/1".into()),
        };
        insta::assert_snapshot!(
            enterprise_connect_authorization_url(APP_ROOT, "clientId", &params),
            @"https://app.cronofy.com/enterprise_connect/oauth/authorize?response_type=code&client_id=clientId&redirect_uri=http%3A%2F%2Fyoursite.dev%2Foauth2%2Fcallback&scope=service_account%2Faccounts%2Fmanage&delegated_scope=read_events%20create_event&state=s%2F1"
        );
    }
}
