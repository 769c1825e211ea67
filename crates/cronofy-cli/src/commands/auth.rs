//! OAuth commands.
//!
//! Tokens issued by `token` and `refresh` are written back to the config
//! file so later invocations pick them up.

use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use cronofy_api::{AuthorizationParams, ClientConfig, Cronofy, TokenExchange, Transport};
use tracing::{info, warn};

use crate::config::save_tokens;
use crate::error::{ClientError, ClientResult};

/// Options for `auth url`.
#[derive(Debug, Clone)]
pub struct UrlOptions {
    pub redirect_uri: String,
    pub scopes: Vec<String>,
    pub state: Option<String>,
    pub avoid_linking: bool,
    pub open: bool,
}

/// Prints the authorization URL, optionally opening it in a browser.
pub fn url<T: Transport>(
    cronofy: &Cronofy<T>,
    options: &UrlOptions,
    out: &mut impl Write,
) -> ClientResult<String> {
    let mut params = AuthorizationParams::new(&options.redirect_uri, &options.scopes)
        .with_avoid_linking(options.avoid_linking);
    if let Some(ref state) = options.state {
        params = params.with_state(state);
    }

    let url = cronofy.authorization_url(&params);
    writeln!(out, "{}", url)?;

    if options.open {
        open::that(&url).map_err(|e| {
            ClientError::Action(format!("failed to open browser: {}", e))
        })?;
    }
    Ok(url)
}

/// Exchanges an authorization code and saves the resulting tokens.
pub fn token<T: Transport>(
    cronofy: &mut Cronofy<T>,
    code: &str,
    redirect_uri: &str,
    config_path: &Path,
    out: &mut impl Write,
) -> ClientResult<()> {
    let exchange = cronofy.request_token(code, redirect_uri)?;
    persist(cronofy.config(), exchange, config_path, out)
}

/// Refreshes the access token and saves it.
pub fn refresh<T: Transport>(
    cronofy: &mut Cronofy<T>,
    config_path: &Path,
    out: &mut impl Write,
) -> ClientResult<()> {
    if cronofy.config().refresh_token().is_none() {
        return Err(ClientError::AuthRequired(
            "no refresh token stored; run `cronofy auth token` first".into(),
        ));
    }
    let exchange = cronofy.refresh_token()?;
    persist(cronofy.config(), exchange, config_path, out)
}

/// Revokes the stored refresh token and removes the tokens from the config.
pub fn revoke<T: Transport>(
    cronofy: &Cronofy<T>,
    config_path: &Path,
    out: &mut impl Write,
) -> ClientResult<()> {
    let config = cronofy.config();
    let Some(token) = config.refresh_token().or(config.access_token()) else {
        return Err(ClientError::AuthRequired("no token to revoke".into()));
    };
    cronofy.revoke_authorization(token)?;

    let cleared = ClientConfig::new(config.client_id(), config.client_secret());
    save_tokens(config_path, &cleared)?;
    info!("authorization revoked");
    writeln!(out, "Authorization revoked.")?;
    Ok(())
}

/// Describes the configured credentials without calling the API.
pub fn status(config: &ClientConfig, now: DateTime<Utc>, out: &mut impl Write) -> ClientResult<()> {
    writeln!(out, "data center:   {}", config.data_center())?;
    writeln!(out, "client id:     {}", config.client_id())?;
    writeln!(out, "access token:  {}", presence(config.access_token()))?;
    writeln!(out, "refresh token: {}", presence(config.refresh_token()))?;
    match config.token_expires_at() {
        Some(at) if config.is_token_expired(now) => {
            writeln!(out, "expires:       {} (expired)", at.to_rfc3339())?
        }
        Some(at) => writeln!(out, "expires:       {}", at.to_rfc3339())?,
        None => writeln!(out, "expires:       unknown")?,
    }
    Ok(())
}

fn presence(value: Option<&str>) -> &'static str {
    if value.is_some() { "set" } else { "missing" }
}

fn persist(
    config: &ClientConfig,
    exchange: TokenExchange,
    config_path: &Path,
    out: &mut impl Write,
) -> ClientResult<()> {
    match exchange {
        TokenExchange::Granted(_) => {
            save_tokens(config_path, config)?;
            info!(path = %config_path.display(), "tokens saved");
            writeln!(out, "Tokens saved to {}", config_path.display())?;
            Ok(())
        }
        TokenExchange::Denied(reason) => {
            warn!(%reason, "token request denied");
            let message = format!("token request denied: {}", reason);
            Err(ClientError::AuthRequired(message))
        }
    }
}
