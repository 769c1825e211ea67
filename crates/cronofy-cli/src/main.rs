//! cronofy CLI entry point.

use std::io::Write;
use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use cronofy_api::{ClientConfig, Cronofy, HttpTransport};
use cronofy_core::{TracingConfig, init_tracing};

use cronofy_cli::cli::{AuthAction, Cli, Command, ConfigAction};
use cronofy_cli::commands::api::{Listing, Resource};
use cronofy_cli::commands::{self, auth::UrlOptions};
use cronofy_cli::config::CliConfig;
use cronofy_cli::error::{ClientError, ClientResult};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match CliConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let tracing_config = if cli.debug || config.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::cli()
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("warning: {}", e);
    }

    match run(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, mut config: CliConfig) -> ClientResult<()> {
    if let Some(data_center) = cli.data_center {
        config.data_center = data_center;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout = timeout;
    }
    let config_path = cli.config.clone().unwrap_or_else(CliConfig::default_path);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Config { action } => match action {
            ConfigAction::Dump => commands::config::dump(&config, &config_path, &mut out),
            ConfigAction::Validate => commands::config::validate(&config, &mut out),
            ConfigAction::Path => commands::config::path(&config_path, &mut out),
        },
        Command::Auth { action } => {
            let api_config = config.to_api_config()?;
            match action {
                AuthAction::Status => commands::auth::status(&api_config, Utc::now(), &mut out),
                AuthAction::Url {
                    redirect_uri,
                    scopes,
                    state,
                    avoid_linking,
                    open,
                } => {
                    let options = UrlOptions {
                        redirect_uri,
                        scopes,
                        state,
                        avoid_linking,
                        open,
                    };
                    commands::auth::url(&connect(api_config)?, &options, &mut out)?;
                    Ok(())
                }
                AuthAction::Token { code, redirect_uri } => {
                    let mut cronofy = connect(api_config)?;
                    commands::auth::token(
                        &mut cronofy,
                        &code,
                        &redirect_uri,
                        &config_path,
                        &mut out,
                    )
                }
                AuthAction::Refresh => {
                    let mut cronofy = connect(api_config)?;
                    commands::auth::refresh(&mut cronofy, &config_path, &mut out)
                }
                AuthAction::Revoke => {
                    commands::auth::revoke(&connect(api_config)?, &config_path, &mut out)
                }
            }
        }
        Command::Events(args) => {
            let cronofy = authorized(&config)?;
            commands::api::list(&cronofy, Listing::Events, &args, &mut out)?;
            Ok(())
        }
        Command::FreeBusy(args) => {
            let cronofy = authorized(&config)?;
            commands::api::list(&cronofy, Listing::FreeBusy, &args, &mut out)?;
            Ok(())
        }
        Command::Account => show(&config, Resource::Account, &mut out),
        Command::Userinfo => show(&config, Resource::UserInfo, &mut out),
        Command::Profiles => show(&config, Resource::Profiles, &mut out),
        Command::Calendars => show(&config, Resource::Calendars, &mut out),
        Command::Channels => show(&config, Resource::Channels, &mut out),
        Command::Resources => show(&config, Resource::Resources, &mut out),
    }?;

    out.flush()?;
    Ok(())
}

fn show(config: &CliConfig, resource: Resource, out: &mut impl Write) -> ClientResult<()> {
    commands::api::show(&authorized(config)?, resource, out)
}

fn connect(config: ClientConfig) -> ClientResult<Cronofy<HttpTransport>> {
    Ok(Cronofy::new(config)?)
}

/// Builds a client that holds an access token, warning when it has expired.
fn authorized(config: &CliConfig) -> ClientResult<Cronofy<HttpTransport>> {
    let api_config = config.to_api_config()?;
    if api_config.access_token().is_none() {
        return Err(ClientError::AuthRequired(
            "no access token; run `cronofy auth url` then `cronofy auth token`".into(),
        ));
    }
    if api_config.is_token_expired(Utc::now()) {
        tracing::warn!("access token has expired; run `cronofy auth refresh`");
    }
    connect(api_config)
}
