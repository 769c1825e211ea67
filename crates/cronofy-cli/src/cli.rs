//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// cronofy - query the Cronofy calendar API from the terminal
#[derive(Debug, Parser)]
#[command(name = "cronofy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "CRONOFY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Data center suffix (de, uk, au, ca, sg); overrides the config file
    #[arg(long, env = "CRONOFY_DATA_CENTER")]
    pub data_center: Option<String>,

    /// Request timeout in seconds; overrides the config file
    #[arg(long)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// OAuth authorization and token management
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },

    /// Show the authenticated account
    Account,

    /// Show userinfo for the authenticated account
    Userinfo,

    /// List calendar profiles
    Profiles,

    /// List calendars
    Calendars,

    /// List push notification channels
    Channels,

    /// List resources
    Resources,

    /// List events across all pages
    Events(ListArgs),

    /// List free/busy periods across all pages
    FreeBusy(ListArgs),

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// OAuth actions.
#[derive(Debug, Subcommand)]
pub enum AuthAction {
    /// Print the URL a user visits to authorize this application
    Url {
        /// Where the authorization decision is redirected to
        #[arg(long)]
        redirect_uri: String,

        /// Scope to request (can be repeated)
        #[arg(long = "scope", action = clap::ArgAction::Append, required = true)]
        scopes: Vec<String>,

        /// Opaque value returned with the decision
        #[arg(long)]
        state: Option<String>,

        /// Avoid linking calendar accounts together
        #[arg(long)]
        avoid_linking: bool,

        /// Open the URL in the default browser
        #[arg(long)]
        open: bool,
    },

    /// Exchange an authorization code for tokens and save them
    Token {
        /// Code received on the redirect URI
        #[arg(long)]
        code: String,

        /// The redirect URI used to obtain the code
        #[arg(long)]
        redirect_uri: String,
    },

    /// Refresh the access token and save it
    Refresh,

    /// Revoke the stored refresh token
    Revoke,

    /// Show which credentials are configured
    Status,
}

/// Filters shared by paged listings.
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Time zone identifier for the results
    #[arg(long, default_value = "Etc/UTC")]
    pub tzid: String,

    /// Earliest date to include (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Latest date to include (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Restrict to these calendars (can be repeated)
    #[arg(long = "calendar-id", action = clap::ArgAction::Append)]
    pub calendar_ids: Vec<String>,

    /// Include events managed by this application
    #[arg(long)]
    pub include_managed: bool,

    /// Stop after this many items
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_events_filters() {
        let cli = Cli::parse_from([
            "cronofy",
            "events",
            "--tzid",
            "Europe/London",
            "--calendar-id",
            "cal_1",
            "--calendar-id",
            "cal_2",
            "--limit",
            "10",
        ]);
        let Command::Events(args) = cli.command else {
            panic!("expected events command");
        };
        assert_eq!(args.tzid, "Europe/London");
        assert_eq!(args.calendar_ids, vec!["cal_1", "cal_2"]);
        assert_eq!(args.limit, Some(10));
        assert!(!args.include_managed);
    }

    #[test]
    fn parses_auth_url() {
        let cli = Cli::parse_from([
            "cronofy",
            "--data-center",
            "de",
            "auth",
            "url",
            "--redirect-uri",
            "http://localhost/cb",
            "--scope",
            "read_account",
            "--scope",
            "list_calendars",
        ]);
        assert_eq!(cli.data_center.as_deref(), Some("de"));
        let Command::Auth {
            action: AuthAction::Url { scopes, open, .. },
        } = cli.command
        else {
            panic!("expected auth url command");
        };
        assert_eq!(scopes, vec!["read_account", "list_calendars"]);
        assert!(!open);
    }

    #[test]
    fn auth_url_requires_scope() {
        let result = Cli::try_parse_from(["cronofy", "auth", "url", "--redirect-uri", "http://x"]);
        assert!(result.is_err());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
