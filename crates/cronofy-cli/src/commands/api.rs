//! Read-only API commands.

use std::io::Write;

use cronofy_api::{Cronofy, CronofyResult, Payload, QueryParams, Transport};
use tracing::debug;

use crate::cli::ListArgs;
use crate::error::ClientResult;

use super::{print_json, print_payload};

/// Single-response resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Account,
    UserInfo,
    Profiles,
    Calendars,
    Channels,
    Resources,
}

/// Fetches one resource and prints it.
pub fn show<T: Transport>(
    cronofy: &Cronofy<T>,
    resource: Resource,
    out: &mut impl Write,
) -> ClientResult<()> {
    let payload: CronofyResult<Payload> = match resource {
        Resource::Account => cronofy.get_account(),
        Resource::UserInfo => cronofy.get_user_info(),
        Resource::Profiles => cronofy.get_profiles(),
        Resource::Calendars => cronofy.list_calendars(),
        Resource::Channels => cronofy.list_channels(),
        Resource::Resources => cronofy.resources(),
    };
    print_payload(out, &payload?)
}

/// Paged listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Events,
    FreeBusy,
}

/// Builds the query for a listing from the command-line filters.
pub fn list_query(listing: Listing, args: &ListArgs) -> QueryParams {
    let mut query = QueryParams::new().scalar("tzid", args.tzid.as_str());
    if let Some(ref from) = args.from {
        query.push("from", from.as_str());
    }
    if let Some(ref to) = args.to {
        query.push("to", to.as_str());
    }
    if !args.calendar_ids.is_empty() {
        query.push("calendar_ids", args.calendar_ids.clone());
    }
    if listing == Listing::Events && args.include_managed {
        query.push("include_managed", true);
    }
    query
}

/// Walks every page of a listing and prints one JSON document per item.
///
/// Returns the number of items printed.
pub fn list<T: Transport>(
    cronofy: &Cronofy<T>,
    listing: Listing,
    args: &ListArgs,
    out: &mut impl Write,
) -> ClientResult<usize> {
    let query = list_query(listing, args);
    let pages = match listing {
        Listing::Events => cronofy.read_events(&query)?,
        Listing::FreeBusy => cronofy.free_busy(&query)?,
    };

    let limit = args.limit.unwrap_or(usize::MAX);
    let mut count = 0;
    for item in pages.iter().take(limit) {
        print_json(out, &item?)?;
        count += 1;
    }
    debug!(count, key = pages.items_key(), "listing complete");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use cronofy_api::ClientConfig;
    use serde_json::json;

    use super::super::testing::ScriptedTransport;
    use super::*;

    fn args() -> ListArgs {
        ListArgs {
            tzid: "Etc/UTC".into(),
            from: None,
            to: None,
            calendar_ids: Vec::new(),
            include_managed: false,
            limit: None,
        }
    }

    fn client(transport: ScriptedTransport) -> Cronofy<ScriptedTransport> {
        let config = ClientConfig::new("id", "secret").with_access_token("token");
        Cronofy::with_transport(config, transport)
    }

    #[test]
    fn list_query_includes_filters() {
        let mut args = args();
        args.from = Some("2026-03-01".into());
        args.calendar_ids = vec!["cal_a".into(), "cal_b".into()];
        args.include_managed = true;

        assert_eq!(
            list_query(Listing::Events, &args).to_query_string(),
            concat!(
                "?tzid=Etc%2FUTC&from=2026-03-01",
                "&calendar_ids[]=cal_a&calendar_ids[]=cal_b&include_managed=true"
            )
        );
        assert_eq!(
            list_query(Listing::FreeBusy, &args).to_query_string(),
            "?tzid=Etc%2FUTC&from=2026-03-01&calendar_ids[]=cal_a&calendar_ids[]=cal_b"
        );
    }

    #[test]
    fn show_prints_account() {
        let transport = ScriptedTransport::default().reply(200, r#"{"account":{"name":"Ada"}}"#);
        let cronofy = client(transport);
        let mut out = Vec::new();
        show(&cronofy, Resource::Account, &mut out).unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("\"name\": \"Ada\""));
        assert_eq!(
            cronofy.pipeline().transport().urls.borrow()[0],
            "https://api.cronofy.com/v1/account"
        );
    }

    #[test]
    fn show_surfaces_api_errors() {
        let cronofy = client(ScriptedTransport::default().reply(401, ""));
        let err = show(&cronofy, Resource::Calendars, &mut Vec::new()).unwrap_err();
        assert_eq!(err.to_string(), "API error: Unauthorized (401)");
    }

    #[test]
    fn list_follows_pages_and_honours_limit() {
        let first = json!({
            "pages": {"next_page": "https://api.cronofy.com/v1/events/pages/2"},
            "events": [{"id": 1}, {"id": 2}]
        });
        let transport = ScriptedTransport::default()
            .reply(200, &first.to_string())
            .reply(200, r#"{"pages":{},"events":[{"id":3}]}"#);
        let cronofy = client(transport);

        let mut out = Vec::new();
        let count = list(&cronofy, Listing::Events, &args(), &mut out).unwrap();
        assert_eq!(count, 3);
        assert_eq!(cronofy.pipeline().transport().urls.borrow().len(), 2);

        let first = json!({
            "pages": {"next_page": "https://api.cronofy.com/v1/free_busy/pages/2"},
            "free_busy": [{"id": 1}, {"id": 2}]
        });
        let transport = ScriptedTransport::default().reply(200, &first.to_string());
        let cronofy = client(transport);
        let mut limited = args();
        limited.limit = Some(1);
        let count = list(&cronofy, Listing::FreeBusy, &limited, &mut Vec::new()).unwrap();
        assert_eq!(count, 1);
        assert_eq!(cronofy.pipeline().transport().urls.borrow().len(), 1);
    }
}
