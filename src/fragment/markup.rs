//! Adapters over the marketplace's markup. Everything that depends on the
//! remote page structure lives here.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;

use crate::domain::{AuctionLookup, AuctionRecord, AuctionStatus, Candidate, IdentityVerdict};

static SCRIPT: Lazy<Selector> = Lazy::new(|| Selector::parse("script").expect("valid selector"));
static VALUE_CELL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"div[class*="tm-value"]"#).expect("valid selector"));
static INIT_CALL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)ajInit\((\{.*?\})\);").expect("valid ajInit regex"));

const NOT_FOUND: &str = "No Telegram users found.";
const PREMIUM_USER: &str = "This account is already subscribed to Telegram Premium.";
const CHANNEL: &str = "Please enter a username assigned to a user.";
const BAD_REQUEST: &str = "Bad request";

/// Finds the first `<script>` calling `ajInit({...});` and returns the
/// payload's `apiUrl`, a path relative to the site origin.
pub fn extract_api_path(landing_page: &str) -> Option<String> {
    let document = Html::parse_document(landing_page);
    let payload = document
        .select(&SCRIPT)
        .map(|script| script.text().collect::<String>())
        .find_map(|text| {
            INIT_CALL
                .captures(&text)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
        })?;

    let value: Value = serde_json::from_str(&payload).ok()?;
    value
        .get("apiUrl")
        .and_then(Value::as_str)
        .filter(|path| !path.is_empty())
        .map(str::to_string)
}

/// Reads an auction search fragment.
///
/// Contract with the remote markup: the first three elements whose class
/// contains `tm-value` are, in document order, the tag (`@name`), the price
/// and the status. Fewer than three is [`AuctionLookup::Empty`]; a tag that is
/// not `@` + candidate is [`AuctionLookup::Mismatch`].
pub fn parse_auction_fragment(html: &str, candidate: &Candidate) -> AuctionLookup {
    let fragment = Html::parse_fragment(html);
    let cells: Vec<String> = fragment
        .select(&VALUE_CELL)
        .take(3)
        .map(|cell| cell.text().collect::<String>().trim().to_string())
        .collect();

    let [tag, price, status] = match <[String; 3]>::try_from(cells) {
        Ok(cells) => cells,
        Err(_) => return AuctionLookup::Empty,
    };

    let record = AuctionRecord {
        tag,
        price,
        status: AuctionStatus::from_label(&status),
    };
    if !record.matches(candidate) {
        return AuctionLookup::Mismatch { tag: record.tag };
    }
    AuctionLookup::Record(record)
}

/// Maps the `error` field of a gift-recipient search to a verdict.
pub fn identity_verdict(error: Option<&str>) -> IdentityVerdict {
    match error {
        Some(NOT_FOUND) => IdentityVerdict::NotFound,
        Some(PREMIUM_USER) => IdentityVerdict::PremiumSubscriber,
        Some(CHANNEL) => IdentityVerdict::Channel,
        Some(message) if message.contains(BAD_REQUEST) => IdentityVerdict::BadRequest,
        _ => IdentityVerdict::Unknown,
    }
}
