//! Channel locators
//!
//! Clients refer to a channel by the URL they fetched it from, e.g.
//! `/api/channel-data?path=Data/a.json` or the same with a scheme and host.
//! The stored path is that URL's `path` query parameter.

use url::Url;

/// Extract the stored path from a channel locator URL.
///
/// Returns `None` when the locator does not parse or carries no non-empty
/// `path` parameter.
pub fn stored_path(locator: &str) -> Option<String> {
    let base = Url::parse("http://localhost/").ok()?;
    let url = base.join(locator).ok()?;

    url.query_pairs()
        .find(|(key, _)| key == "path")
        .map(|(_, value)| value.into_owned())
        .filter(|path| !path.is_empty())
}
