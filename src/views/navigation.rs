//! The `search` query parameter and cross-view links.

use url::form_urlencoded;

/// Query parameter holding the selected entrant.
pub const SEARCH_PARAM: &str = "search";

/// Route of the bot statistics view.
pub const BOTS_ROUTE: &str = "/bots";

/// Read the `search` value from a query string (with or without a leading `?`).
///
/// An empty value counts as no search.
pub fn parse_search(query: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == SEARCH_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Query string for a selection; a cleared selection writes an empty value.
pub fn search_query(search: Option<&str>) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair(SEARCH_PARAM, search.unwrap_or(""))
        .finish()
}

/// Link to the bot statistics view filtered to `bot`.
pub fn bot_link(bot: &str) -> String {
    format!("{}/?{}", BOTS_ROUTE, search_query(Some(bot)))
}
