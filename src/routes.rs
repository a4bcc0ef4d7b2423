//! Client Routes
//!
//! Every navigation is a full page load (so the server-side session gate
//! sees it); the app only decides which page to mount for the current URL.

use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Home,
    Login { next: Option<String>, error: Option<String> },
    Projects,
    Board(Uuid),
    NotFound,
}

/// Value of `key` in a `?a=b&c=d` query string
pub fn query_param(query: &str, key: &str) -> Option<String> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| percent_encoding::percent_decode_str(v).decode_utf8_lossy().into_owned())
        .filter(|v| !v.is_empty())
}

pub fn parse_route(path: &str, query: &str) -> Route {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        [] => Route::Home,
        ["login"] => Route::Login {
            next: query_param(query, "next"),
            error: query_param(query, "error"),
        },
        ["projects"] => Route::Projects,
        ["projects", id] => id.parse().map(Route::Board).unwrap_or(Route::NotFound),
        _ => Route::NotFound,
    }
}

/// Route for the page currently loaded in the browser
pub fn current_route() -> Route {
    let Some(location) = web_sys::window().map(|w| w.location()) else {
        return Route::NotFound;
    };
    let path = location.pathname().unwrap_or_default();
    let query = location.search().unwrap_or_default();
    parse_route(&path, &query)
}
