//! Content path resolution: slug lookup by dot-path and URL prefix selection.

use crate::types::{PreviewTypeConfig, UrlPrefix};
use serde_json::Value;

/// Looks up a string at a dot-separated `path` inside `document`.
///
/// Fail-closed: returns `None` for a missing document, an empty path, any
/// segment that does not exist, or a final value that is not a string.
/// Objects are entered by key and arrays by decimal index.
pub fn resolve_slug<'a>(document: Option<&'a Value>, path: &str) -> Option<&'a str> {
    let document = document?;
    if path.is_empty() {
        return None;
    }

    path.split('.')
        .try_fold(document, descend)
        .and_then(Value::as_str)
}

fn descend<'a>(current: &'a Value, segment: &str) -> Option<&'a Value> {
    match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

/// Computes the URL prefix for `document` under `type_config`.
///
/// Derived prefixes are evaluated on every call.
pub fn resolve_prefix(type_config: &PreviewTypeConfig, document: &Value) -> String {
    match &type_config.url_prefix {
        None => String::new(),
        Some(UrlPrefix::Static(prefix)) => prefix.clone(),
        Some(UrlPrefix::Derived(prefix_fn)) => prefix_fn(document),
    }
}

#[cfg(test)]
mod tests;
