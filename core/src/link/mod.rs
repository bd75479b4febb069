//! Preview URL assembly.

use thiserror::Error;
use url::Url;

/// Query parameter carrying the secret. Part of the frontend validator contract.
pub const SECRET_PARAM: &str = "sanity-preview-secret";

/// Query parameter carrying the content path. Part of the frontend validator contract.
pub const PATHNAME_PARAM: &str = "sanity-preview-pathname";

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("cannot resolve route {route:?} against {base}: {source}")]
    Route {
        base: String,
        route: String,
        #[source]
        source: url::ParseError,
    },
}

/// Joins a resolved prefix and slug into the content path.
///
/// Trailing slashes on the prefix are trimmed so a prefix of `/blog/` does
/// not produce `/blog//hello`.
pub fn build_pathname(prefix: &str, slug: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        format!("/{slug}")
    } else {
        format!("{prefix}/{slug}")
    }
}

/// Resolves `route` against `base` and attaches the secret and pathname.
pub fn build_preview_url(
    base: &Url,
    route: &str,
    secret: &str,
    pathname: &str,
) -> Result<Url, LinkError> {
    let mut url = base.join(route).map_err(|source| LinkError::Route {
        base: base.to_string(),
        route: route.to_string(),
        source,
    })?;

    url.query_pairs_mut()
        .append_pair(SECRET_PARAM, secret)
        .append_pair(PATHNAME_PARAM, pathname);

    Ok(url)
}
