//! Domain API clients, one per backend resource.
//!
//! Each client is a cheap clone over the shared [`Facade`](crate::Facade).
//! Endpoints are built here; query values are percent-encoded and paths are
//! passed through without normalization.

pub mod cluster;
pub mod files;
pub mod game_types;
pub mod health;
pub mod nodes;
pub mod servers;

pub use cluster::ClusterApi;
pub use files::{DirectoryListing, FilesApi};
pub use game_types::GameTypesApi;
pub use health::HealthApi;
pub use nodes::NodesApi;
pub use servers::{ServerFilters, ServersApi};

use url::form_urlencoded;

/// Append `pairs` to `path` as a percent-encoded query string.
pub(crate) fn with_query(path: &str, pairs: &[(&str, &str)]) -> String {
    if pairs.is_empty() {
        return path.to_string();
    }
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter().copied())
        .finish();
    format!("{path}?{query}")
}

pub(crate) const fn flag(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_values_are_encoded() {
        assert_eq!(
            with_query("/files", &[("path", "/srv/my world"), ("recursive", flag(false))]),
            "/files?path=%2Fsrv%2Fmy+world&recursive=false"
        );
    }

    #[test]
    fn no_pairs_leaves_path_untouched() {
        assert_eq!(with_query("/api/v1/nodes", &[]), "/api/v1/nodes");
    }
}
