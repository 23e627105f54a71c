//! POSIX path helpers for remote `/`-rooted paths.
//!
//! Pure string manipulation; nothing here touches the agent.

/// Filesystem root.
pub const ROOT: &str = "/";

/// Child `name` of `dir`.
#[must_use]
pub fn join(dir: &str, name: &str) -> String {
    if dir == ROOT || dir.is_empty() {
        format!("/{name}")
    } else {
        format!("{}/{name}", dir.trim_end_matches('/'))
    }
}

/// Directory containing `path`; `/` for top-level entries.
#[must_use]
pub fn parent_of(path: &str) -> String {
    match path.trim_end_matches('/').rfind('/') {
        Some(0) | None => ROOT.to_string(),
        Some(index) => path[..index].to_string(),
    }
}

/// Last segment of `path`.
#[must_use]
pub fn basename(path: &str) -> &str {
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
}

/// `path` with its last segment removed; `/` stays `/`.
#[must_use]
pub fn navigate_up(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|part| !part.is_empty()).collect();
    match segments.split_last() {
        Some((_, rest)) if !rest.is_empty() => format!("/{}", rest.join("/")),
        _ => ROOT.to_string(),
    }
}

/// `path` anchored at `/`, with empty segments dropped.
#[must_use]
pub fn normalize(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|part| !part.is_empty()).collect();
    format!("/{}", segments.join("/"))
}

/// One clickable segment of the breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    /// Text shown for the segment (`Root` for `/`).
    pub label: String,
    /// Absolute path the segment jumps to.
    pub path: String,
}

/// Breadcrumb trail for `path`, starting at `Root`.
#[must_use]
pub fn breadcrumbs(path: &str) -> Vec<Breadcrumb> {
    let mut crumbs = vec![Breadcrumb {
        label: "Root".to_string(),
        path: ROOT.to_string(),
    }];
    let mut accumulated = String::new();
    for part in path.split('/').filter(|part| !part.is_empty()) {
        accumulated.push('/');
        accumulated.push_str(part);
        crumbs.push(Breadcrumb {
            label: part.to_string(),
            path: accumulated.clone(),
        });
    }
    crumbs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_anchors_at_root() {
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize("srv"), "/srv");
        assert_eq!(normalize("srv//world/"), "/srv/world");
        assert_eq!(normalize("/srv/world"), "/srv/world");
    }

    #[test]
    fn join_handles_root() {
        assert_eq!(join("/", "srv"), "/srv");
        assert_eq!(join("/srv", "world"), "/srv/world");
        assert_eq!(join("/srv/", "world"), "/srv/world");
    }

    #[test]
    fn navigate_up_pops_one_segment() {
        assert_eq!(navigate_up("/a/b/c"), "/a/b");
        assert_eq!(navigate_up("/a"), "/");
        assert_eq!(navigate_up("/"), "/");
    }

    #[test]
    fn parent_and_basename() {
        assert_eq!(parent_of("/srv/world/level.dat"), "/srv/world");
        assert_eq!(parent_of("/level.dat"), "/");
        assert_eq!(basename("/srv/world/level.dat"), "level.dat");
        assert_eq!(basename("/srv/world/"), "world");
    }

    #[test]
    fn breadcrumbs_accumulate_paths() {
        let crumbs = breadcrumbs("/srv/world");
        let paths: Vec<&str> = crumbs.iter().map(|crumb| crumb.path.as_str()).collect();
        assert_eq!(paths, vec!["/", "/srv", "/srv/world"]);
        assert_eq!(crumbs[0].label, "Root");
        assert_eq!(crumbs[2].label, "world");
        assert_eq!(breadcrumbs("/").len(), 1);
    }
}
