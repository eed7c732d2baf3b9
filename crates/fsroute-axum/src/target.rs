//! Routing target backed by an axum [`Router`].

use axum::Router;
use fsroute_core::RoutingTarget;

/// Collects mounted routers and nests them into one [`Router`].
///
/// Mounting twice at the same path keeps the later router, matching the
/// route table's last-write-wins policy instead of panicking inside axum.
#[derive(Debug, Default)]
pub struct AxumTarget {
    mounts: Vec<(String, Router)>,
}

impl AxumTarget {
    /// Create an empty target.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount paths in first-mount order.
    #[must_use]
    pub fn mount_paths(&self) -> Vec<&str> {
        self.mounts.iter().map(|(path, _)| path.as_str()).collect()
    }

    /// Number of distinct mount paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mounts.len()
    }

    /// True if nothing was mounted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mounts.is_empty()
    }

    /// Build the application router.
    ///
    /// A router mounted at `/` (or an empty path) is merged at the root since
    /// axum does not nest there. Literal `{` and `}` in mount paths are
    /// escaped so file names are never read as path parameters. Mount paths
    /// with a segment starting with `:` or `*` cannot be expressed as an
    /// axum route and are skipped with a warning.
    ///
    /// # Panics
    ///
    /// Panics if two mounted routers register overlapping routes or a mount
    /// path does not start with `/`, as axum does for invalid nests.
    #[must_use]
    pub fn into_router(self) -> Router {
        self.mounts
            .into_iter()
            .fold(Router::new(), |router, (path, handler)| {
                if is_root(&path) {
                    return router.merge(handler);
                }
                match route_path(&path) {
                    Some(route) => router.nest(&route, handler),
                    None => {
                        tracing::warn!(
                            mount_path = %path,
                            "Mount path is not a valid route, skipping"
                        );
                        router
                    }
                }
            })
    }
}

impl RoutingTarget<Router> for AxumTarget {
    fn mount(&mut self, mount_path: &str, handler: Router) {
        if let Some((_, existing)) = self.mounts.iter_mut().find(|(path, _)| path == mount_path) {
            tracing::warn!(mount_path, "Handler already mounted, replacing");
            *existing = handler;
            return;
        }
        self.mounts.push((mount_path.to_owned(), handler));
    }
}

fn is_root(path: &str) -> bool {
    path.is_empty() || path == "/"
}

/// Escape a mount path for axum's route syntax.
///
/// Returns `None` for segments axum reserves (`:name`, `*name`).
fn route_path(mount_path: &str) -> Option<String> {
    if mount_path
        .split('/')
        .any(|segment| segment.starts_with(':') || segment.starts_with('*'))
    {
        return None;
    }
    Some(mount_path.replace('{', "{{").replace('}', "}}"))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use super::*;

    fn text_router(text: &'static str) -> Router {
        Router::new().route("/", get(move || async move { text }))
    }

    async fn get_text(router: Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_nests_at_mount_path() {
        let mut target = AxumTarget::new();
        target.mount("/api/users", text_router("users"));
        target.mount("/api/admin/audit", text_router("audit"));

        let router = target.into_router();

        assert_eq!(
            get_text(router.clone(), "/api/users").await,
            (StatusCode::OK, "users".to_owned())
        );
        assert_eq!(
            get_text(router.clone(), "/api/admin/audit").await,
            (StatusCode::OK, "audit".to_owned())
        );
        assert_eq!(get_text(router, "/api/other").await.0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_root_mount_is_merged() {
        let mut target = AxumTarget::new();
        target.mount("/", text_router("home"));

        let router = target.into_router();

        assert_eq!(
            get_text(router, "/").await,
            (StatusCode::OK, "home".to_owned())
        );
    }

    #[tokio::test]
    async fn test_duplicate_mount_keeps_later_handler() {
        let mut target = AxumTarget::new();
        target.mount("/api/a_b", text_router("first"));
        target.mount("/api/a_b", text_router("second"));

        assert_eq!(target.len(), 1);
        assert_eq!(target.mount_paths(), vec!["/api/a_b"]);

        let router = target.into_router();
        assert_eq!(
            get_text(router, "/api/a_b").await,
            (StatusCode::OK, "second".to_owned())
        );
    }

    #[tokio::test]
    async fn test_braces_in_mount_path_are_literal() {
        let mut target = AxumTarget::new();
        target.mount("/api/a{b", text_router("open"));
        target.mount("/api/{id}", text_router("literal"));

        let router = target.into_router();

        assert_eq!(
            get_text(router.clone(), "/api/a{b").await,
            (StatusCode::OK, "open".to_owned())
        );
        assert_eq!(
            get_text(router.clone(), "/api/{id}").await,
            (StatusCode::OK, "literal".to_owned())
        );
        assert_eq!(get_text(router, "/api/42").await.0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_reserved_segments_are_skipped() {
        let mut target = AxumTarget::new();
        target.mount("/api/:id", text_router("colon"));
        target.mount("/api/*rest", text_router("star"));
        target.mount("/api/users", text_router("users"));

        let router = target.into_router();

        assert_eq!(
            get_text(router, "/api/users").await,
            (StatusCode::OK, "users".to_owned())
        );
    }

    #[test]
    fn test_route_path_escaping() {
        assert_eq!(route_path("/api/users"), Some("/api/users".to_owned()));
        assert_eq!(route_path("/api/a{b}"), Some("/api/a{{b}}".to_owned()));
        assert_eq!(route_path("/api/:id"), None);
        assert_eq!(route_path("/api/v1/*rest"), None);
        assert_eq!(route_path("/api/a:b"), Some("/api/a:b".to_owned()));
    }

    #[test]
    fn test_empty_target_builds_router() {
        let target = AxumTarget::new();
        assert!(target.is_empty());
        let _router: Router = target.into_router();
    }
}
