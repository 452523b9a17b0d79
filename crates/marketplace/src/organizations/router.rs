use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::warn;

use super::listing::{OrganizationListState, OrganizationListView};
use super::repository::OrganizationRepository;
use crate::users::{SessionUser, UserId, UserType};

/// Directory lookups plus the placeholder used for empty owner cells.
pub struct OrganizationDirectory<R> {
    repository: Arc<R>,
    placeholder: String,
}

impl<R> OrganizationDirectory<R>
where
    R: OrganizationRepository + 'static,
{
    pub fn new(repository: Arc<R>, placeholder: impl Into<String>) -> Self {
        Self {
            repository,
            placeholder: placeholder.into(),
        }
    }

    /// An unreachable directory renders as an empty list rather than an error page.
    pub fn list(&self, session: Option<SessionUser>) -> OrganizationListView {
        let organizations = match self.repository.list_organizations() {
            Ok(organizations) => organizations,
            Err(err) => {
                warn!(error = %err, "organization directory fetch failed");
                Vec::new()
            }
        };
        let state = OrganizationListState::init(organizations, session);
        OrganizationListView::build(&state, &self.placeholder)
    }
}

/// No `viewer` means an anonymous visitor.
#[derive(Debug, Default, Deserialize)]
pub struct DirectoryQuery {
    #[serde(default)]
    pub viewer: Option<UserType>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl DirectoryQuery {
    fn session(self) -> Option<SessionUser> {
        let user_type = self.viewer?;
        Some(SessionUser {
            id: UserId(self.user_id.unwrap_or_default()),
            name: self.name.unwrap_or_default(),
            user_type,
        })
    }
}

pub fn organization_router<R>(directory: Arc<OrganizationDirectory<R>>) -> Router
where
    R: OrganizationRepository + 'static,
{
    Router::new()
        .route("/api/v1/organizations", get(list_handler::<R>))
        .with_state(directory)
}

pub(crate) async fn list_handler<R>(
    State(directory): State<Arc<OrganizationDirectory<R>>>,
    Query(query): Query<DirectoryQuery>,
) -> Response
where
    R: OrganizationRepository + 'static,
{
    let view = directory.list(query.session());
    (StatusCode::OK, axum::Json(view)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::organizations::domain::{OrganizationId, OrganizationSlim};
    use crate::organizations::repository::OrganizationRepositoryError;
    use crate::users::UserRef;
    use axum::http::Request;
    use tower::ServiceExt;

    struct FixedDirectory;

    impl OrganizationRepository for FixedDirectory {
        fn list_organizations(&self) -> Result<Vec<OrganizationSlim>, OrganizationRepositoryError> {
            Ok(vec![
                OrganizationSlim {
                    id: OrganizationId("o-2".to_string()),
                    legal_name: "Northwind Cooperative".to_string(),
                    owner: Some(UserRef {
                        id: UserId("u-2".to_string()),
                        name: "Jo Park".to_string(),
                    }),
                },
                OrganizationSlim {
                    id: OrganizationId("o-1".to_string()),
                    legal_name: "alder Analytics".to_string(),
                    owner: None,
                },
            ])
        }
    }

    struct OfflineDirectory;

    impl OrganizationRepository for OfflineDirectory {
        fn list_organizations(&self) -> Result<Vec<OrganizationSlim>, OrganizationRepositoryError> {
            Err(OrganizationRepositoryError::Unavailable("timeout".to_string()))
        }
    }

    async fn json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn anonymous_listing_hides_owners() {
        let router = organization_router(Arc::new(OrganizationDirectory::new(
            Arc::new(FixedDirectory),
            "-",
        )));
        let response = router
            .oneshot(
                Request::get("/api/v1/organizations")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json(response).await;
        assert_eq!(body["title"], "Digital Marketplace Organizations");
        assert_eq!(body["rows"][0]["legal_name"], "alder Analytics");
        assert!(body["rows"][0].get("owner").is_none());
        assert_eq!(body["head_cells"].as_array().map(Vec::len), Some(1));
        assert_eq!(body["actions"].as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn vendor_listing_shows_owners_and_actions() {
        let router = organization_router(Arc::new(OrganizationDirectory::new(
            Arc::new(FixedDirectory),
            "-",
        )));
        let response = router
            .oneshot(
                Request::get("/api/v1/organizations?viewer=VENDOR&user_id=u-7")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = json(response).await;
        assert_eq!(body["rows"][1]["owner"]["text"], "Jo Park");
        assert_eq!(body["rows"][1]["edit_link"], "/organizations/o-2/edit");
        assert_eq!(body["actions"][1]["dest"], "/users/u-7?tab=organizations");
    }

    #[tokio::test]
    async fn unavailable_directory_renders_empty() {
        let directory = Arc::new(OrganizationDirectory::new(Arc::new(OfflineDirectory), "-"));
        let response =
            list_handler::<OfflineDirectory>(State(directory), Query(DirectoryQuery::default()))
                .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = json(response).await;
        assert_eq!(body["rows"].as_array().map(Vec::len), Some(0));
    }
}
