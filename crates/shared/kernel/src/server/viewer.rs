use super::ApiState;
use crate::store::ForumStore;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use teaser_domain::constants::VIEWER_HEADER;
use teaser_domain::models::{UserId, Viewer};
use tracing::{debug, warn};

/// The viewer of the current request, resolved from the `x-viewer-id` header.
///
/// Authentication belongs to the host platform; the header carries the id of
/// an already authenticated user. No header means an anonymous viewer.
#[derive(Debug, Clone, Default)]
pub struct CurrentViewer(pub Viewer);

/// Why a viewer could not be resolved.
#[derive(Debug)]
pub enum ViewerRejection {
    /// Header present but not a user id.
    Malformed,
    /// Header names a user the store does not know.
    UnknownUser(UserId),
    /// The store failed while looking the user up.
    Unavailable,
}

impl IntoResponse for ViewerRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Malformed => (StatusCode::BAD_REQUEST, format!("Invalid {VIEWER_HEADER} header")),
            Self::UnknownUser(id) => (StatusCode::UNAUTHORIZED, format!("Unknown user {id}")),
            Self::Unavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, "User lookup unavailable".to_owned())
            },
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl FromRequestParts<ApiState> for CurrentViewer {
    type Rejection = ViewerRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ApiState,
    ) -> Result<Self, Self::Rejection> {
        let Some(raw) = parts.headers.get(VIEWER_HEADER) else {
            return Ok(Self(Viewer::Anonymous));
        };

        let id = raw
            .to_str()
            .ok()
            .and_then(|value| value.trim().parse::<UserId>().ok())
            .ok_or(ViewerRejection::Malformed)?;

        match state.store.user(id) {
            Ok(Some(user)) => {
                debug!(user_id = id, "Viewer resolved");
                Ok(Self(Viewer::User(user)))
            },
            Ok(None) => Err(ViewerRejection::UnknownUser(id)),
            Err(err) => {
                warn!(user_id = id, error = %err, "Viewer lookup failed");
                Err(ViewerRejection::Unavailable)
            },
        }
    }
}
