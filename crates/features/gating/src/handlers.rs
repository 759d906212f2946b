//! HTTP surface of the teasing slice.

use crate::presentation::{
    CategoryListItem, CategoryTeaserView, TeaserStatus, TopicListItem, TopicView,
};
use crate::{GateOutcome, GatingError, Teaser, TeaserUpdate};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use teaser_derive::api_handler;
use teaser_kernel::domain::constants::{ADMIN_TAG, DEFAULT_TEASING_URL, TEASER_TAG};
use teaser_kernel::domain::models::{CategoryId, TopicId};
use teaser_kernel::server::{ApiState, CurrentViewer};
use utoipa_axum::router::OpenApiRouter;
use tracing::warn;
use utoipa_axum::routes;

/// Routes of the teasing slice.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(show_topic))
        .routes(routes!(latest))
        .routes(routes!(categories))
        .routes(routes!(update_category_teaser))
        .routes(routes!(teaser_status, set_teaser_status))
}

fn slice(state: &ApiState) -> Result<&Teaser, GatingError> {
    state.try_get_slice::<Teaser>().map_err(|e| GatingError::from(e.to_string()))
}

#[api_handler(
    get,
    path = "/t/{topic_id}",
    params(("topic_id" = u64, Path, description = "Topic id")),
    responses(
        (status = OK, description = "Topic the viewer may read", body = TopicView),
        (status = FOUND, description = "Topic is teased; see Location"),
        (status = NOT_FOUND, description = "Unknown topic"),
    ),
    tag = TEASER_TAG,
)]
pub(crate) async fn show_topic(
    State(state): State<ApiState>,
    CurrentViewer(viewer): CurrentViewer,
    Path(topic_id): Path<TopicId>,
) -> Result<Response, GatingError> {
    let teaser = slice(&state)?;
    let response = match teaser.show_topic(topic_id, &viewer)? {
        GateOutcome::Redirect(target) => {
            let location = HeaderValue::from_str(&target).unwrap_or_else(|_| {
                warn!(topic_id, %target, "Redirect target is not a valid header value");
                HeaderValue::from_static(DEFAULT_TEASING_URL)
            });
            (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
        },
        GateOutcome::Proceed(gated) => Json(teaser.topic_view(&gated, &viewer)).into_response(),
    };
    Ok(response)
}

#[api_handler(
    get,
    path = "/latest",
    responses((status = OK, description = "Topics visible to the viewer", body = [TopicListItem])),
    tag = TEASER_TAG,
)]
pub(crate) async fn latest(
    State(state): State<ApiState>,
    CurrentViewer(viewer): CurrentViewer,
) -> Result<Json<Vec<TopicListItem>>, GatingError> {
    Ok(Json(slice(&state)?.latest(&viewer)?))
}

#[api_handler(
    get,
    path = "/categories",
    responses((status = OK, description = "Categories visible to the viewer", body = [CategoryListItem])),
    tag = TEASER_TAG,
)]
pub(crate) async fn categories(
    State(state): State<ApiState>,
    CurrentViewer(viewer): CurrentViewer,
) -> Result<Json<Vec<CategoryListItem>>, GatingError> {
    Ok(Json(slice(&state)?.categories(&viewer)?))
}

#[api_handler(
    put,
    path = "/admin/categories/{category_id}/teaser",
    params(("category_id" = u64, Path, description = "Category id")),
    request_body = TeaserUpdate,
    responses(
        (status = OK, description = "Updated teasing settings", body = CategoryTeaserView),
        (status = BAD_REQUEST, description = "URL is not a valid redirect target"),
        (status = FORBIDDEN, description = "Admin access required"),
        (status = NOT_FOUND, description = "Unknown category"),
    ),
    tag = ADMIN_TAG,
)]
pub(crate) async fn update_category_teaser(
    State(state): State<ApiState>,
    CurrentViewer(viewer): CurrentViewer,
    Path(category_id): Path<CategoryId>,
    Json(update): Json<TeaserUpdate>,
) -> Result<Json<CategoryTeaserView>, GatingError> {
    Ok(Json(slice(&state)?.update_teaser_settings(category_id, &update, &viewer)?))
}

#[api_handler(
    get,
    path = "/admin/teaser",
    responses(
        (status = OK, description = "Global teasing flag", body = TeaserStatus),
        (status = FORBIDDEN, description = "Admin access required"),
    ),
    tag = ADMIN_TAG,
)]
pub(crate) async fn teaser_status(
    State(state): State<ApiState>,
    CurrentViewer(viewer): CurrentViewer,
) -> Result<Json<TeaserStatus>, GatingError> {
    Ok(Json(slice(&state)?.status(&viewer)?))
}

#[api_handler(
    put,
    path = "/admin/teaser",
    request_body = TeaserStatus,
    responses(
        (status = OK, description = "Global teasing flag after the change", body = TeaserStatus),
        (status = FORBIDDEN, description = "Admin access required"),
    ),
    tag = ADMIN_TAG,
)]
pub(crate) async fn set_teaser_status(
    State(state): State<ApiState>,
    CurrentViewer(viewer): CurrentViewer,
    Json(status): Json<TeaserStatus>,
) -> Result<Json<TeaserStatus>, GatingError> {
    Ok(Json(slice(&state)?.set_enabled(status.enabled, &viewer)?))
}
