use std::borrow::Cow;
use teaser_event_bus::EventBusError;
use teaser_kernel::store::StoreError;

/// Error types specific to the gating feature.
#[teaser_derive::teaser_error]
pub enum GatingError {
    /// Topic, category or user does not exist.
    #[error("Not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The forum store failed; nothing is retried.
    #[error("Forum store unavailable{}: {source}", format_context(.context))]
    Unavailable { source: StoreError, context: Option<Cow<'static, str>> },

    /// Request payload that cannot be stored as given.
    #[error("Invalid request{}: {message}", format_context(.context))]
    Invalid { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Forbidden{}: {message}", format_context(.context))]
    Forbidden { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Event bus error{}: {source}", format_context(.context))]
    Events { source: EventBusError, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal gating error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

#[cfg(feature = "server")]
mod response {
    use super::GatingError;
    use axum::Json;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use serde_json::json;
    use tracing::error;

    impl GatingError {
        #[must_use]
        pub const fn status(&self) -> StatusCode {
            match self {
                Self::NotFound { .. } => StatusCode::NOT_FOUND,
                Self::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
                Self::Invalid { .. } => StatusCode::BAD_REQUEST,
                Self::Forbidden { .. } => StatusCode::FORBIDDEN,
                Self::Events { .. } | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
    }

    impl IntoResponse for GatingError {
        fn into_response(self) -> Response {
            let status = self.status();
            if status.is_server_error() {
                error!(error = %self, "Request failed");
            }
            (status, Json(json!({ "error": self.to_string() }))).into_response()
        }
    }
}
