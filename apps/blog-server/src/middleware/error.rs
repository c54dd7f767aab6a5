//! Error handling - HTML error pages built from RFC 7807 problem details.

use actix_web::{HttpResponse, ResponseError, http::StatusCode, http::header::ContentType};
use blog_core::DomainError;
use blog_shared::ErrorResponse;
use std::fmt;
use tera::{Context, Tera};

use crate::render::ERROR_PAGE;

/// Application-level error type that converts to an HTML error page.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl AppError {
    fn problem(&self) -> ErrorResponse {
        match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Internal(_) => ErrorResponse::internal_error(),
        }
    }

    /// The HTML error page, stamped with `request_id` when one is known.
    pub fn error_page(&self, request_id: Option<&str>) -> HttpResponse {
        let mut problem = self.problem();
        if let Some(id) = request_id {
            problem = problem.with_request_id(id);
        }

        let (content_type, body) = render_problem(&problem);
        HttpResponse::build(self.status_code())
            .content_type(content_type)
            .body(body)
    }
}

/// Render the error page, falling back to plain text if the template fails.
fn render_problem(problem: &ErrorResponse) -> (ContentType, String) {
    let page = Context::from_serialize(problem)
        .and_then(|context| Tera::one_off(ERROR_PAGE, &context, true));

    match page {
        Ok(html) => (ContentType::html(), html),
        Err(e) => {
            tracing::error!("Failed to render error page: {}", e);
            (
                ContentType::plaintext(),
                format!("{} {}", problem.status, problem.title),
            )
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Internal(detail) = self {
            // Log internal errors; the page itself stays generic.
            tracing::error!("Internal error: {}", detail);
        }
        self.error_page(None)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { .. } => AppError::NotFound(err.to_string()),
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::Storage(msg) => {
                tracing::error!("Storage error: {}", msg);
                AppError::Internal("Storage error".to_string())
            }
        }
    }
}

impl From<tera::Error> for AppError {
    fn from(err: tera::Error) -> Self {
        AppError::Internal(format!("template rendering failed: {err:?}"))
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
