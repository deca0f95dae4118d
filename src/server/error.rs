//! Error responses for the site server

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::content::NotFound;
use crate::templates::TemplateRenderer;

/// Request-time failure
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// No record matches the requested slug, or no route matches
    #[error(transparent)]
    NotFound(#[from] NotFound),

    /// The requested path does not exist
    #[error("no page at {0}")]
    NoRoute(String),

    /// Template rendering failed
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) | Self::NoRoute(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn heading(&self) -> &'static str {
        match self {
            Self::NotFound(_) | Self::NoRoute(_) => "Not Found",
            Self::Internal(_) => "Internal Error",
        }
    }

    fn message(&self) -> String {
        match self {
            Self::NotFound(err) => format!("There is no {} called {:?}.", err.kind, err.slug),
            Self::NoRoute(path) => format!("Nothing lives at {}.", path),
            Self::Internal(_) => "Something went wrong while rendering this page.".to_string(),
        }
    }

    /// Render the error page, falling back to plain text
    pub fn into_page(self, templates: &TemplateRenderer) -> Response {
        let status = self.status();
        match &self {
            Self::Internal(err) => tracing::error!("Render error: {:#}", err),
            other => tracing::debug!("{}", other),
        }

        match templates.render_error(self.heading(), &self.message()) {
            Ok(html) => (status, Html(html)).into_response(),
            Err(err) => {
                tracing::error!("Error page failed to render: {:#}", err);
                (status, self.heading()).into_response()
            }
        }
    }
}
