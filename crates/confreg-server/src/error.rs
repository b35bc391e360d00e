// Error handling for the HTTP layer
// Maps registry and request errors onto status codes and error envelopes

use std::fmt::{Display, Formatter};

use actix_web::HttpResponse;

pub use confreg_common::error::{
    CONCURRENT_MODIFICATION, DATA_ACCESS_ERROR, MEDIA_TYPE_ERROR, PARAMETER_MISSING,
    PARAMETER_VALIDATE_ERROR, PARSING_DATA_FAILED, RESOURCE_CONFLICT, RESOURCE_NOT_FOUND,
    SERVER_ERROR,
};
pub use confreg_common::error::{ErrorCode, RegistryError};

use crate::model::response as common;

/// Request rejected before reaching a repository
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("invalid Content-Type header: {0}")]
    InvalidContentType(String),
    #[error("unsupported media type '{0}', expected application/json")]
    UnsupportedMediaType(String),
    #[error("malformed request body: {0}")]
    MalformedBody(String),
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
}

// Local wrapper for application errors to implement actix-web error handling
#[derive(Debug)]
pub struct AppError {
    inner: anyhow::Error,
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(value: anyhow::Error) -> Self {
        AppError { inner: value }
    }
}

impl From<RegistryError> for AppError {
    fn from(value: RegistryError) -> Self {
        AppError {
            inner: value.into(),
        }
    }
}

impl From<RequestError> for AppError {
    fn from(value: RequestError) -> Self {
        AppError {
            inner: value.into(),
        }
    }
}

impl AppError {
    pub fn downcast_ref<E: std::error::Error + Send + Sync + 'static>(&self) -> Option<&E> {
        self.inner.downcast_ref::<E>()
    }

    fn status_and_code(&self) -> (u16, ErrorCode<'static>) {
        if let Some(e) = self.downcast_ref::<RegistryError>() {
            let status = match e {
                RegistryError::NotFound { .. } => 404,
                RegistryError::AlreadyExists { .. } => 409,
                RegistryError::ConcurrentModification { .. } => 409,
                RegistryError::InvalidArgument(_) => 400,
                RegistryError::Decode { .. } => 500,
                RegistryError::StoreUnavailable(_) => 503,
            };
            return (status, e.code());
        }

        if let Some(e) = self.downcast_ref::<RequestError>() {
            return match e {
                RequestError::InvalidContentType(_) => (400, PARAMETER_VALIDATE_ERROR),
                RequestError::UnsupportedMediaType(_) => (415, MEDIA_TYPE_ERROR),
                RequestError::MalformedBody(_) => (400, PARAMETER_VALIDATE_ERROR),
                RequestError::MissingField(_) => (400, PARAMETER_MISSING),
            };
        }

        (500, SERVER_ERROR)
    }
}

impl actix_web::error::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        let (status, _) = self.status_and_code();
        actix_web::http::StatusCode::from_u16(status)
            .unwrap_or(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let (status, code) = self.status_and_code();
        common::Result::<String>::http_response(
            status,
            code.code,
            self.inner.to_string(),
            String::new(),
        )
    }
}
