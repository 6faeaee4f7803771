//! Failure taxonomy for the article operations and its HTTP mapping.

use poem::http::StatusCode;
use poem_openapi::Object;
use poem_openapi::error::ParsePathError;
use poem_openapi::error::ParseRequestPayloadError;
use sea_orm::DbErr;
use thiserror::Error;

use crate::validation::ValidationError;

pub type PostResult<T> = Result<T, PostError>;

#[derive(Debug, Error)]
pub enum PostError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request body could not be decoded.
    #[error("{0}")]
    Rejected(String),

    #[error("invalid post ID")]
    InvalidId,

    #[error("post not found")]
    NotFound,

    #[error("{0}")]
    Store(#[from] DbErr),
}

impl PostError {
    pub fn status(&self) -> StatusCode {
        match self {
            PostError::Validation(_) | PostError::Rejected(_) | PostError::InvalidId => {
                StatusCode::BAD_REQUEST
            }
            PostError::NotFound => StatusCode::NOT_FOUND,
            PostError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Classifies a request that poem-openapi refused before it reached a handler.
    pub fn from_rejection(err: poem::Error) -> Self {
        if err.is::<ParsePathError>() {
            return PostError::InvalidId;
        }
        match err.downcast_ref::<ParseRequestPayloadError>() {
            Some(payload) => PostError::Rejected(payload.reason.clone()),
            None => PostError::Rejected(err.to_string()),
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Object)]
pub struct MessageBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_each_kind_to_its_status() {
        let cases = [
            (PostError::Validation(ValidationError::Missing), StatusCode::BAD_REQUEST),
            (PostError::Rejected("EOF".into()), StatusCode::BAD_REQUEST),
            (PostError::InvalidId, StatusCode::BAD_REQUEST),
            (PostError::NotFound, StatusCode::NOT_FOUND),
            (
                PostError::Store(DbErr::Custom("connection refused".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.status(), status, "{err}");
        }
    }

    #[test]
    fn validation_message_is_passed_through() {
        let err = PostError::from(ValidationError::TitleTooShort);
        assert_eq!(err.body().error, "Title must be at least 20 characters");
    }

    #[test]
    fn not_found_message_is_fixed() {
        assert_eq!(PostError::NotFound.body().error, "post not found");
    }

    #[test]
    fn store_fault_echoes_driver_text() {
        let err = PostError::Store(DbErr::Custom("disk I/O error".into()));
        assert!(err.body().error.contains("disk I/O error"));
    }

    #[test]
    fn payload_rejection_keeps_decoder_reason() {
        let err = poem::Error::from(ParseRequestPayloadError {
            reason: "expected value at line 1 column 1".into(),
        });
        match PostError::from_rejection(err) {
            PostError::Rejected(reason) => assert_eq!(reason, "expected value at line 1 column 1"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn path_rejection_is_invalid_id() {
        let err = poem::Error::from(ParsePathError {
            name: "id".into(),
            reason: "invalid digit found in string".into(),
        });
        assert!(matches!(PostError::from_rejection(err), PostError::InvalidId));
    }
}
