//! Input rules shared by create and update.
//!
//! Rules run in a fixed order and stop at the first violation, so an input
//! breaking several rules always reports the earliest one.

use sea_orm::ActiveEnum;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use validator::ValidateLength;

use crate::entities::post::{Post, Status};
use crate::error::{PostError, PostResult};

pub const MIN_TITLE_LEN: u64 = 20;
pub const MIN_CONTENT_LEN: u64 = 200;
pub const MIN_CATEGORY_LEN: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing or invalid input")]
    Missing,
    #[error("Title must be at least 20 characters")]
    TitleTooShort,
    #[error("Content must be at least 200 characters")]
    ContentTooShort,
    #[error("Category must be at least 3 characters")]
    CategoryTooShort,
    #[error("Status must be either publish, draft, or trash")]
    InvalidStatus,
}

/// Request body for create and update. Absent fields decode as empty
/// strings, non-string values are a decode error, and an `id` sent by the
/// client is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PostInput {
    pub title: String,
    pub content: String,
    pub category: String,
    pub status: String,
}

/// A post that passed every rule and may be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub category: String,
    pub status: Status,
}

impl PostInput {
    /// Decodes a request body and runs the rules on it.
    pub fn parse(body: Value) -> PostResult<NewPost> {
        let input: PostInput =
            serde_json::from_value(body).map_err(|e| PostError::Rejected(e.to_string()))?;
        Ok(input.validate()?)
    }

    pub fn validate(self) -> Result<NewPost, ValidationError> {
        let fields = [&self.title, &self.content, &self.category, &self.status];
        if fields.iter().any(|field| field.is_empty()) {
            return Err(ValidationError::Missing);
        }
        if !self.title.validate_length(Some(MIN_TITLE_LEN), None, None) {
            return Err(ValidationError::TitleTooShort);
        }
        if !self.content.validate_length(Some(MIN_CONTENT_LEN), None, None) {
            return Err(ValidationError::ContentTooShort);
        }
        if !self.category.validate_length(Some(MIN_CATEGORY_LEN), None, None) {
            return Err(ValidationError::CategoryTooShort);
        }
        let status =
            Status::try_from_value(&self.status).map_err(|_| ValidationError::InvalidStatus)?;

        Ok(NewPost {
            title: self.title,
            content: self.content,
            category: self.category,
            status,
        })
    }
}

impl NewPost {
    pub fn into_post(self, id: i32) -> Post {
        Post {
            id,
            title: self.title,
            content: self.content,
            category: self.category,
            status: self.status,
        }
    }
}
