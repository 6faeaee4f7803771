//! HTTP surface: `/article` and `/article/:id`.

use poem::middleware::{Cors, Tracing};
use poem::{Endpoint, EndpointExt, Response, Route};
use poem_openapi::{ApiResponse, OpenApi, OpenApiService, param::Path, payload::Json};
use serde_json::Value;

use crate::entities::post::Post;
use crate::error::{ErrorBody, MessageBody, PostError};
use crate::store::PostStore;
use crate::validation::PostInput;

pub struct Api {
    store: PostStore,
}

impl Api {
    pub fn new(store: PostStore) -> Self {
        Self { store }
    }
}

#[OpenApi]
impl Api {
    /// List every post
    #[oai(path = "/article", method = "get")]
    async fn list_posts(&self) -> ListResponse {
        self.store
            .list()
            .await
            .map(|posts| ListResponse::Ok(Json(posts)))
            .unwrap_or_else(Into::into)
    }

    /// Fetch one post
    #[oai(path = "/article/:id", method = "get")]
    async fn get_post(&self, Path(id): Path<i32>) -> GetResponse {
        self.store
            .get(id)
            .await
            .map(|post| GetResponse::Ok(Json(post)))
            .unwrap_or_else(Into::into)
    }

    /// Create a post
    #[oai(path = "/article", method = "post")]
    async fn create_post(&self, Json(body): Json<Value>) -> CreateResponse {
        let created = match PostInput::parse(body) {
            Ok(post) => self.store.create(post).await,
            Err(err) => Err(err),
        };
        created
            .map(|post| CreateResponse::Created(Json(post)))
            .unwrap_or_else(Into::into)
    }

    /// Replace every field of a post
    #[oai(path = "/article/:id", method = "put")]
    async fn update_post(
        &self,
        Path(id): Path<i32>,
        Json(body): Json<Value>,
    ) -> UpdateResponse {
        let updated = match PostInput::parse(body) {
            Ok(post) => self.store.update(id, post).await,
            Err(err) => Err(err),
        };
        updated
            .map(|post| UpdateResponse::Ok(Json(post)))
            .unwrap_or_else(Into::into)
    }

    /// Delete a post
    #[oai(path = "/article/:id", method = "delete")]
    async fn delete_post(&self, Path(id): Path<i32>) -> DeleteResponse {
        self.store
            .delete(id)
            .await
            .map(|()| {
                DeleteResponse::Ok(Json(MessageBody {
                    message: "post deleted".to_string(),
                }))
            })
            .unwrap_or_else(Into::into)
    }
}

#[derive(ApiResponse)]
pub enum ListResponse {
    #[oai(status = 200)]
    Ok(Json<Vec<Post>>),
    #[oai(status = 500)]
    Internal(Json<ErrorBody>),
}

#[derive(ApiResponse)]
#[oai(bad_request_handler = "rejected")]
pub enum GetResponse {
    #[oai(status = 200)]
    Ok(Json<Post>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorBody>),
    #[oai(status = 404)]
    NotFound(Json<ErrorBody>),
    #[oai(status = 500)]
    Internal(Json<ErrorBody>),
}

#[derive(ApiResponse)]
#[oai(bad_request_handler = "rejected")]
pub enum CreateResponse {
    #[oai(status = 201)]
    Created(Json<Post>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorBody>),
    #[oai(status = 500)]
    Internal(Json<ErrorBody>),
}

#[derive(ApiResponse)]
#[oai(bad_request_handler = "rejected")]
pub enum UpdateResponse {
    #[oai(status = 200)]
    Ok(Json<Post>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorBody>),
    #[oai(status = 404)]
    NotFound(Json<ErrorBody>),
    #[oai(status = 500)]
    Internal(Json<ErrorBody>),
}

#[derive(ApiResponse)]
#[oai(bad_request_handler = "rejected")]
pub enum DeleteResponse {
    #[oai(status = 200)]
    Ok(Json<MessageBody>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorBody>),
    #[oai(status = 404)]
    NotFound(Json<ErrorBody>),
    #[oai(status = 500)]
    Internal(Json<ErrorBody>),
}

/// Picks the response variant from `PostError::status`; anything without a
/// listed variant is answered as 500.
macro_rules! impl_from_post_error {
    ($resp:ident { $($code:literal => $variant:ident),* }) => {
        impl From<PostError> for $resp {
            fn from(err: PostError) -> Self {
                let body = Json(err.body());
                match err.status().as_u16() {
                    $($code => $resp::$variant(body),)*
                    _ => $resp::Internal(body),
                }
            }
        }
    };
}

impl_from_post_error!(ListResponse {});
impl_from_post_error!(GetResponse { 400 => BadRequest, 404 => NotFound });
impl_from_post_error!(CreateResponse { 400 => BadRequest });
impl_from_post_error!(UpdateResponse { 400 => BadRequest, 404 => NotFound });
impl_from_post_error!(DeleteResponse { 400 => BadRequest, 404 => NotFound });

fn rejected<R: From<PostError>>(err: poem::Error) -> R {
    PostError::from_rejection(err).into()
}

/// Full application: the article API at the root, Swagger UI under `/docs`.
pub fn app(store: PostStore) -> impl Endpoint<Output = Response> {
    let api = OpenApiService::new(Api::new(store), "Article API", env!("CARGO_PKG_VERSION"));
    let ui = api.swagger_ui();
    let spec = api.spec_endpoint();

    Route::new()
        .at("/openapi.json", spec)
        .nest("/docs", ui)
        .nest("/", api)
        .with(Tracing)
        .with(Cors::new())
}

#[cfg(test)]
mod tests {
    use sea_orm::DbErr;

    use super::*;
    use crate::validation::ValidationError;

    #[test]
    fn error_variants_follow_status_mapping() {
        assert!(matches!(
            GetResponse::from(PostError::InvalidId),
            GetResponse::BadRequest(_)
        ));
        assert!(matches!(
            GetResponse::from(PostError::NotFound),
            GetResponse::NotFound(_)
        ));
        assert!(matches!(
            GetResponse::from(PostError::Store(DbErr::Custom("down".into()))),
            GetResponse::Internal(_)
        ));
        assert!(matches!(
            CreateResponse::from(PostError::Validation(ValidationError::TitleTooShort)),
            CreateResponse::BadRequest(_)
        ));
        assert!(matches!(
            CreateResponse::from(PostError::Rejected("EOF".into())),
            CreateResponse::BadRequest(_)
        ));
        assert!(matches!(
            ListResponse::from(PostError::Store(DbErr::Custom("down".into()))),
            ListResponse::Internal(_)
        ));
    }

    #[test]
    fn error_body_carries_message() {
        match DeleteResponse::from(PostError::NotFound) {
            DeleteResponse::NotFound(Json(body)) => assert_eq!(body.error, "post not found"),
            _ => panic!("expected not found"),
        }
    }
}
