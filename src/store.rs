//! Persistence for posts. One statement per operation, no transactions.

use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::entities::post::{ActiveModel, Column, Entity as Posts, Post};
use crate::error::{PostError, PostResult};
use crate::validation::NewPost;

/// Handle to the `posts` table. Clones share the same connection pool.
#[derive(Clone, Debug)]
pub struct PostStore {
    db: DatabaseConnection,
}

impl PostStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> PostResult<Vec<Post>> {
        Posts::find()
            .order_by_asc(Column::Id)
            .into_partial_model::<Post>()
            .all(&self.db)
            .await
            .map_err(|e| store_fault("list", e))
    }

    pub async fn get(&self, id: i32) -> PostResult<Post> {
        let found = Posts::find_by_id(id)
            .into_partial_model::<Post>()
            .one(&self.db)
            .await
            .map_err(|e| store_fault("get", e))?;
        found.ok_or_else(|| not_found("get", id))
    }

    pub async fn create(&self, input: NewPost) -> PostResult<Post> {
        let am = active_model(&input);
        let res = Posts::insert(am)
            .exec(&self.db)
            .await
            .map_err(|e| store_fault("create", e))?;
        tracing::info!(id = res.last_insert_id, "post created");
        Ok(input.into_post(res.last_insert_id))
    }

    /// Overwrites every mutable field. The returned post echoes the input;
    /// the row is not read back.
    pub async fn update(&self, id: i32, input: NewPost) -> PostResult<Post> {
        let res = Posts::update_many()
            .set(active_model(&input))
            .col_expr(Column::UpdatedDate, Expr::current_timestamp().into())
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| store_fault("update", e))?;
        if res.rows_affected == 0 {
            return Err(not_found("update", id));
        }
        tracing::info!(id, "post updated");
        Ok(input.into_post(id))
    }

    pub async fn delete(&self, id: i32) -> PostResult<()> {
        let res = Posts::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| store_fault("delete", e))?;
        if res.rows_affected == 0 {
            return Err(not_found("delete", id));
        }
        tracing::info!(id, "post deleted");
        Ok(())
    }
}

fn active_model(input: &NewPost) -> ActiveModel {
    ActiveModel {
        title: Set(input.title.clone()),
        content: Set(input.content.clone()),
        category: Set(input.category.clone()),
        status: Set(input.status),
        ..Default::default()
    }
}

fn not_found(op: &str, id: i32) -> PostError {
    tracing::debug!(op, id, "post not found");
    PostError::NotFound
}

fn store_fault(op: &str, err: sea_orm::DbErr) -> PostError {
    tracing::error!(op, error = %err, "store fault");
    PostError::Store(err)
}
