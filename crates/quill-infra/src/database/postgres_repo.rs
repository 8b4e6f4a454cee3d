//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    Select,
};
use uuid::Uuid;

use quill_core::domain::{Category, Comment, PageRequest, Post, PostFilter, User};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, CategoryRepository, PostRepository, UserRepository};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, query_error, write_error};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

/// Full-text match over title, content and tags. Terms are OR-ed together.
const TEXT_SEARCH: &str = "to_tsvector('english', title || ' ' || content || ' ' || tags::text) \
     @@ replace(plainto_tsquery('english', $1)::text, '&', '|')::tsquery";

const CONTAINS_CATEGORY: &str = "categories @> $1::jsonb";

const APPEND_COMMENT: &str = "comments || $1::jsonb";

const REMOVE_COMMENT: &str = "COALESCE((SELECT jsonb_agg(c ORDER BY ord) \
     FROM jsonb_array_elements(comments) WITH ORDINALITY AS t(c, ord) \
     WHERE c->>'_id' <> $1), '[]'::jsonb)";

fn filtered(filter: &PostFilter) -> Select<PostEntity> {
    let mut query = PostEntity::find();

    if let Some(user_id) = &filter.user_id {
        query = query.filter(post::Column::UserId.eq(user_id.as_str()));
    }
    if let Some(category) = filter.category {
        query = query.filter(Expr::cust_with_values(
            CONTAINS_CATEGORY,
            [serde_json::json!([category])],
        ));
    }
    if let Some(status) = filter.status {
        query = query.filter(post::Column::Status.eq(post::Status::from(status)));
    }
    if let Some(search) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
        query = query.filter(Expr::cust_with_values(TEXT_SEARCH, [search.to_string()]));
    }

    query
}

fn masked(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{first}***@{domain}")
        }
        None => "***".to_string(),
    }
}

impl PostgresPostRepository {
    /// Run one atomic `UPDATE` against a single post and return the result.
    async fn update_in_place(
        &self,
        id: Uuid,
        column: post::Column,
        value: sea_orm::sea_query::SimpleExpr,
    ) -> Result<Option<Post>, RepoError> {
        let now: sea_orm::prelude::DateTimeWithTimeZone = chrono::Utc::now().into();

        let result = PostEntity::update_many()
            .col_expr(column, value)
            .col_expr(post::Column::UpdatedAt, Expr::value(now))
            .filter(post::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(write_error)?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        BaseRepository::<Post, Uuid>::find_by_id(self, id).await
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_page(
        &self,
        filter: &PostFilter,
        page: PageRequest,
    ) -> Result<Vec<Post>, RepoError> {
        let result = filtered(filter)
            .order_by_desc(post::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError> {
        filtered(filter).count(&self.db).await.map_err(query_error)
    }

    async fn save_edits(&self, edited: Post) -> Result<Option<Post>, RepoError> {
        let id = edited.id;
        let now: sea_orm::prelude::DateTimeWithTimeZone = chrono::Utc::now().into();

        let result = PostEntity::update_many()
            .col_expr(post::Column::Title, Expr::value(edited.title))
            .col_expr(post::Column::Content, Expr::value(edited.content))
            .col_expr(post::Column::Excerpt, Expr::value(edited.excerpt))
            .col_expr(post::Column::FeaturedImage, Expr::value(edited.featured_image))
            .col_expr(
                post::Column::Categories,
                Expr::value(post::CategoryIds(edited.categories)),
            )
            .col_expr(post::Column::Tags, Expr::value(post::Tags(edited.tags)))
            .col_expr(
                post::Column::Status,
                Expr::value(post::Status::from(edited.status)),
            )
            .col_expr(post::Column::UpdatedAt, Expr::value(now))
            .filter(post::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(write_error)?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        BaseRepository::<Post, Uuid>::find_by_id(self, id).await
    }

    async fn increment_views(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        self.update_in_place(
            id,
            post::Column::Views,
            Expr::col(post::Column::Views).add(1),
        )
        .await
    }

    async fn increment_likes(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        self.update_in_place(
            id,
            post::Column::Likes,
            Expr::col(post::Column::Likes).add(1),
        )
        .await
    }

    async fn push_comment(&self, id: Uuid, comment: Comment) -> Result<Option<Post>, RepoError> {
        let appended = serde_json::to_value([&comment])
            .map_err(|e| RepoError::Query(e.to_string()))?;

        tracing::debug!(post_id = %id, comment_id = %comment.id, "Appending comment");
        self.update_in_place(
            id,
            post::Column::Comments,
            Expr::cust_with_values(APPEND_COMMENT, [appended]),
        )
        .await
    }

    async fn pull_comment(&self, id: Uuid, comment_id: Uuid) -> Result<Option<Post>, RepoError> {
        tracing::debug!(post_id = %id, comment_id = %comment_id, "Removing comment");
        self.update_in_place(
            id,
            post::Column::Comments,
            Expr::cust_with_values(REMOVE_COMMENT, [comment_id.to_string()]),
        )
        .await
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn list_by_name(&self) -> Result<Vec<Category>, RepoError> {
        let result = CategoryEntity::find()
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<Category>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = CategoryEntity::find()
            .filter(category::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %masked(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find()
            .filter(
                Condition::any()
                    .add(user::Column::Email.eq(email))
                    .add(user::Column::Username.eq(username)),
            )
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }
}
