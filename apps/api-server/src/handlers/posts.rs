//! Post resource handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::RepoError;
use quill_core::domain::{
    Comment, NewPost, PageRequest, Pagination, Post, PostChanges, PostFilter,
};
use quill_core::ports::{BaseRepository, CategoryRepository, PostRepository};
use quill_shared::DeleteResponse;
use quill_shared::dto::{PostListResponse, PostResponse};

use crate::middleware::{AppError, AppResult, Validated};
use crate::state::AppState;
use crate::validators::{CommentCreate, PostCreate, PostList, PostUpdate};

fn not_found() -> AppError {
    AppError::NotFound("Post not found".to_string())
}

/// Ids that do not parse cannot name a stored post.
fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| not_found())
}

fn missing_as_not_found(err: RepoError) -> AppError {
    match err {
        RepoError::NotFound => not_found(),
        other => other.into(),
    }
}

/// Both identity fields must be present and non-blank.
fn author(user_id: Option<String>, user_name: Option<String>) -> AppResult<(String, String)> {
    let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
    match (present(user_id), present(user_name)) {
        (Some(id), Some(name)) => Ok((id, name)),
        _ => Err(AppError::BadRequest(
            "User information is required".to_string(),
        )),
    }
}

fn page_number(raw: Option<String>) -> Option<u64> {
    raw.and_then(|s| s.trim().parse().ok())
}

/// Expand category ids on one post.
async fn populate(state: &AppState, post: Post) -> AppResult<PostResponse> {
    let categories = state.categories.find_many(&post.categories).await?;
    Ok(PostResponse::populated(post, &categories))
}

/// Expand category ids across a page with a single lookup.
async fn populate_all(state: &AppState, posts: Vec<Post>) -> AppResult<Vec<PostResponse>> {
    let mut ids: Vec<Uuid> = posts.iter().flat_map(|p| p.categories.iter().copied()).collect();
    ids.sort_unstable();
    ids.dedup();

    let categories = state.categories.find_many(&ids).await?;
    Ok(posts
        .into_iter()
        .map(|post| PostResponse::populated(post, &categories))
        .collect())
}

/// GET /api/posts
pub async fn list(
    state: web::Data<AppState>,
    input: Validated<PostList>,
) -> AppResult<HttpResponse> {
    let query = input.query;
    let page = PageRequest::new(page_number(query.page), page_number(query.limit));
    let filter = PostFilter {
        user_id: query.user_id,
        category: query.category,
        status: query.status,
        search: query.search.filter(|s| !s.trim().is_empty()),
    };

    let posts = state.posts.find_page(&filter, page).await?;
    let total = state.posts.count(&filter).await?;

    tracing::debug!(returned = posts.len(), total, page = page.page, "Listed posts");

    Ok(HttpResponse::Ok().json(PostListResponse {
        posts: populate_all(&state, posts).await?,
        pagination: Pagination::new(page, total),
    }))
}

/// GET /api/posts/{id} - counts a view before responding.
pub async fn get(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;

    let post = state.posts.increment_views(id).await?.ok_or_else(not_found)?;

    Ok(HttpResponse::Ok().json(populate(&state, post).await?))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    input: Validated<PostCreate>,
) -> AppResult<HttpResponse> {
    let req = input.body;
    let (user_id, user_name) = author(req.user_id, req.user_name)?;

    let post = Post::new(NewPost {
        user_id,
        user_email: req.user_email,
        user_name,
        title: req.title,
        content: req.content,
        excerpt: req.excerpt,
        featured_image: req.featured_image,
        categories: req.categories,
        tags: req.tags,
        status: req.status,
    });
    post.validate()?;

    let saved = state.posts.create(post).await?;
    tracing::info!(post_id = %saved.id, user_id = %saved.user_id, "Post created");

    Ok(HttpResponse::Created().json(populate(&state, saved).await?))
}

/// PUT /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    input: Validated<PostUpdate>,
) -> AppResult<HttpResponse> {
    let id = input.params.id;
    let req = input.body;

    let mut post = state.posts.find_by_id(id).await?.ok_or_else(not_found)?;
    post.apply(PostChanges {
        title: req.title,
        content: req.content,
        excerpt: req.excerpt,
        featured_image: req.featured_image,
        categories: req.categories,
        tags: req.tags,
        status: req.status,
    });
    post.validate()?;

    let saved = state.posts.save_edits(post).await?.ok_or_else(not_found)?;

    Ok(HttpResponse::Ok().json(populate(&state, saved).await?))
}

/// DELETE /api/posts/{id}
pub async fn delete(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;

    state.posts.delete(id).await.map_err(missing_as_not_found)?;
    tracing::info!(post_id = %id, "Post deleted");

    Ok(HttpResponse::Ok().json(DeleteResponse::new("Post deleted successfully")))
}

/// POST /api/posts/{id}/comments
pub async fn add_comment(
    state: web::Data<AppState>,
    input: Validated<CommentCreate>,
) -> AppResult<HttpResponse> {
    let id = input.params.id;
    let req = input.body;
    let (user_id, user_name) = author(req.user_id, req.user_name)?;

    let comment = Comment::new(user_id, user_name, &req.content);
    comment.validate()?;

    let post = state
        .posts
        .push_comment(id, comment)
        .await?
        .ok_or_else(not_found)?;

    Ok(HttpResponse::Created().json(populate(&state, post).await?))
}

/// DELETE /api/posts/{id}/comments/{comment_id}
///
/// Removing a comment that does not exist is not an error.
pub async fn delete_comment(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> AppResult<HttpResponse> {
    let (raw_id, raw_comment_id) = path.into_inner();
    let id = parse_id(&raw_id)?;

    let post = match Uuid::parse_str(&raw_comment_id) {
        Ok(comment_id) => state.posts.pull_comment(id, comment_id).await?,
        Err(_) => state.posts.find_by_id(id).await?,
    }
    .ok_or_else(not_found)?;

    Ok(HttpResponse::Ok().json(populate(&state, post).await?))
}

/// POST /api/posts/{id}/like
pub async fn like(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;

    let post = state.posts.increment_likes(id).await?.ok_or_else(not_found)?;

    Ok(HttpResponse::Ok().json(populate(&state, post).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_requires_both_fields() {
        assert!(author(Some("u1".into()), Some("Ada".into())).is_ok());
        assert!(author(Some("u1".into()), None).is_err());
        assert!(author(Some("   ".into()), Some("Ada".into())).is_err());
    }

    #[test]
    fn test_page_number_parsing() {
        assert_eq!(page_number(Some("3".into())), Some(3));
        assert_eq!(page_number(Some("abc".into())), None);
        assert_eq!(page_number(None), None);
    }
}
