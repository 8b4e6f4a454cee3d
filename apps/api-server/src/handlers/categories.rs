//! Category resource handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::RepoError;
use quill_core::domain::{Category, CategoryChanges};
use quill_core::ports::{BaseRepository, CategoryRepository};
use quill_shared::DeleteResponse;

use crate::middleware::{AppError, AppResult, Validated};
use crate::state::AppState;
use crate::validators::{CategoryCreate, CategoryUpdate};

fn not_found() -> AppError {
    AppError::NotFound("Category not found".to_string())
}

fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| not_found())
}

fn missing_as_not_found(err: RepoError) -> AppError {
    match err {
        RepoError::NotFound => not_found(),
        other => other.into(),
    }
}

/// GET /api/categories
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let categories = state.categories.list_by_name().await?;
    Ok(HttpResponse::Ok().json(categories))
}

/// GET /api/categories/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let category = state
        .categories
        .find_by_id(id)
        .await?
        .ok_or_else(not_found)?;

    Ok(HttpResponse::Ok().json(category))
}

/// POST /api/categories
pub async fn create(
    state: web::Data<AppState>,
    input: Validated<CategoryCreate>,
) -> AppResult<HttpResponse> {
    let req = input.body;

    let category = Category::new(&req.name, req.description, req.color);
    category.validate()?;

    let saved = state.categories.create(category).await?;
    tracing::info!(category_id = %saved.id, slug = %saved.slug, "Category created");

    Ok(HttpResponse::Created().json(saved))
}

/// PUT /api/categories/{id}
pub async fn update(
    state: web::Data<AppState>,
    input: Validated<CategoryUpdate>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&input.params.id)?;
    let req = input.body;

    let mut category = state
        .categories
        .find_by_id(id)
        .await?
        .ok_or_else(not_found)?;
    category.apply(CategoryChanges {
        name: req.name,
        description: req.description,
        color: req.color,
    });
    category.validate()?;

    let saved = state
        .categories
        .update(category)
        .await
        .map_err(missing_as_not_found)?;

    Ok(HttpResponse::Ok().json(saved))
}

/// DELETE /api/categories/{id}
///
/// Posts keep their references; population drops them.
pub async fn delete(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;

    state
        .categories
        .delete(id)
        .await
        .map_err(missing_as_not_found)?;

    Ok(HttpResponse::Ok().json(DeleteResponse::new("Category deleted successfully")))
}
