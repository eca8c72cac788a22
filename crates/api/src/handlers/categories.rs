//! Handlers for categories: public listing plus admin CRUD and image
//! upload.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use campus_core::error::CoreError;
use campus_core::types::DbId;
use campus_core::uploads::image_extension;
use campus_db::models::category::{Category, CreateCategory, UpdateCategory};
use campus_db::repositories::CategoryRepo;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::handlers::uploads::{read_file_field, remove_stored_file, store_file, validate_image};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /api/v1/categories
///
/// Public category listing.
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(serde_json::json!({ "data": categories })))
}

/// POST /api/v1/admin/categories
///
/// A duplicate name surfaces as 409 via the uq_categories_name constraint.
pub async fn create_category(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<Category>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Category name must not be empty".into(),
        )));
    }
    let category = CategoryRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/v1/admin/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<Json<Category>> {
    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;
    Ok(Json(category))
}

/// DELETE /api/v1/admin/categories/{id}
///
/// Courses referencing the category keep running with a nulled category.
pub async fn delete_category(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;

    CategoryRepo::delete(&state.pool, id).await?;
    if let Some(path) = &category.image_path {
        remove_stored_file(&state.config.upload_dir, path).await;
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/categories/{id}/image
///
/// Multipart upload with a required `image` field; replaces any previous
/// category image.
pub async fn upload_image(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<Category>)> {
    let existing = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;

    let file = read_file_field(&mut multipart, "image").await?;
    validate_image(&file)?;

    let ext = image_extension(&file.content_type);
    let filename = format!("category_{id}_{}.{ext}", Uuid::new_v4());
    let public_path =
        store_file(&state.config.upload_dir, "categories", &filename, &file.data).await?;

    let category = CategoryRepo::set_image(&state.pool, id, Some(&public_path))
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;

    if let Some(old_path) = &existing.image_path {
        remove_stored_file(&state.config.upload_dir, old_path).await;
    }

    Ok((StatusCode::CREATED, Json(category)))
}
