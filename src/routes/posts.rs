//! Post API endpoints.

use crate::auth::middleware::{AppState, AuthClaims};
use crate::error::AppError;
use crate::models::MessageResponse;
use crate::storage;
use crate::storage::upload;
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::path::Path as FsPath;

/// Fields accepted by the post create/update multipart forms.
struct PostForm {
    description: String,
    /// Original file name and content of the optional "img" field.
    image: Option<(String, Vec<u8>)>,
}

/// Read the multipart form for a post mutation.
///
/// Accepts a "description" text field and an optional "img" file field;
/// unknown fields are ignored.
async fn read_post_form(
    mut multipart: Multipart,
    max_upload_bytes: usize,
) -> Result<PostForm, AppError> {
    let mut description: Option<String> = None;
    let mut image: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart: {}", e)))?
    {
        let name = field
            .name()
            .ok_or_else(|| AppError::BadRequest("Field missing name".to_string()))?
            .to_string();

        match name.as_str() {
            "description" => {
                description = Some(field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read description: {}", e))
                })?);
            }
            "img" => {
                let file_name = field
                    .file_name()
                    .ok_or_else(|| {
                        AppError::BadRequest("Image field missing file name".to_string())
                    })?
                    .to_string();
                let content = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read image: {}", e)))?
                    .to_vec();
                image = Some((file_name, content));
            }
            _ => {}
        }
    }

    let description =
        description.ok_or_else(|| AppError::BadRequest("Missing description".to_string()))?;

    if let Some((_, ref content)) = image {
        if content.len() > max_upload_bytes {
            return Err(AppError::BadRequest(format!(
                "Image too large: {} bytes exceeds limit of {} bytes",
                content.len(),
                max_upload_bytes
            )));
        }
    }

    Ok(PostForm { description, image })
}

/// Store the form's image, if any, and return its public URL.
async fn store_image(
    state: &AppState,
    image: Option<(String, Vec<u8>)>,
) -> Result<Option<String>, AppError> {
    match image {
        Some((file_name, content)) => {
            let stored_name = upload::save_upload(
                FsPath::new(&state.config.upload_dir),
                &file_name,
                &content,
            )
            .await
            .map_err(|e| match e {
                upload::UploadError::InvalidName(name) => {
                    AppError::BadRequest(format!("Invalid image file name: {}", name))
                }
                other => other.into(),
            })?;
            Ok(Some(upload::public_url(&stored_name)))
        }
        None => Ok(None),
    }
}

/// GET /posts — List all posts (token required)
pub async fn list_posts(
    AuthClaims(claims): AuthClaims,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!(username = %claims.username, "Listing posts");

    let posts = storage::post::list_posts(&state.db).await?;
    if posts.is_empty() {
        return Err(AppError::NotFound("No posts found".to_string()));
    }

    Ok(Json(posts))
}

/// POST /posts — Create a post from a multipart form
pub async fn create_post(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = read_post_form(multipart, state.config.max_upload_bytes).await?;
    let url = store_image(&state, form.image).await?;

    storage::post::insert_post(&state.db, &form.description, url.as_deref()).await?;

    tracing::info!(action = "post_created", has_image = url.is_some(), "Post created");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Post created successfully")),
    ))
}

/// PUT /posts/{id} — Update a post's description and optionally its image
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = read_post_form(multipart, state.config.max_upload_bytes).await?;
    let url = store_image(&state, form.image).await?;

    storage::post::update_post(&state.db, id, &form.description, url.as_deref()).await?;

    tracing::info!(action = "post_updated", post_id = id, "Post updated");

    Ok(Json(MessageResponse::new("Post updated successfully")))
}

/// DELETE /posts/{id} — Delete a post and its stored image
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let url = storage::post::get_post_url(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    storage::post::delete_post(&state.db, id).await?;

    // Remove the image file after the row; a leftover file is harmless,
    // a dangling url column is not.
    if let Some(stored_name) = url.as_deref().and_then(upload::stored_name_from_url) {
        let removed =
            upload::delete_upload(FsPath::new(&state.config.upload_dir), stored_name).await?;
        if !removed {
            tracing::warn!(post_id = id, file = %stored_name, "Image file already missing");
        }
    }

    tracing::info!(action = "post_deleted", post_id = id, "Post deleted");

    Ok(Json(MessageResponse::new("Post deleted successfully")))
}
