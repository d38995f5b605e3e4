use axum::{
    extract::{Path, State},
    Json,
};
use models::Post;
use service::PostRepository;

use crate::errors::ApiError;
use crate::routes::AppState;

/// All posts, in store order.
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<Post>>, ApiError> {
    Ok(Json(state.posts.list().await?))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Post>, ApiError> {
    Ok(Json(state.posts.get(id).await?))
}
