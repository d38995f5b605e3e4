use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form,
};
use models::PostFields;
use service::PostRepository;
use serde::Deserialize;

use crate::errors::ApiError;
use crate::routes::AppState;
use crate::views;

/// Fields posted by the add/update forms. Missing fields are empty strings.
#[derive(Debug, Default, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub post_title: String,
    #[serde(default)]
    pub post_content: String,
}

impl From<PostForm> for PostFields {
    fn from(form: PostForm) -> Self {
        PostFields { author: form.author, title: form.post_title, content: form.post_content }
    }
}

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let posts = state.posts.list().await?;
    Ok(Html(views::index(&posts)))
}

pub async fn add_form() -> Html<String> {
    Html(views::add_form())
}

pub async fn add_post(
    State(state): State<AppState>,
    Form(form): Form<PostForm>,
) -> Result<Redirect, ApiError> {
    state.posts.create(form.into()).await?;
    Ok(Redirect::to("/"))
}

pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Html<String>, ApiError> {
    let post = state.posts.get(id).await?;
    Ok(Html(views::update_form(&post)))
}

pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Form(form): Form<PostForm>,
) -> Result<Redirect, ApiError> {
    match state.posts.update(id, form.into()).await? {
        Some(_) => Ok(Redirect::to("/")),
        None => Err(ApiError::NotFound),
    }
}

/// Unknown ids redirect like a successful delete.
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Redirect, ApiError> {
    state.posts.delete(id).await?;
    Ok(Redirect::to("/"))
}
