use std::collections::HashMap;
use axum::{
    extract::{Form, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use crate::books::dto::BookDto;
use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest, AddBookCommandResponse};
use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest};
use crate::catalog::command::list_books_cmd::{ListBooksCommand, ListBooksCommandRequest};
use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest, RemoveBookCommandResponse};
use crate::catalog::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest, UpdateBookCommandResponse};
use crate::core::command::{Command, CommandError};
use crate::core::controller::{AppState, ServerError};

#[derive(Debug, Deserialize)]
pub(crate) struct IdParam {
    id: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_books))
        .route("/addBook", get(add_book_view))
        .route("/add", post(add_book))
        .route("/update", post(update_book))
        .route("/delete", post(remove_book))
        .route("/updateBook", get(update_book_view))
        .route("/get/all", get(list_books))
        .route("/get", get(find_book_by_id))
        .with_state(state)
}

pub(crate) async fn list_books(
    State(state): State<AppState>) -> Result<Json<Vec<BookDto>>, ServerError> {
    let res = ListBooksCommand::new(state.catalog).execute(ListBooksCommandRequest::default()).await?;
    Ok(Json(res.books))
}

// the add form starts from an empty book
pub(crate) async fn add_book_view() -> Json<BookDto> {
    Json(BookDto::default())
}

pub(crate) async fn add_book(
    State(state): State<AppState>,
    Form(form): Form<HashMap<String, String>>) -> Result<Json<AddBookCommandResponse>, ServerError> {
    let req = AddBookCommandRequest::from_form(&form)?;
    let res = AddBookCommand::new(state.catalog).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn update_book(
    State(state): State<AppState>,
    Form(form): Form<HashMap<String, String>>) -> Result<Json<UpdateBookCommandResponse>, ServerError> {
    let req = UpdateBookCommandRequest::from_form(&form)?;
    let res = UpdateBookCommand::new(state.catalog).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn remove_book(
    State(state): State<AppState>,
    Form(form): Form<HashMap<String, String>>) -> Result<Json<RemoveBookCommandResponse>, ServerError> {
    let req = RemoveBookCommandRequest::new(form.get("id").cloned().unwrap_or_default());
    let res = RemoveBookCommand::new(state.catalog).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn update_book_view(
    State(state): State<AppState>,
    Query(param): Query<IdParam>) -> Result<Json<BookDto>, ServerError> {
    let res = GetBookCommand::new(state.catalog).execute(GetBookCommandRequest::new(param.id.to_string())).await?;
    let book = res.book.ok_or_else(|| CommandError::not_found(format!("book {} not found", param.id).as_str()))?;
    Ok(Json(book))
}

pub(crate) async fn find_book_by_id(
    State(state): State<AppState>,
    Query(param): Query<IdParam>) -> Result<Json<Option<BookDto>>, ServerError> {
    let res = GetBookCommand::new(state.catalog).execute(GetBookCommandRequest::new(param.id)).await?;
    Ok(Json(res.book))
}
