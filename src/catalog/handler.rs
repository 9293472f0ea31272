//! HTTP Handlers for the Book Catalog API

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use super::{Book, BookFilter, Catalog, CreateBook, UpdateBook};
use crate::error::CatalogError;
use crate::handler::AppState;

const DEFAULT_LIMIT: i32 = 100;
const MAX_LIMIT: i32 = 100;

#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i32>,
    pub offset: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub deleted_book: Book,
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub total_books: i32,
    pub message: String,
}

fn success<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

fn created<T: Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(data)).into_response()
}

fn not_found(msg: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: msg.to_string(),
        }),
    )
        .into_response()
}

fn bad_request(msg: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: msg.to_string(),
        }),
    )
        .into_response()
}

fn internal_error(msg: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: msg.to_string(),
        }),
    )
        .into_response()
}

fn book_not_found(id: i32) -> Response {
    not_found(&format!("Book with ID {} not found", id))
}

fn catalog_error(context: &str, e: CatalogError) -> Response {
    match e {
        CatalogError::Validation(msg) => bad_request(&msg),
        CatalogError::Duplicate => bad_request("book already exists in collection"),
        e => {
            tracing::error!("{}: {}", context, crate::unpack_error(&e));
            internal_error(context)
        }
    }
}

pub async fn create_book(
    State(state): State<AppState>,
    Json(payload): Json<CreateBook>,
) -> Response {
    let catalog = Catalog::new(state.db.connection());

    match catalog.create(payload).await {
        Ok(book) => created(book),
        Err(e) => catalog_error("failed to create book", e),
    }
}

pub async fn list_books(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Response {
    let catalog = Catalog::new(state.db.connection());
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = params.offset.unwrap_or(0).max(0);

    match catalog.list(limit, offset).await {
        Ok(books) => success(books),
        Err(e) => catalog_error("failed to list books", e),
    }
}

pub async fn get_book(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    let catalog = Catalog::new(state.db.connection());

    match catalog.get(id).await {
        Ok(Some(book)) => success(book),
        Ok(None) => book_not_found(id),
        Err(e) => catalog_error("failed to get book", e),
    }
}

pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateBook>,
) -> Response {
    let catalog = Catalog::new(state.db.connection());

    match catalog.update(id, payload).await {
        Ok(Some(book)) => success(book),
        Ok(None) => book_not_found(id),
        Err(e) => catalog_error("failed to update book", e),
    }
}

pub async fn delete_book(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    let catalog = Catalog::new(state.db.connection());

    match catalog.delete(id).await {
        Ok(Some(book)) => {
            let message = format!("Book '{}' deleted", book.title);
            success(DeleteResponse {
                message,
                deleted_book: book,
            })
        }
        Ok(None) => book_not_found(id),
        Err(e) => catalog_error("failed to delete book", e),
    }
}

pub async fn search_books(
    State(state): State<AppState>,
    Query(filter): Query<BookFilter>,
) -> Response {
    let catalog = Catalog::new(state.db.connection());

    match catalog.search(&filter).await {
        Ok(books) => success(books),
        Err(e) => catalog_error("failed to search books", e),
    }
}

pub async fn count_books(State(state): State<AppState>) -> Response {
    let catalog = Catalog::new(state.db.connection());

    match catalog.count().await {
        Ok(count) => success(CountResponse {
            total_books: count,
            message: format!("There are {} books", count),
        }),
        Err(e) => catalog_error("failed to count books", e),
    }
}
