use axum::{
    Router,
    routing::{delete, get, post, put},
};

use super::handler;
use crate::handler::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/books", post(handler::create_book))
        .route("/books", get(handler::list_books))
        .route("/books/search", get(handler::search_books))
        .route("/books/stats/count", get(handler::count_books))
        .route("/books/:id", get(handler::get_book))
        .route("/books/:id", put(handler::update_book))
        .route("/books/:id", delete(handler::delete_book))
}
