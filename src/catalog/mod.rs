//! Book Catalog Module
//!
//! A self-contained library for the book collection: typed inputs, the SQL
//! for the `books` table, and ready-to-use HTTP handlers and routes.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bookshelf::catalog;
//!
//! // Get the migrations to run
//! for (name, sql) in catalog::migrations() {
//!     // Run migration...
//! }
//!
//! // Mount the routes
//! let app = Router::new()
//!     .merge(catalog::routes())
//!     .with_state(app_state);
//!
//! // Use the library directly
//! let catalog = catalog::Catalog::new(connection);
//! let book = catalog.create(input).await?;
//! ```

mod handler;
mod lib;
mod routes;

// Re-export the core library types and functions
pub use lib::*;

// Re-export the routes function
pub use routes::routes;

/// Returns the migrations for the catalog module.
///
/// These should be run during application startup to ensure the database
/// schema is up to date.
pub fn migrations() -> &'static [(&'static str, &'static str)] {
    &[(
        "catalog_001_schema.sql",
        include_str!("migrations/001_schema.sql"),
    )]
}
