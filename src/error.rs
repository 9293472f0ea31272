/// Failures surfaced by catalog operations.
///
/// Not-found is not represented here: lookups return `Ok(None)` and the
/// request layer maps that to a 404.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("{0}")]
    Validation(String),

    #[error("book already exists in collection")]
    Duplicate,

    #[error(transparent)]
    Database(#[from] libsql::Error),

    #[error("{0}")]
    Other(String),
}
