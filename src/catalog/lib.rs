use libsql::Connection;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBook {
    pub title: String,
    pub author: String,
    pub year: Option<i32>,
}

/// Partial-update patch. A field left out of the request body is not
/// touched. `year` distinguishes "absent" from an explicit `null`: the
/// former preserves the stored value, the latter clears it. `title` and
/// `author` are NOT NULL columns, so an explicit `null` there is treated
/// the same as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBook {
    pub title: Option<String>,
    pub author: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub year: Option<Option<i32>>,
}

fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<i32>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Search filters are ANDed; empty strings count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookFilter {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<i32>,
}

fn require_non_empty(value: &str, field: &str) -> Result<(), CatalogError> {
    if value.trim().is_empty() {
        return Err(CatalogError::Validation(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(())
}

fn is_unique_violation(e: &libsql::Error) -> bool {
    e.to_string().contains("UNIQUE constraint failed")
}

pub struct Catalog<'a> {
    conn: &'a Connection,
}

impl<'a> Catalog<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, input: CreateBook) -> Result<Book, CatalogError> {
        require_non_empty(&input.title, "title")?;
        require_non_empty(&input.author, "author")?;

        let query = r#"
            INSERT INTO books (title, author, year)
            VALUES (?, ?, ?)
            RETURNING id, title, author, year
        "#;

        let mut rows = match self
            .conn
            .query(query, libsql::params![input.title, input.author, input.year])
            .await
        {
            Ok(rows) => rows,
            Err(e) if is_unique_violation(&e) => return Err(CatalogError::Duplicate),
            Err(e) => return Err(e.into()),
        };

        if let Some(row) = rows.next().await? {
            Ok(self.row_to_book(&row)?)
        } else {
            Err(CatalogError::Other("failed to create book".to_string()))
        }
    }

    pub async fn get(&self, id: i32) -> Result<Option<Book>, CatalogError> {
        let query = r#"
            SELECT id, title, author, year
            FROM books WHERE id = ?
        "#;

        let mut rows = self.conn.query(query, libsql::params![id]).await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(self.row_to_book(&row)?))
        } else {
            Ok(None)
        }
    }

    // Insertion order: ids are assigned monotonically, so ORDER BY id ASC
    // returns books oldest-first.
    pub async fn list(&self, limit: i32, offset: i32) -> Result<Vec<Book>, CatalogError> {
        let query = r#"
            SELECT id, title, author, year
            FROM books
            ORDER BY id ASC
            LIMIT ? OFFSET ?
        "#;

        let mut rows = self.conn.query(query, libsql::params![limit, offset]).await?;
        let mut books = Vec::new();

        while let Some(row) = rows.next().await? {
            books.push(self.row_to_book(&row)?);
        }

        Ok(books)
    }

    pub async fn update(&self, id: i32, input: UpdateBook) -> Result<Option<Book>, CatalogError> {
        if let Some(title) = &input.title {
            require_non_empty(title, "title")?;
        }
        if let Some(author) = &input.author {
            require_non_empty(author, "author")?;
        }

        if self.get(id).await?.is_none() {
            return Ok(None);
        }

        let mut updates = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(title) = &input.title {
            updates.push("title = ?");
            params.push(title.clone().into());
        }
        if let Some(author) = &input.author {
            updates.push("author = ?");
            params.push(author.clone().into());
        }
        match input.year {
            Some(Some(year)) => {
                updates.push("year = ?");
                params.push(year.into());
            }
            Some(None) => {
                updates.push("year = ?");
                params.push(libsql::Value::Null);
            }
            None => {}
        }

        if updates.is_empty() {
            return self.get(id).await;
        }

        params.push(id.into());

        let query = format!("UPDATE books SET {} WHERE id = ?", updates.join(", "));

        match self.conn.execute(&query, params).await {
            Ok(_) => self.get(id).await,
            Err(e) if is_unique_violation(&e) => Err(CatalogError::Duplicate),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn delete(&self, id: i32) -> Result<Option<Book>, CatalogError> {
        let query = r#"
            DELETE FROM books WHERE id = ?
            RETURNING id, title, author, year
        "#;

        let mut rows = self.conn.query(query, libsql::params![id]).await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(self.row_to_book(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn search(&self, filter: &BookFilter) -> Result<Vec<Book>, CatalogError> {
        let mut clauses = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(title) = filter.title.as_deref().filter(|t| !t.is_empty()) {
            clauses.push("lower(title) LIKE lower(?)");
            params.push(format!("%{}%", title).into());
        }
        if let Some(author) = filter.author.as_deref().filter(|a| !a.is_empty()) {
            clauses.push("lower(author) LIKE lower(?)");
            params.push(format!("%{}%", author).into());
        }
        if let Some(year) = filter.year {
            // NULL years never match an exact-year filter.
            clauses.push("year = ?");
            params.push(year.into());
        }

        let query = if clauses.is_empty() {
            "SELECT id, title, author, year FROM books ORDER BY id ASC".to_string()
        } else {
            format!(
                "SELECT id, title, author, year FROM books WHERE {} ORDER BY id ASC",
                clauses.join(" AND ")
            )
        };

        let mut rows = self.conn.query(&query, params).await?;
        let mut books = Vec::new();

        while let Some(row) = rows.next().await? {
            books.push(self.row_to_book(&row)?);
        }

        Ok(books)
    }

    pub async fn count(&self) -> Result<i32, CatalogError> {
        let mut rows = self.conn.query("SELECT COUNT(*) FROM books", ()).await?;

        if let Some(row) = rows.next().await? {
            Ok(row.get(0)?)
        } else {
            Err(CatalogError::Other("failed to count books".to_string()))
        }
    }

    fn row_to_book(&self, row: &libsql::Row) -> Result<Book, CatalogError> {
        Ok(Book {
            id: row.get(0)?,
            title: row.get(1)?,
            author: row.get(2)?,
            year: row.get::<Option<i32>>(3)?,
        })
    }
}
