use crate::{ChosenDB, error::Result};
use futures::TryStreamExt as _;
use serde::{Deserialize, Serialize};
use sqlx::Pool;

pub const BOOK_PATH_PREFIX: &str = "/catalog/book/";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub summary: Option<String>,
}

impl Book {
    pub fn reference_path(&self) -> String {
        format!("{BOOK_PATH_PREFIX}{}", self.id)
    }
}

pub type BookRepository = BookRepositoryImpl<Pool<ChosenDB>>;

/// Read only access to books, they are maintained elsewhere.
pub struct BookRepositoryImpl<E> {
    executor: E,
}

impl<'c, E> BookRepositoryImpl<E>
where
    for<'a> &'a E: sqlx::Executor<'c, Database = ChosenDB>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Books linked to the genre, sorted by title.
    pub async fn list_by_genre(&self, genre_id: i64) -> Result<Vec<Book>> {
        const SQL: &str = r#"
        SELECT b.id, b.title, b.summary
        FROM book b
        JOIN book_genres bg ON bg.book_id = b.id
        WHERE bg.genre_id = ?
        ORDER BY b.title, b.id
        "#;
        let records = sqlx::query_as::<_, Book>(SQL)
            .bind(genre_id)
            .fetch(&self.executor)
            .try_collect::<Vec<_>>()
            .await?;
        Ok(records)
    }
}
