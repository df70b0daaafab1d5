use crate::{ChosenDB, Error, Order, error::Result};
use futures::TryStreamExt as _;
use garde::Validate;
use serde::{Deserialize, Serialize};
use sqlx::Pool;
use tracing::debug;

pub const GENRE_NAME_MAX_CHARS: usize = 100;
pub const GENRE_PATH_PREFIX: &str = "/catalog/genre/";

const SORTABLE_FIELDS: &[&str] = &["id", "name"];

fn valid_genre_name(name: &str, _ctx: &()) -> garde::Result {
    match name.chars().count() {
        0 => Err(garde::Error::new("Genre name required")),
        n if n > GENRE_NAME_MAX_CHARS => Err(garde::Error::new(format!(
            "Genre name must not exceed {GENRE_NAME_MAX_CHARS} characters"
        ))),
        _ => Ok(()),
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct CreateGenre {
    #[garde(custom(valid_genre_name))]
    pub name: String,
}

impl CreateGenre {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

impl Genre {
    /// Canonical path of the genre detail page.
    pub fn reference_path(&self) -> String {
        format!("{GENRE_PATH_PREFIX}{}", self.id)
    }
}

pub type GenreRepository = GenreRepositoryImpl<Pool<ChosenDB>>;

pub struct GenreRepositoryImpl<E> {
    executor: E,
}

impl<'c, E> GenreRepositoryImpl<E>
where
    for<'a> &'a E: sqlx::Executor<'c, Database = ChosenDB>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Stores the name as given, the payload is validated before sanitizing it.
    pub async fn create(&self, payload: CreateGenre) -> Result<Genre> {
        let result = sqlx::query("INSERT INTO genre (name) VALUES (?)")
            .bind(&payload.name)
            .execute(&self.executor)
            .await?;

        let id = result.last_insert_rowid();
        debug!("Created genre {id}");
        self.get(id).await
    }

    /// Replaces stored values, fails with [`Error::RecordNotFound`] when there is no such record.
    pub async fn update(&self, id: i64, payload: CreateGenre) -> Result<Genre> {
        let result = sqlx::query("UPDATE genre SET name = ? WHERE id = ?")
            .bind(&payload.name)
            .bind(id)
            .execute(&self.executor)
            .await?;

        if result.rows_affected() == 0 {
            Err(Error::RecordNotFound("Genre".to_string()))
        } else {
            self.get(id).await
        }
    }

    pub async fn list_all(&self, order: Order) -> Result<Vec<Genre>> {
        let sql = format!(
            "SELECT id, name FROM genre ORDER BY {}",
            order.ordering(SORTABLE_FIELDS)?
        );
        let records = sqlx::query_as::<_, Genre>(&sql)
            .fetch(&self.executor)
            .try_collect::<Vec<_>>()
            .await?;
        Ok(records)
    }

    /// Removes the record, returns false if there was nothing to remove.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let res = sqlx::query("DELETE FROM genre WHERE id = ?")
            .bind(id)
            .execute(&self.executor)
            .await?;

        Ok(res.rows_affected() > 0)
    }

    pub async fn find(&self, id: i64) -> Result<Option<Genre>> {
        let record = sqlx::query_as::<_, Genre>("SELECT id, name FROM genre WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.executor)
            .await?;
        Ok(record)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Genre>> {
        let record =
            sqlx::query_as::<_, Genre>("SELECT id, name FROM genre WHERE name = ? ORDER BY id LIMIT 1")
                .bind(name)
                .fetch_optional(&self.executor)
                .await?;
        Ok(record)
    }

    pub async fn get(&self, id: i64) -> Result<Genre> {
        self.find(id)
            .await?
            .ok_or_else(|| Error::RecordNotFound("Genre".to_string()))
    }
}
