pub mod book;
pub mod error;
pub mod genre;

use std::{fmt::Display, str::FromStr};

pub use error::Error;
pub use sqlx::Error as SqlxError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::debug;

use crate::error::Result;

pub type ChosenDB = sqlx::Sqlite;
pub type Pool = sqlx::Pool<ChosenDB>;

pub async fn new_pool(database_url: &str) -> Result<Pool, Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(50)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Brings the schema up to date, safe to call on every start.
pub async fn migrate(pool: &Pool) -> Result<()> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    debug!("Database migrations applied");
    Ok(())
}

#[derive(Debug, Clone)]
pub enum Order {
    Asc(String),
    Desc(String),
}

impl Order {
    pub fn asc(field: impl Into<String>) -> Self {
        Order::Asc(field.into())
    }

    pub(crate) fn ordering(&self, valid_fields: &[&str]) -> Result<String> {
        if valid_fields.contains(&self.as_ref()) {
            Ok(self.to_string())
        } else {
            Err(Error::InvalidOrderByField(self.as_ref().to_string()))
        }
    }
}

impl Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Order::Asc(s) => write!(f, "{}", s),
            Order::Desc(s) => write!(f, "{} DESC", s),
        }
    }
}

impl AsRef<str> for Order {
    fn as_ref(&self) -> &str {
        match self {
            Order::Asc(s) => s.as_str(),
            Order::Desc(s) => s.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        let fields = ["id", "name"];
        assert_eq!(Order::asc("name").ordering(&fields).unwrap(), "name");
        assert_eq!(
            Order::Desc("id".into()).ordering(&fields).unwrap(),
            "id DESC"
        );
        assert!(matches!(
            Order::asc("name; DROP TABLE genre").ordering(&fields),
            Err(Error::InvalidOrderByField(_))
        ));
    }
}
