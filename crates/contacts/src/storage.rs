//! SQLite contact storage.

use std::str::FromStr;

use chrono::Utc;
use restkit::{sqlite::SqliteSource, ApiError};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use thiserror::Error;

use crate::models::{Contact, CreateContact};

/// SQL statement to create the contacts table.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS contacts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    phone TEXT,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_contacts_name ON contacts(name);
"#;

const SELECT_CONTACTS: &str = "SELECT id, name, email, phone, created_at FROM contacts";

/// Error code for duplicate contacts.
pub const CODE_CONTACT_EXISTS: &str = "contact:exists";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("a contact with email {0} already exists")]
    AlreadyExists(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AlreadyExists(_) => ApiError::invalid_error(CODE_CONTACT_EXISTS, err),
            StoreError::Database(e) => ApiError::Unexpected(e.into()),
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Contact repository backed by a SQLite pool.
#[derive(Debug, Clone)]
pub struct ContactStore {
    pool: SqlitePool,
}

impl ContactStore {
    /// Opens `url`, creating the database file if needed, and runs migrations.
    ///
    /// In-memory databases are limited to one connection that is never
    /// recycled; every new connection would see its own empty database.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let in_memory = url.contains(":memory:");
        let max_connections = if in_memory { 1 } else { 5 };

        let mut pool_options = SqlitePoolOptions::new().max_connections(max_connections);
        if in_memory {
            // The database lives and dies with its single connection
            pool_options = pool_options
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options.connect_with(options).await?;

        let store = Self { pool };
        store.migrate().await?;

        tracing::info!(url, max_connections, "Contact store ready");
        Ok(store)
    }

    pub async fn migrate(&self) -> Result<()> {
        sqlx::raw_sql(CREATE_TABLES).execute(&self.pool).await?;
        Ok(())
    }

    pub async fn insert(&self, new: &CreateContact) -> Result<Contact> {
        let contact = sqlx::query_as::<_, Contact>(
            "INSERT INTO contacts (name, email, phone, created_at) VALUES (?, ?, ?, ?) \
             RETURNING id, name, email, phone, created_at",
        )
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.phone)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                StoreError::AlreadyExists(new.email.clone())
            }
            other => StoreError::Database(other),
        })?;

        tracing::info!(contact_id = contact.id, "Created contact");
        Ok(contact)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Contact>> {
        let contact = sqlx::query_as::<_, Contact>(&format!("{SELECT_CONTACTS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(contact)
    }

    /// Returns whether a row was removed.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Page source over all contacts, or those whose name or email contains
    /// `search`.
    pub fn listing(&self, search: Option<&str>) -> SqliteSource<Contact> {
        match search {
            Some(term) => {
                let pattern = format!("%{}%", escape_like(term));
                SqliteSource::new(
                    self.pool.clone(),
                    format!(
                        "{SELECT_CONTACTS} WHERE name LIKE ? ESCAPE '\\' \
                         OR email LIKE ? ESCAPE '\\' ORDER BY id"
                    ),
                )
                .bind(pattern.clone())
                .bind(pattern)
            }
            None => SqliteSource::new(self.pool.clone(), format!("{SELECT_CONTACTS} ORDER BY id")),
        }
    }
}

/// Escapes the `LIKE` wildcards in `term` so it matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
