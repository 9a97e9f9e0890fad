//! SQLite-backed storage gateway.
//!
//! Owns the connection pool and the `restaurants` schema. Every unit of work
//! goes through a [`Session`], which holds one pooled connection and gives it
//! back when dropped.

use crate::domain::model::{PriceRange, RESTAURANT_COLUMNS};
use anyhow::Result;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Connection, Sqlite, SqliteConnection, Transaction};
use std::str::FromStr;

pub const CREATE_RESTAURANTS_TABLE: &str = r#"CREATE TABLE IF NOT EXISTS restaurants (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    "type" TEXT NOT NULL,
    image TEXT NOT NULL,
    location TEXT NOT NULL,
    rating REAL NOT NULL,
    description TEXT,
    price_range TEXT NOT NULL
)"#;

/// One scoped unit of work against the store.
///
/// Reads run directly on [`Session::conn`]. Writes open a transaction with
/// [`Session::begin`]; a transaction dropped without `commit` rolls back.
pub struct Session {
    conn: PoolConnection<Sqlite>,
}

impl Session {
    pub fn conn(&mut self) -> &mut SqliteConnection {
        &mut self.conn
    }

    pub async fn begin(&mut self) -> Result<Transaction<'_, Sqlite>, sqlx::Error> {
        Connection::begin(&mut *self.conn).await
    }
}

/// A fixed sample row inserted on first boot.
pub struct SeedRestaurant {
    pub name: &'static str,
    pub cuisine_type: &'static str,
    pub image: &'static str,
    pub location: &'static str,
    pub rating: f64,
    pub description: &'static str,
    pub price_range: PriceRange,
}

pub const SAMPLE_RESTAURANTS: [SeedRestaurant; 2] = [
    SeedRestaurant {
        name: "RJ's BBQ",
        cuisine_type: "BBQ",
        image: "https://images.unsplash.com/photo-1544025162-d76694265947?q=80&w=1200&auto=format&fit=crop",
        location: "San Francisco, CA",
        rating: 4.0,
        description: "BBQ with a side of fries.",
        price_range: PriceRange::Medium,
    },
    SeedRestaurant {
        name: "A1",
        cuisine_type: "American",
        image: "https://images.unsplash.com/photo-1467003909585-2f8a72700288?q=80&w=1287&auto=format&fit=crop",
        location: "San Francisco, CA",
        rating: 4.0,
        description: "American classic with a modern twist.",
        price_range: PriceRange::High,
    },
];

#[derive(Clone)]
pub struct StorageGateway {
    pool: SqlitePool,
}

impl StorageGateway {
    /// Connects to `database_url`, creating the SQLite file if it is missing.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?;
        tracing::info!(database_url, max_connections, "connected to store");
        Ok(Self { pool })
    }

    /// Private in-memory store. Every in-memory connection is its own
    /// database, so the pool is pinned to a single connection that never
    /// expires.
    pub async fn connect_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the `restaurants` table if it does not exist.
    pub async fn initialize_schema(&self) -> Result<()> {
        sqlx::query(CREATE_RESTAURANTS_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    pub async fn acquire_session(&self) -> Result<Session, sqlx::Error> {
        let conn = self.pool.acquire().await?;
        Ok(Session { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn count(&self) -> Result<i64> {
        let mut session = self.acquire_session().await?;
        Ok(count_rows(session.conn()).await?)
    }

    /// Inserts [`SAMPLE_RESTAURANTS`] in one commit when the table is empty.
    /// Returns how many rows were inserted (0 when the table already had data).
    pub async fn seed_if_empty(&self) -> Result<usize> {
        let mut session = self.acquire_session().await?;
        let mut tx = session.begin().await?;

        if count_rows(&mut tx).await? > 0 {
            tracing::debug!("restaurants table not empty, skipping seed");
            return Ok(0);
        }

        for sample in &SAMPLE_RESTAURANTS {
            sqlx::query(
                r#"INSERT INTO restaurants (name, "type", image, location, rating, description, price_range)
                   VALUES (?, ?, ?, ?, ?, ?, ?)"#,
            )
            .bind(sample.name)
            .bind(sample.cuisine_type)
            .bind(sample.image)
            .bind(sample.location)
            .bind(sample.rating)
            .bind(sample.description)
            .bind(sample.price_range.as_str())
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        tracing::info!(inserted = SAMPLE_RESTAURANTS.len(), "seeded sample restaurants");
        Ok(SAMPLE_RESTAURANTS.len())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

async fn count_rows(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM restaurants")
        .fetch_one(conn)
        .await
}

/// `SELECT` prefix for reading whole records.
pub fn select_restaurants() -> String {
    format!("SELECT {} FROM restaurants", RESTAURANT_COLUMNS)
}
