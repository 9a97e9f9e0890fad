//! The restaurant resource service.
//!
//! Implements list/get/create/update/delete on top of the storage gateway
//! and owns the mapping between persisted [`Restaurant`] rows and the wire
//! schemas. Payloads are validated before they get here.
//!
//! Every operation runs on a caller-provided [`Session`]. Writes use one
//! transaction per call: it is committed on success and rolled back on any
//! failure, so a failed call leaves nothing behind.

use crate::domain::model::{Restaurant, RestaurantCreate, RestaurantRead, RestaurantUpdate};
use crate::domain::RestaurantError;
use crate::storage::gateway::select_restaurants;
use crate::storage::{Session, StorageGateway};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, Transaction};
use std::sync::Arc;

pub struct RestaurantService {
    gateway: Arc<StorageGateway>,
}

impl RestaurantService {
    pub fn new(gateway: Arc<StorageGateway>) -> Self {
        Self { gateway }
    }

    /// Acquires a session for one request.
    pub async fn session(&self) -> Result<Session, RestaurantError> {
        self.gateway
            .acquire_session()
            .await
            .map_err(|e| RestaurantError::internal("Failed to acquire database session", e))
    }

    /// All restaurants, in storage order.
    pub async fn list(&self, session: &mut Session) -> Result<Vec<RestaurantRead>, RestaurantError> {
        let rows: Vec<Restaurant> = sqlx::query_as(&select_restaurants())
            .fetch_all(session.conn())
            .await
            .map_err(|e| RestaurantError::internal("Failed to list restaurants", e))?;
        Ok(rows.into_iter().map(RestaurantRead::from).collect())
    }

    pub async fn get(&self, session: &mut Session, id: i64) -> Result<RestaurantRead, RestaurantError> {
        let restaurant = find(session.conn(), id)
            .await
            .map_err(|e| RestaurantError::internal("Unexpected error", e))?
            .ok_or(RestaurantError::NotFound { id })?;
        Ok(restaurant.into())
    }

    pub async fn create(
        &self,
        session: &mut Session,
        payload: &RestaurantCreate,
    ) -> Result<RestaurantRead, RestaurantError> {
        let context = "Failed to create restaurant";
        let mut tx = begin(session, context).await?;

        let inserted = insert(&mut tx, payload).await;
        let created = match inserted {
            Ok(r) => r,
            Err(e) => return Err(rollback(tx, context, e).await),
        };
        commit(tx, context).await?;

        tracing::info!(id = created.id, name = %created.name, "restaurant created");
        Ok(created.into())
    }

    /// Applies the fields present in `patch`; absent fields keep their value.
    ///
    /// The UPDATE is the first statement of the transaction so the write lock
    /// is requested up front and waits on the busy timeout, instead of a
    /// read lock having to be upgraded mid-transaction.
    pub async fn update(
        &self,
        session: &mut Session,
        id: i64,
        patch: &RestaurantUpdate,
    ) -> Result<RestaurantRead, RestaurantError> {
        let context = "Failed to update restaurant";
        let mut tx = begin(session, context).await?;

        if !patch.is_empty() {
            let written = write_patch(&mut tx, id, patch).await;
            match written {
                Ok(0) => return Err(RestaurantError::NotFound { id }),
                Ok(_) => {}
                Err(e) => return Err(rollback(tx, context, e).await),
            }
        }

        let found = find(&mut tx, id).await;
        let updated = match found {
            Ok(Some(r)) => r,
            // Only reachable for an empty patch; nothing was written.
            Ok(None) => return Err(RestaurantError::NotFound { id }),
            Err(e) => return Err(rollback(tx, context, e).await),
        };
        commit(tx, context).await?;

        tracing::info!(id, fields = patch_field_count(patch), "restaurant updated");
        Ok(updated.into())
    }

    pub async fn delete(&self, session: &mut Session, id: i64) -> Result<(), RestaurantError> {
        let context = "Failed to delete restaurant";
        let mut tx = begin(session, context).await?;

        let done = sqlx::query("DELETE FROM restaurants WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await;
        let deleted = match done {
            Ok(done) => done.rows_affected(),
            Err(e) => return Err(rollback(tx, context, e).await),
        };
        if deleted == 0 {
            return Err(RestaurantError::NotFound { id });
        }
        commit(tx, context).await?;

        tracing::info!(id, "restaurant deleted");
        Ok(())
    }
}

/// Pushes one `column = ?` assignment per present field. Required fields
/// carrying an explicit `null` are rejected by validation and skipped here.
fn push_assignments(query: &mut QueryBuilder<'_, Sqlite>, patch: &RestaurantUpdate) -> usize {
    let mut set = query.separated(", ");
    let mut pushed = 0;
    if let Some(Some(name)) = &patch.name {
        set.push("name = ").push_bind_unseparated(name.clone());
        pushed += 1;
    }
    if let Some(Some(cuisine_type)) = &patch.cuisine_type {
        set.push(r#""type" = "#).push_bind_unseparated(cuisine_type.clone());
        pushed += 1;
    }
    if let Some(Some(image)) = &patch.image {
        set.push("image = ").push_bind_unseparated(image.clone());
        pushed += 1;
    }
    if let Some(Some(location)) = &patch.location {
        set.push("location = ").push_bind_unseparated(location.clone());
        pushed += 1;
    }
    if let Some(Some(rating)) = patch.rating {
        set.push("rating = ").push_bind_unseparated(rating as f64);
        pushed += 1;
    }
    if let Some(description) = &patch.description {
        set.push("description = ").push_bind_unseparated(description.clone());
        pushed += 1;
    }
    if let Some(Some(price_range)) = patch.price_range {
        set.push("price_range = ").push_bind_unseparated(price_range.as_str());
        pushed += 1;
    }
    pushed
}

fn patch_field_count(patch: &RestaurantUpdate) -> usize {
    [
        patch.name.is_some(),
        patch.cuisine_type.is_some(),
        patch.image.is_some(),
        patch.location.is_some(),
        patch.rating.is_some(),
        patch.description.is_some(),
        patch.price_range.is_some(),
    ]
    .iter()
    .filter(|present| **present)
    .count()
}

async fn find(conn: &mut SqliteConnection, id: i64) -> Result<Option<Restaurant>, sqlx::Error> {
    sqlx::query_as(&format!("{} WHERE id = ?", select_restaurants()))
        .bind(id)
        .fetch_optional(conn)
        .await
}

async fn insert(tx: &mut Transaction<'_, Sqlite>, payload: &RestaurantCreate) -> Result<Restaurant, sqlx::Error> {
    let id = sqlx::query(
        r#"INSERT INTO restaurants (name, "type", image, location, rating, description, price_range)
           VALUES (?, ?, ?, ?, ?, ?, ?)"#,
    )
    .bind(&payload.name)
    .bind(&payload.cuisine_type)
    .bind(&payload.image)
    .bind(&payload.location)
    .bind(payload.rating as f64)
    .bind(payload.description.as_deref())
    .bind(payload.price_range.as_str())
    .execute(&mut **tx)
    .await?
    .last_insert_rowid();

    find(tx, id).await?.ok_or(sqlx::Error::RowNotFound)
}

/// Returns the number of rows changed; 0 means the id does not exist.
async fn write_patch(tx: &mut Transaction<'_, Sqlite>, id: i64, patch: &RestaurantUpdate) -> Result<u64, sqlx::Error> {
    let mut query = QueryBuilder::<Sqlite>::new("UPDATE restaurants SET ");
    if push_assignments(&mut query, patch) == 0 {
        // Only `null`s on required fields; nothing to write, but the row must exist.
        return Ok(find(tx, id).await?.map_or(0, |_| 1));
    }
    query.push(" WHERE id = ").push_bind(id);
    let done = query.build().execute(&mut **tx).await?;
    Ok(done.rows_affected())
}

async fn begin<'s>(session: &'s mut Session, context: &str) -> Result<Transaction<'s, Sqlite>, RestaurantError> {
    session
        .begin()
        .await
        .map_err(|e| RestaurantError::internal(context, e))
}

async fn commit(tx: Transaction<'_, Sqlite>, context: &str) -> Result<(), RestaurantError> {
    tx.commit().await.map_err(|e| {
        tracing::error!(error = %e, "{}: commit failed", context);
        RestaurantError::internal(context, e)
    })
}

async fn rollback(tx: Transaction<'_, Sqlite>, context: &str, err: sqlx::Error) -> RestaurantError {
    tracing::warn!(error = %err, "{}: rolling back", context);
    if let Err(rb) = tx.rollback().await {
        tracing::error!(error = %rb, "rollback failed");
    }
    RestaurantError::internal(context, err)
}
