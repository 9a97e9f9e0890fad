//! Persisted restaurant record and the price-range token set.

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Price range indicator. Serialized and stored as `$`, `$$` or `$$$`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum PriceRange {
    #[serde(rename = "$")]
    Low,
    #[serde(rename = "$$")]
    Medium,
    #[serde(rename = "$$$")]
    High,
}

impl PriceRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceRange::Low => "$",
            PriceRange::Medium => "$$",
            PriceRange::High => "$$$",
        }
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown price range token '{0}' (expected $, $$ or $$$)")]
pub struct UnknownPriceRange(pub String);

impl FromStr for PriceRange {
    type Err = UnknownPriceRange;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "$" => Ok(PriceRange::Low),
            "$$" => Ok(PriceRange::Medium),
            "$$$" => Ok(PriceRange::High),
            other => Err(UnknownPriceRange(other.to_string())),
        }
    }
}

/// One row of the `restaurants` table.
///
/// `rating` is stored as `REAL` and is not range-checked here; the 0..=5
/// integer constraint lives on the write schemas only.
#[derive(Debug, Clone, PartialEq)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub cuisine_type: String,
    pub image: String,
    pub location: String,
    pub rating: f64,
    pub description: Option<String>,
    pub price_range: PriceRange,
}

/// Column list shared by every `SELECT` so row decoding stays in one place.
pub const RESTAURANT_COLUMNS: &str =
    r#"id, name, "type", image, location, rating, description, price_range"#;

impl<'r> FromRow<'r, SqliteRow> for Restaurant {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let price_raw: String = row.try_get("price_range")?;
        let price_range = price_raw.parse::<PriceRange>().map_err(|e| sqlx::Error::ColumnDecode {
            index: "price_range".to_string(),
            source: Box::new(e),
        })?;

        Ok(Restaurant {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            cuisine_type: row.try_get("type")?,
            image: row.try_get("image")?,
            location: row.try_get("location")?,
            rating: row.try_get("rating")?,
            description: row.try_get("description")?,
            price_range,
        })
    }
}
