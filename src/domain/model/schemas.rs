//! Wire schemas: what clients send (write schemas) and what they get back
//! (read schema). None of these is the persisted shape; see
//! [`Restaurant`](super::Restaurant).

use super::restaurant::{PriceRange, Restaurant};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use utoipa::ToSchema;

/// Body of `POST /restaurants`. Any `id` key in the body is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct RestaurantCreate {
    /// Restaurant name (1..=120 chars)
    #[schema(example = "RJ's BBQ")]
    pub name: String,
    /// Cuisine type (1..=80 chars)
    #[serde(rename = "type")]
    #[schema(example = "BBQ")]
    pub cuisine_type: String,
    /// URL to restaurant image (at least 5 chars)
    pub image: String,
    /// Address where the restaurant is located (1..=80 chars)
    #[schema(example = "San Francisco, CA")]
    pub location: String,
    /// Rating from 0 to 5 stars
    #[serde(deserialize_with = "whole_number")]
    #[schema(minimum = 0, maximum = 5)]
    pub rating: i64,
    /// Optional description (at most 400 chars)
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "priceRange")]
    pub price_range: PriceRange,
}

/// Body of `PATCH /restaurants/{id}`.
///
/// Each field is `None` when the key is absent from the body and
/// `Some(None)` when it is present with an explicit `null`. Only present
/// fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
pub struct RestaurantUpdate {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub name: Option<Option<String>>,
    #[serde(default, rename = "type", deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub cuisine_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub image: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "present_whole_number")]
    #[schema(value_type = Option<i64>, minimum = 0, maximum = 5)]
    pub rating: Option<Option<i64>>,
    /// `null` clears the description.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, rename = "priceRange", deserialize_with = "present")]
    #[schema(value_type = Option<PriceRange>)]
    pub price_range: Option<Option<PriceRange>>,
}

impl RestaurantUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.cuisine_type.is_none()
            && self.image.is_none()
            && self.location.is_none()
            && self.rating.is_none()
            && self.description.is_none()
            && self.price_range.is_none()
    }
}

/// Marks a key as present: an explicit `null` becomes `Some(None)`.
/// Absent keys never reach this function and fall back to `Default`.
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// An integer, also accepted as a float with no fractional part (`4.0`),
/// so a rating read back from the API can be written again unchanged.
/// Range checks belong to validation.
struct WholeNumber(i64);

impl<'de> Deserialize<'de> for WholeNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(WholeNumberVisitor).map(WholeNumber)
    }
}

struct WholeNumberVisitor;

impl<'de> Visitor<'de> for WholeNumberVisitor {
    type Value = i64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a whole number")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
        i64::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
        if v.is_finite() && v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
            Ok(v as i64)
        } else {
            Err(E::invalid_value(de::Unexpected::Float(v), &self))
        }
    }
}

fn whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    WholeNumber::deserialize(deserializer).map(|n| n.0)
}

fn present_whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Option<i64>>, D::Error> {
    Option::<WholeNumber>::deserialize(deserializer).map(|n| Some(n.map(|n| n.0)))
}

fn rating_number<S: Serializer>(rating: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if rating.is_finite() && rating.fract() == 0.0 && rating.abs() < i64::MAX as f64 {
        serializer.serialize_i64(*rating as i64)
    } else {
        serializer.serialize_f64(*rating)
    }
}

/// Restaurant as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RestaurantRead {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub cuisine_type: String,
    pub image: String,
    pub location: String,
    /// Emitted as an integer when it has no fractional part.
    #[serde(serialize_with = "rating_number")]
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "priceRange")]
    pub price_range: PriceRange,
}

impl From<Restaurant> for RestaurantRead {
    fn from(r: Restaurant) -> Self {
        RestaurantRead {
            id: r.id,
            name: r.name,
            cuisine_type: r.cuisine_type,
            image: r.image,
            location: r.location,
            rating: r.rating,
            description: r.description,
            price_range: r.price_range,
        }
    }
}
