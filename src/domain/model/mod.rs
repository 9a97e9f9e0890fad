//! Restaurant domain model: the persisted record plus its wire schemas.

pub mod restaurant;
pub mod schemas;

pub use restaurant::{PriceRange, Restaurant, UnknownPriceRange, RESTAURANT_COLUMNS};
pub use schemas::{RestaurantCreate, RestaurantRead, RestaurantUpdate};
