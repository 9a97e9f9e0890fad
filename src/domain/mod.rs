pub mod error;
pub mod model;
pub mod validation;

pub use error::RestaurantError;
