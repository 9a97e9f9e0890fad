pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::RestaurantService;
pub use domain::model::{PriceRange, Restaurant, RestaurantCreate, RestaurantRead, RestaurantUpdate};
pub use domain::RestaurantError;
pub use infra::config;
pub use storage::{Session, StorageGateway};
