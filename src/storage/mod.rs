pub mod gateway;

pub use gateway::{Session, StorageGateway, SAMPLE_RESTAURANTS};
