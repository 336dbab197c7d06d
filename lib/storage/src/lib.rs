pub mod manager;
pub mod store;

pub use manager::CatalogManager;
pub use store::{append, load};
