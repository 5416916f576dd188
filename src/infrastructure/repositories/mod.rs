pub mod catalog_repository;
pub mod memory_option_repository;
pub mod option_repository;

pub use catalog_repository::CatalogRepository;
pub use memory_option_repository::MemoryOptionRepository;
pub use option_repository::{OptionStore, PgOptionRepository};
