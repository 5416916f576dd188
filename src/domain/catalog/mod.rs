pub mod error;
pub mod model;

pub use error::CatalogError;
pub use model::{
    CategoryOrder, CategoryQuery, CategoryRecord, TermRef, PRODUCT_CATEGORY_TAXONOMY,
    PRODUCT_POST_TYPE,
};
