pub mod csrf;
pub mod jwt;

pub use csrf::{CsrfError, CsrfManager, SAVE_EXCLUSIONS_ACTION};
pub use jwt::{Claims, JwtManager, MANAGE_CATALOG};
