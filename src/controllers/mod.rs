pub mod admin_page;
pub mod exclusions;
pub mod filters;
pub mod health;
