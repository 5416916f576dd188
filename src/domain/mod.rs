pub mod auth;
pub mod catalog;
pub mod exclusions;
pub mod filter;
