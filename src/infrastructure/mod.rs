pub mod auth;
pub mod catalog;
pub mod config;
pub mod db;
pub mod http;
pub mod repositories;
