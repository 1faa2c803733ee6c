pub mod app;
pub mod config;
pub mod error;
pub mod seed;
pub mod store_handler;
