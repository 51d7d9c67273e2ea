pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod docs;
pub mod error;
pub mod export;
pub mod model;
pub mod routes;
pub mod store;
