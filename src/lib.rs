pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod openapi;
pub mod pagination;
pub mod repos;
pub mod routes;
pub mod types;
