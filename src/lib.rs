pub mod api;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod notice;
pub mod services;
pub mod state;
pub mod views;
pub mod wizard;
