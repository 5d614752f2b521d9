pub mod api;
pub mod cli;
pub mod config;
pub mod console;
pub mod context;
pub mod models;
pub mod normalize;
