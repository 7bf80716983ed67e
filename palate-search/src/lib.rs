// Declare modules to be part of the library crate

pub mod config;
pub mod error;
pub mod handlers;
pub mod loader;
pub mod models;
pub mod state;
