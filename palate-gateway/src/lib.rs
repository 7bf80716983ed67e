// Declare modules to be part of the library crate

pub mod clients;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod pipeline;
