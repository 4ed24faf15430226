// Event views - list and detail view models over the events resource API

// Core types and pure view logic
pub mod core;

// Resource records
pub mod models;

// Resource clients, notification and navigation collaborators
pub mod infrastructure;

// List and detail views
pub mod views;

// Resource API server
pub mod resource_api;
pub mod data_seeder;

// Common utilities
pub mod app_state;
pub mod config;
pub mod error;

// Re-exports for convenience
pub use error::{AppError, AppResult};
