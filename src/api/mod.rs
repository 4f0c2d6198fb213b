//! API Module
//!
//! HTTP handlers and routing over the instance's cache store.
//!
//! # Endpoints
//! - `PUT /cache` - Store a JSON value under a key
//! - `GET /cache/:key` - Retrieve a value by key
//! - `DELETE /cache/:key` - Delete a key, or every key with that prefix
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
