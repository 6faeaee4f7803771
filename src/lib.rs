//! Post CRUD service over a single `posts` table.

pub mod api;
pub mod config;
pub mod entities;
pub mod error;
pub mod migration;
pub mod store;
pub mod validation;

pub use api::app;
pub use store::PostStore;
