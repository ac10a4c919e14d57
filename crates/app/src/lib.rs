//! Shared application domain and persistence modules.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod health;
pub mod object_ids;

pub use domain::products;
pub use mongodb::bson;

#[cfg(test)]
mod test;
