//! Products

mod errors;
mod handlers;
pub(crate) mod messages;
mod models;

pub(crate) use handlers::*;
