//! Product Messages

mod handlers;

pub(crate) use handlers::*;
