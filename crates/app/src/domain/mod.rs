//! Kiosk Domain Concerns

pub mod products;
