//! Inspiration board API: boards of short cards with like counts.

pub mod api;
pub mod boards;
pub mod cards;
pub mod config;
pub mod error;
pub mod lookup;
pub mod notify;
pub mod store;
