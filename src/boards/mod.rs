//! Boards: model and REST handlers.

pub mod model;
pub mod routes;

pub use model::Board;
