//! SQLite storage implementation for alerts.

mod model;
mod repository;

pub use model::AlertDB;
pub use repository::AlertRepository;
