pub mod api;
pub mod config;
pub mod corpus;
pub mod error;
pub mod geometry;
pub mod locale;
pub mod optimizer;
pub mod scorer;

pub use error::{KaResult, KeyAnnealError};
