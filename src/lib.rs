pub mod api;
pub mod config;
pub mod consts;
pub mod error;
pub mod joints;
pub mod scorer;
pub mod skeleton;
// cmd and reports belong to the binary (main.rs).

pub use error::{KineScoreError, KsResult};
