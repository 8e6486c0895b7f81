//! # API Route Handlers
//!
//! Axum handlers for `briefly-server`, split by agent.

pub mod blog;
pub mod general;
pub mod meeting;

pub use blog::*;
pub use general::*;
pub use meeting::*;

use super::{errors::AppError, state::AppState};
