//! Web layer for the food board.
//!
//! Server-rendered search and submit pages plus a small JSON API for map
//! link resolution and nearest-station lookup.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
