mod dto;
pub mod handlers;
mod repo;
mod repo_types;
mod services;
pub mod streak;
mod validate;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::meal_routes()
}
