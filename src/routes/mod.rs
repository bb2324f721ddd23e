use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod dashboard;
pub mod doc;
pub mod health;
pub mod inventory;
pub mod orders;
pub mod params;
pub mod users;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/catalog", catalog::router())
        .nest("/cart", cart::router())
        .nest("/orders", orders::router())
        .nest("/inventory", inventory::router())
        .nest("/users", users::router())
        .nest("/dashboard", dashboard::router())
        .nest("/admin", admin::router())
}
