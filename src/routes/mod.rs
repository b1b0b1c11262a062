use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod auth;
pub mod books;
pub mod cart;
pub mod doc;
pub mod favorites;
pub mod health;
pub mod orders;
pub mod params;
pub mod reviews;
pub mod stats;
pub mod users;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/books", books::router())
        .nest("/cart", cart::router())
        .nest("/orders", orders::router())
        .nest("/stats", stats::router())
        .nest("/admin", admin::router())
        .merge(reviews::router())
        .merge(favorites::router())
}
