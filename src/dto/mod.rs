pub mod auth;
pub mod books;
pub mod cart;
pub mod favorites;
pub mod orders;
pub mod reviews;
pub mod stats;
pub mod users;
