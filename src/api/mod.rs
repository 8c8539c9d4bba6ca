//! API handlers for Athenaeum REST endpoints

pub mod auth;
pub mod authors;
pub mod books;
pub mod borrows;
pub mod categories;
pub mod fines;
pub mod health;
pub mod library_cards;
pub mod notifications;
pub mod openapi;
pub mod reading_progress;
pub mod reviews;
pub mod wishlist;
