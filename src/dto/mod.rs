pub mod auth;
pub mod cart;
pub mod catalog;
pub mod dashboard;
pub mod inventory;
pub mod orders;
pub mod users;
