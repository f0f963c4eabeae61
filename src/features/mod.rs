pub mod admin;
pub mod auth;
pub mod catalog;
pub mod categories;
pub mod sitemap;
