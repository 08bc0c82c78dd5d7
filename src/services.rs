pub mod blog;
pub mod db;
pub mod error;
pub mod health;
pub mod pagination;
pub mod profile;
pub mod project;
pub mod seed;
