pub mod api;
pub mod common;
pub mod config;
pub mod db;

pub use config::{CONFIG, StatusMode};
