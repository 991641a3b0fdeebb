pub mod api;
pub mod app;
pub mod chat;
pub mod config;
pub mod error;
pub mod scheduler;
pub mod session;
pub mod strings;
pub mod ui;
pub mod utils;
