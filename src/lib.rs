pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod grade;
pub mod models;
pub mod pages;
pub mod paging;
pub mod progress;
pub mod router;
pub mod session;
pub mod state;
pub mod view;
