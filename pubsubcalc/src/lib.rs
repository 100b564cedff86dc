#![warn(clippy::all, rust_2018_idioms)]

mod app;
pub mod config;
pub mod error;
mod handlers;
pub mod sum;
mod views;
pub use app::{router, start_server, AppState};
