#![warn(clippy::all, rust_2018_idioms)]
//! egui front end of the QR code generator.

pub mod app;
pub mod pages;
pub mod state;
pub mod utils;
pub mod widgets;

pub use app::QrGenApp;
