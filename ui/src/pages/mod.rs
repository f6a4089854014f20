//! Pages module for the application.
//!
//! - `qr_page`: text field, generate action and the generated code

mod qr_page;

pub use qr_page::qr_page;
