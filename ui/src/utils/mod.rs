pub mod colors;
pub mod logo;
