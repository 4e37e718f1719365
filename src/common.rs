//! Pieces shared by the library and the executable.
pub mod box_error;
pub mod config;
pub mod error;
