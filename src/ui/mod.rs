//! UI utilities for terminal output
//!
//! Progress spinners shown while the organization and Identity Center
//! data are collected.

mod spinner;

pub use spinner::{clear_spinner, create_spinner, finish_spinner, set_spinner_message};
