//! Test helpers shared across the workspace.
//!
//! [`env`] guards environment variables read by fallbacks and [`text`]
//! prepares expected usage text.

pub mod env;
pub mod text;
