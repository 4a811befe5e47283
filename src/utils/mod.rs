//! Shared utilities: rendered file output.

pub mod script;

pub use script::{output_path, write_rendered_file};
