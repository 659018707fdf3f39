//! Incremental patchers for host-project configuration.
//!
//! Unlike the renderers in [`crate::codegen`], which refuse to touch
//! existing files, the patchers edit files in place and are safe to
//! re-run: a second invocation with the same entity leaves the files
//! byte-identical.

pub mod admin_config;
pub mod catalog;
