//! Artifact renderers: each module turns an [`suluforge_core::EntityConfig`]
//! into one generated source file.

pub mod admin;
pub mod controller;
pub mod entity;
pub mod form_xml;
pub mod list_xml;
pub mod php;
pub mod property_blocks;
pub mod repository;
pub mod translation;
