//! Catalogue use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep presentation layers decoupled from storage details.
//! - Deliver change notifications after committed writes.

pub mod catalog_service;
pub mod clock;
pub mod events;
pub mod restaurant_service;
pub mod seed;
