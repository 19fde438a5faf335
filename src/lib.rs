//! Library crate for biblio-manager.
//!
//! This crate exposes the building blocks of the TUI:
//! - Remote API data client (`api`)
//! - Application state and update loop (`app`)
//! - Runtime configuration (`config`)
//! - Generic CRUD orchestration for one entity screen (`controller`)
//! - Entity form state and validation (`form`)
//! - Entity snapshots and draft payloads (`model`)
//! - Notification capability and toast queue (`notify`)
//! - UI rendering and widgets (`ui`)
//!
//! It is used by the `biblio-manager` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod api;
pub mod app;
pub mod config;
pub mod controller;
pub mod form;
pub mod model;
pub mod notify;
pub mod ui;

// Re-export commonly used items at the crate root for convenience
pub use api::{ApiClient, ApiError};
pub use controller::{Resource, ResourceController};
