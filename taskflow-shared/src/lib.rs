//! # Taskflow Shared Library
//!
//! This crate contains the domain types, persistence, and side-channel
//! logging used by the Taskflow API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models (tasks, user activity rows)
//! - `store`: Storage traits with PostgreSQL and in-memory backends
//! - `activity`: Best-effort activity logger and its event types
//! - `auth`: Session token validation and per-request identity
//! - `db`: Connection pool and migrations
//! - `ui`: Server-rendered task components

pub mod activity;
pub mod auth;
pub mod db;
pub mod models;
pub mod store;
pub mod ui;

/// Current version of the Taskflow shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
