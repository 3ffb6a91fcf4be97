//! # Taskflow API Server Library
//!
//! This library provides the core functionality for the Taskflow API server.
//!
//! ## Modules
//!
//! - `app`: Application state, router builder and the auth layer
//! - `client`: Client IP and user agent for activity rows
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `middleware`: Security headers
//! - `routes`: API route handlers

pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
