/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `tasks`: Task CRUD endpoints
/// - `activity`: The caller's activity history
/// - `board`: Server-rendered task board

pub mod activity;
pub mod board;
pub mod health;
pub mod tasks;
