/// Server-rendered task components
///
/// Templates are compiled into the binary and rendered with HTML
/// autoescaping on.
///
/// # Modules
///
/// - [`task_item`]: One task card with its status selector
/// - [`board`]: Full page listing a user's tasks

pub mod board;
pub mod task_item;

pub use board::render_board;
pub use task_item::{priority_class, TaskItem, TaskItemView};

/// Error type for component rendering
#[derive(Debug, thiserror::Error)]
#[error("Failed to render template: {0}")]
pub struct RenderError(#[from] tera::Error);
