//! Task board page

use super::task_item::TaskItem;
use super::RenderError;
use crate::auth::context::AuthContext;
use crate::models::task::Task;
use tera::{Context, Tera};

const TEMPLATE: &str = include_str!("../../templates/board.html.tera");

/// Renders every task as a card inside a full HTML page
///
/// Cards are rendered first and inserted verbatim; each one has already
/// escaped its own content.
///
/// # Errors
///
/// Returns an error if any template fails to render
pub fn render_board(tasks: &[Task], session: Option<&AuthContext>) -> Result<String, RenderError> {
    let items = tasks
        .iter()
        .map(|task| TaskItem::new(task, session).render())
        .collect::<Result<Vec<_>, _>>()?;

    let mut context = Context::new();
    context.insert("items", &items);

    Ok(Tera::one_off(TEMPLATE, &context, true)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::task::{TaskPriority, TaskStatus};
    use chrono::Utc;
    use uuid::Uuid;

    fn task(title: &str) -> Task {
        let now = Utc::now();
        Task {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: None,
            status: TaskStatus::Pending,
            priority: TaskPriority::Medium,
            due_date: None,
            user_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_empty_board() {
        let html = render_board(&[], None).unwrap();
        assert!(html.contains("No tasks yet."));
    }

    #[test]
    fn test_board_keeps_order_and_card_markup() {
        let html = render_board(&[task("First"), task("Second & more")], None).unwrap();

        let first = html.find("First").unwrap();
        let second = html.find("Second &amp; more").unwrap();
        assert!(first < second);
        assert!(html.contains("<select name=\"status\""));
        assert!(!html.contains("No tasks yet."));
    }
}
