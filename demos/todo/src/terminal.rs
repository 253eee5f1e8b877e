//! Draws a [`ListView`] as terminal lines.

use todo_core::view::{ItemNode, ListNode, ListView, TextStyle};

const STRIKE: &str = "\x1b[9m";
const RESET: &str = "\x1b[0m";

/// Number of id characters shown; enough to type a unique prefix.
pub const SHORT_ID_LEN: usize = 8;

/// One line per node. `ansi` enables strikethrough for completed items;
/// without it completed text is wrapped in `~`.
#[must_use]
pub fn render_lines(view: &ListView, ansi: bool) -> Vec<String> {
    view.nodes()
        .iter()
        .map(|node| match node {
            ListNode::Item(item) => item_line(item, ansi),
            ListNode::Placeholder(placeholder) => format!("  {}", placeholder.message),
        })
        .collect()
}

fn item_line(item: &ItemNode, ansi: bool) -> String {
    let mark = if item.toggle.checked { '✓' } else { ' ' };
    let text = match (item.label.style, ansi) {
        (TextStyle::Plain, _) => item.label.text.clone(),
        (TextStyle::Strikethrough, true) => format!("{STRIKE}{}{RESET}", item.label.text),
        (TextStyle::Strikethrough, false) => format!("~{}~", item.label.text),
    };
    let short_id: String = item.id.as_str().chars().take(SHORT_ID_LEN).collect();
    format!("[{mark}] {text}  ({short_id})")
}
