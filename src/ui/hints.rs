//! Footer hints for the current interaction mode.

use crate::app::state::AppState;
use crate::ui::components::footer::Hint;

pub fn build(state: &AppState) -> Vec<Hint> {
    if state.search.is_focused() {
        return vec![
            Hint::new("type", "edit query"),
            Hint::new("backspace", "delete"),
            Hint::new("enter", "search"),
            Hint::new("esc", "cancel"),
        ];
    }

    let mut hints = vec![
        Hint::new("j/k", "navigate"),
        Hint::new("g/G", "top/bottom"),
        Hint::new("tab", "toggle view"),
    ];
    if state.row_count() > 0 {
        hints.push(Hint::new("n/N", "next/prev change"));
        hints.push(Hint::new("/", "search"));
        if !state.search.query().is_empty() {
            hints.push(Hint::new("]/[", "next/prev match"));
        }
    }
    hints.push(Hint::new(
        "w",
        if state.options().ignore_whitespace {
            "match whitespace"
        } else {
            "ignore whitespace"
        },
    ));
    hints.push(Hint::new(
        "i",
        if state.options().ignore_case {
            "match case"
        } else {
            "ignore case"
        },
    ));
    if !state.is_busy() {
        hints.push(Hint::new("o/O", "open old/new"));
    }
    hints.push(Hint::new("q", "quit"));
    hints
}
