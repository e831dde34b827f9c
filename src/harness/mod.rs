//! Visual harness for deterministic rendering snapshots.

use crate::app::state::AppState;
use crate::diff::DiffOptions;
use crate::domain::{FileSide, ViewMode};
use crate::fixtures;
use crate::ui;
use anyhow::Context;
use ratatui::Terminal;
use ratatui::backend::TestBackend;

/// Renders the demo files in both view modes into plain text.
pub fn render_demo_dump(width: u16, height: u16) -> anyhow::Result<String> {
    let side_by_side = render_demo(ViewMode::SideBySide, width, height)?;
    let inline = render_demo(ViewMode::Inline, width, height)?;

    Ok(format!(
        "=== SIDE-BY-SIDE ===\n{side_by_side}\n\n=== INLINE ===\n{inline}\n"
    ))
}

fn render_demo(mode: ViewMode, width: u16, height: u16) -> anyhow::Result<String> {
    let mut state = AppState::new(mode, DiffOptions::default());
    state.set_file(FileSide::Old, fixtures::demo_old_file());
    state.set_file(FileSide::New, fixtures::demo_new_file());
    state.next_change();

    render_state_to_string(&mut state, width, height)
}

fn render_state_to_string(
    state: &mut AppState,
    width: u16,
    height: u16,
) -> anyhow::Result<String> {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).context("failed to create test terminal")?;

    terminal
        .draw(|frame| ui::render(frame, state))
        .context("failed to render frame")?;

    let buffer = terminal.backend().buffer().clone();

    let mut out = String::new();
    for y in 0..height {
        for x in 0..width {
            out.push_str(buffer[(x, y)].symbol());
        }
        while out.ends_with(' ') {
            out.pop();
        }
        out.push('\n');
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::render_demo_dump;

    #[test]
    fn demo_dump_contains_both_modes() {
        let dump = render_demo_dump(140, 36).expect("render should succeed");
        assert!(dump.contains("=== SIDE-BY-SIDE ==="));
        assert!(dump.contains("=== INLINE ==="));
        assert!(dump.contains("frame.rs.orig"));
        assert!(dump.contains("FrameHeader"));
    }
}
