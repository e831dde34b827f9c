//! Opening the config file in the user's editor.

use anyhow::{Result, anyhow};
use std::env;
use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::Command;

const FALLBACK_EDITORS: [&str; 3] = ["nvim", "vim", "vi"];

/// Opens `path` in `$VISUAL`, then `$EDITOR`, then the first of nvim/vim/vi
/// that exists.
pub fn edit_file_with_system_editor(path: &Path) -> Result<()> {
    let candidates = editor_candidates(env::var_os("VISUAL"), env::var_os("EDITOR"));

    for command in &candidates {
        let mut parts = command.split_whitespace();
        let Some(program) = parts.next() else {
            continue;
        };

        match Command::new(program).args(parts).arg(path).status() {
            Ok(status) if status.success() => return Ok(()),
            Ok(status) => {
                let code = status
                    .code()
                    .map_or_else(|| "unknown".to_owned(), |code| code.to_string());
                return Err(anyhow!("editor `{command}` exited with status {code}"));
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("editor `{command}` not found, trying next");
            }
            Err(err) => return Err(anyhow!("failed to launch editor `{command}`: {err}")),
        }
    }

    Err(anyhow!(
        "no editor found (tried $VISUAL, $EDITOR, {})",
        FALLBACK_EDITORS.join(", ")
    ))
}

fn editor_candidates(visual: Option<OsString>, editor: Option<OsString>) -> Vec<String> {
    [visual, editor]
        .into_iter()
        .flatten()
        .map(|value| value.to_string_lossy().trim().to_owned())
        .filter(|value| !value.is_empty())
        .chain(FALLBACK_EDITORS.iter().map(|name| (*name).to_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::editor_candidates;
    use std::ffi::OsString;

    #[test]
    fn visual_wins_over_editor_and_fallbacks() {
        let candidates = editor_candidates(
            Some(OsString::from("code --wait")),
            Some(OsString::from("nano")),
        );

        assert_eq!(candidates, ["code --wait", "nano", "nvim", "vim", "vi"]);
    }

    #[test]
    fn blank_variables_are_skipped() {
        let candidates = editor_candidates(Some(OsString::from("  ")), None);

        assert_eq!(candidates, ["nvim", "vim", "vi"]);
    }
}
