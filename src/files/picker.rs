//! Native file-open dialog via `rfd`.
//!
//! The dialog is single-shot: there is no cancellation and no guard against
//! concurrent invocations, so callers keep at most one picker open.

use crate::domain::FileSide;
use crate::files::{FileReadError, LoadedFile, Result, try_read_text_file};
use std::path::PathBuf;

/// Asks the user for a file, starting in the documents folder.
///
/// Returns `Ok(None)` when the dialog is dismissed.
pub async fn select_file(side: FileSide) -> Result<Option<PathBuf>> {
    let title = dialog_title(side);
    let picked = tokio::task::spawn_blocking(move || {
        let mut dialog = rfd::FileDialog::new().set_title(title);
        if let Some(documents) = dirs::document_dir() {
            dialog = dialog.set_directory(documents);
        }
        dialog.pick_file()
    })
    .await
    .map_err(|error| FileReadError::Dialog(error.to_string()))?;

    match &picked {
        Some(path) => log::debug!("picked {side} file {}", path.display()),
        None => log::debug!("{side} file selection cancelled"),
    }

    Ok(picked)
}

/// Picks a file with the native dialog and reads it as text.
///
/// Cancellation and missing files yield `None` silently; dialog and read
/// failures go to `on_error` and also yield `None`.
pub async fn pick_text_file(
    side: FileSide,
    on_error: impl FnOnce(FileReadError),
) -> Option<LoadedFile> {
    read_selection(side, select_file(side), on_error).await
}

/// Reads whatever `selection` resolves to, reporting failures to `on_error`.
pub async fn read_selection(
    side: FileSide,
    selection: impl Future<Output = Result<Option<PathBuf>>>,
    on_error: impl FnOnce(FileReadError),
) -> Option<LoadedFile> {
    match selection.await {
        Ok(Some(path)) => try_read_text_file(&path, on_error).await,
        Ok(None) => None,
        Err(error) => {
            log::warn!("{side} file dialog failed: {error}");
            on_error(error);
            None
        }
    }
}

fn dialog_title(side: FileSide) -> String {
    match side {
        FileSide::Old => "Select original file".to_owned(),
        FileSide::New => "Select modified file".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::{dialog_title, read_selection};
    use crate::domain::FileSide;
    use crate::files::FileReadError;
    use std::fs;

    #[test]
    fn dialog_titles_name_the_side() {
        assert!(dialog_title(FileSide::Old).contains("original"));
        assert!(dialog_title(FileSide::New).contains("modified"));
    }

    #[tokio::test]
    async fn cancelled_dialog_is_silent() {
        let mut reported = false;

        let loaded =
            read_selection(FileSide::Old, async { Ok(None) }, |_| reported = true).await;

        assert!(loaded.is_none());
        assert!(!reported);
    }

    #[tokio::test]
    async fn dialog_failure_is_reported() {
        let mut reported = None;

        let loaded = read_selection(
            FileSide::New,
            async { Err(FileReadError::Dialog("portal unavailable".to_owned())) },
            |error| reported = Some(error),
        )
        .await;

        assert!(loaded.is_none());
        assert!(matches!(
            reported,
            Some(FileReadError::Dialog(message)) if message == "portal unavailable"
        ));
    }

    #[tokio::test]
    async fn picked_directory_is_reported_as_invalid_path() {
        let dir = tempfile::tempdir().unwrap();
        let picked = dir.path().to_path_buf();
        let mut reported = None;

        let loaded = read_selection(
            FileSide::Old,
            async move { Ok(Some(picked)) },
            |error| reported = Some(error),
        )
        .await;

        assert!(loaded.is_none());
        assert!(matches!(reported, Some(FileReadError::InvalidPath { .. })));
    }

    #[tokio::test]
    async fn picked_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("picked.txt");
        fs::write(&path, "hello\n").unwrap();
        let picked = path.clone();

        let loaded = read_selection(
            FileSide::New,
            async move { Ok(Some(picked)) },
            |error| panic!("unexpected error: {error}"),
        )
        .await
        .unwrap();

        assert_eq!(loaded.path, path);
        assert_eq!(loaded.text, "hello\n");
    }
}
