//! Background worker messages and async file-loading tasks.

use crate::domain::FileSide;
use crate::files::errors::format_error_chain;
use crate::files::{LoadedFile, picker, try_read_text_file};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc::UnboundedSender;

/// Outcome of loading one side, already formatted for the header.
pub type LoadResult = Result<Option<LoadedFile>, String>;

/// Message sent from background workers to the UI event loop.
#[derive(Debug)]
pub enum WorkerMessage {
    /// `Ok(None)` means nothing was loaded and nothing went wrong, e.g. the
    /// dialog was dismissed or the file vanished.
    FileLoaded { side: FileSide, result: LoadResult },
}

/// Spawns a read of a path given on the command line.
pub fn spawn_load_file(tx: UnboundedSender<WorkerMessage>, side: FileSide, path: PathBuf) {
    tokio::spawn(async move {
        let result = load_path(&path).await;
        let _ = tx.send(WorkerMessage::FileLoaded { side, result });
    });
}

/// Spawns the file dialog followed by a read of the chosen file.
pub fn spawn_pick_file(tx: UnboundedSender<WorkerMessage>, side: FileSide) {
    tokio::spawn(async move {
        let mut failure = None;
        let loaded =
            picker::pick_text_file(side, |error| failure = Some(format_error_chain(&error))).await;
        let result = match failure {
            Some(error) => Err(error),
            None => Ok(loaded),
        };

        let _ = tx.send(WorkerMessage::FileLoaded { side, result });
    });
}

/// Reads an explicitly named path. Unlike a picked file, a missing path is
/// an error the user should see.
async fn load_path(path: &Path) -> LoadResult {
    let mut failure = None;
    let loaded =
        try_read_text_file(path, |error| failure = Some(format_error_chain(&error))).await;

    match failure {
        Some(error) => Err(error),
        None if loaded.is_none() => Err(format!("{} does not exist", path.display())),
        None => Ok(loaded),
    }
}
