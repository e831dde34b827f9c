//! Application state and diff navigation.

use crate::{
    diff::{DiffOptions, build_document},
    domain::{DiffDocument, FileSide, ViewMode},
    files::LoadedFile,
    render::view_model::{DiffLineView, LineViewModel, document_rows},
};

/// Spinner frames used for active async operations.
pub const SPINNER_FRAMES: [&str; 8] = ["⢎⡰", "⢎⡡", "⢎⡑", "⢎⠱", "⠎⡱", "⢊⡱", "⢌⡱", "⢆⡱"];

/// Rows moved by page up/down when the viewport height is still unknown.
const DEFAULT_PAGE_ROWS: usize = 20;

/// Top-level mutable application state.
#[derive(Debug)]
pub struct AppState {
    pub should_quit: bool,
    pub error_message: Option<String>,
    pub mode: ViewMode,
    pub search: SearchState,
    options: DiffOptions,
    old: Option<LoadedFile>,
    new: Option<LoadedFile>,
    document: DiffDocument,
    selected: usize,
    scroll: usize,
    viewport_rows: usize,
    operation: Option<OperationState>,
}

impl AppState {
    pub fn new(mode: ViewMode, options: DiffOptions) -> Self {
        Self {
            should_quit: false,
            error_message: None,
            mode,
            search: SearchState::default(),
            options,
            old: None,
            new: None,
            document: DiffDocument::default(),
            selected: 0,
            scroll: 0,
            viewport_rows: 0,
            operation: None,
        }
    }

    /// Replaces one side and recomputes the diff.
    pub fn set_file(&mut self, side: FileSide, file: LoadedFile) {
        match side {
            FileSide::Old => self.old = Some(file),
            FileSide::New => self.new = Some(file),
        }
        self.rebuild();
    }

    pub fn file(&self, side: FileSide) -> Option<&LoadedFile> {
        match side {
            FileSide::Old => self.old.as_ref(),
            FileSide::New => self.new.as_ref(),
        }
    }

    pub fn file_label(&self, side: FileSide) -> String {
        self.file(side)
            .map(LoadedFile::label)
            .unwrap_or_else(|| format!("(no {side} file)"))
    }

    pub fn document(&self) -> &DiffDocument {
        &self.document
    }

    pub fn options(&self) -> DiffOptions {
        self.options
    }

    pub fn toggle_ignore_whitespace(&mut self) {
        self.options.ignore_whitespace = !self.options.ignore_whitespace;
        self.rebuild();
    }

    pub fn toggle_ignore_case(&mut self) {
        self.options.ignore_case = !self.options.ignore_case;
        self.rebuild();
    }

    /// Rows for the active mode. Rebuilt on every call.
    pub fn rows(&self) -> Vec<LineViewModel<'_>> {
        document_rows(&self.document, self.mode)
    }

    pub fn row_count(&self) -> usize {
        match self.mode {
            ViewMode::SideBySide => self.document.side_by_side.rows.len(),
            ViewMode::Inline => self.document.inline.lines.len(),
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.clamp_selection();
    }

    pub fn move_down(&mut self) {
        self.select(self.selected.saturating_add(1));
    }

    pub fn move_up(&mut self) {
        self.select(self.selected.saturating_sub(1));
    }

    pub fn page_down(&mut self) {
        self.select(self.selected.saturating_add(self.page_rows()));
    }

    pub fn page_up(&mut self) {
        self.select(self.selected.saturating_sub(self.page_rows()));
    }

    pub fn move_to_top(&mut self) {
        self.select(0);
    }

    pub fn move_to_bottom(&mut self) {
        self.select(self.row_count().saturating_sub(1));
    }

    /// Jumps to the first row of the next block of changed rows.
    pub fn next_change(&mut self) -> bool {
        let starts = self.change_starts();
        match starts.into_iter().find(|&index| index > self.selected) {
            Some(index) => {
                self.select(index);
                true
            }
            None => false,
        }
    }

    /// Jumps to the first row of the previous block of changed rows.
    pub fn prev_change(&mut self) -> bool {
        let starts = self.change_starts();
        match starts.into_iter().rev().find(|&index| index < self.selected) {
            Some(index) => {
                self.select(index);
                true
            }
            None => false,
        }
    }

    /// Moves to the next row containing the committed query, wrapping around.
    pub fn next_match(&mut self) -> bool {
        let count = self.row_count().max(1);
        let order = (1..=count).map(|step| (self.selected + step) % count);
        let found = self.find_match(order);
        self.select_found(found)
    }

    /// Moves to the previous row containing the committed query, wrapping around.
    pub fn prev_match(&mut self) -> bool {
        let count = self.row_count().max(1);
        let order = (1..=count).map(|step| (self.selected + count - step) % count);
        let found = self.find_match(order);
        self.select_found(found)
    }

    /// Whether `row` contains the committed query.
    pub fn is_match(&self, row: &LineViewModel<'_>) -> bool {
        row.contains(self.search.query())
    }

    pub fn begin_search(&mut self) {
        self.search.focus();
    }

    /// Commits the typed query and jumps to the first match at or after the
    /// selection.
    pub fn commit_search(&mut self) {
        self.search.commit();
        if self.search.query().is_empty() {
            return;
        }

        let count = self.row_count().max(1);
        let found = self.find_match((0..count).map(|step| (self.selected + step) % count));
        if !self.select_found(found) {
            self.error_message = Some(format!("no match for `{}`", self.search.query()));
        }
    }

    pub fn cancel_search(&mut self) {
        self.search.cancel();
    }

    /// Records the visible row count and scrolls so the selection stays visible.
    pub fn sync_viewport(&mut self, rows: usize) {
        self.viewport_rows = rows;
        if rows == 0 {
            return;
        }

        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + rows {
            self.scroll = self.selected + 1 - rows;
        }

        let max_scroll = self.row_count().saturating_sub(rows);
        self.scroll = self.scroll.min(max_scroll);
    }

    pub fn begin_operation(&mut self, label: impl Into<String>) {
        self.operation = Some(OperationState {
            label: label.into(),
            spinner_index: 0,
        });
    }

    pub fn end_operation(&mut self) {
        self.operation = None;
    }

    pub fn is_busy(&self) -> bool {
        self.operation.is_some()
    }

    pub fn advance_spinner(&mut self) {
        if let Some(operation) = self.operation.as_mut() {
            operation.spinner_index = (operation.spinner_index + 1) % SPINNER_FRAMES.len();
        }
    }

    pub fn operation_display(&self) -> Option<String> {
        let operation = self.operation.as_ref()?;
        let frame = SPINNER_FRAMES
            .get(operation.spinner_index)
            .copied()
            .unwrap_or("⢎⡰");
        Some(format!("{frame} {}", operation.label))
    }

    fn rebuild(&mut self) {
        let old = self.old.as_ref().map_or("", |file| file.text.as_str());
        let new = self.new.as_ref().map_or("", |file| file.text.as_str());
        self.document = build_document(old, new, &self.options);
        self.clamp_selection();
    }

    fn select(&mut self, index: usize) {
        self.selected = index.min(self.row_count().saturating_sub(1));
    }

    fn clamp_selection(&mut self) {
        self.select(self.selected);
        self.scroll = self.scroll.min(self.selected);
    }

    fn page_rows(&self) -> usize {
        if self.viewport_rows == 0 {
            DEFAULT_PAGE_ROWS
        } else {
            self.viewport_rows
        }
    }

    fn change_starts(&self) -> Vec<usize> {
        let rows = self.rows();
        rows.iter()
            .enumerate()
            .filter(|(index, row)| {
                row.is_change() && (*index == 0 || !rows[index - 1].is_change())
            })
            .map(|(index, _)| index)
            .collect()
    }

    fn find_match(&self, order: impl Iterator<Item = usize>) -> Option<usize> {
        let query = self.search.query();
        if query.is_empty() {
            return None;
        }

        let rows = self.rows();
        order
            .filter_map(|index| rows.get(index).map(|row| (index, row)))
            .find(|(_, row)| row.contains(query))
            .map(|(index, _)| index)
    }

    fn select_found(&mut self, found: Option<usize>) -> bool {
        match found {
            Some(index) => {
                self.select(index);
                true
            }
            None => false,
        }
    }
}

#[derive(Debug)]
struct OperationState {
    label: String,
    spinner_index: usize,
}

/// Search box state: the buffer being typed and the last committed query.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    buffer: String,
    committed: String,
    focused: bool,
}

impl SearchState {
    pub fn focus(&mut self) {
        self.buffer = self.committed.clone();
        self.focused = true;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// The query rows are matched against.
    pub fn query(&self) -> &str {
        &self.committed
    }

    pub fn push_char(&mut self, ch: char) {
        self.buffer.push(ch);
    }

    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    fn commit(&mut self) {
        self.committed = std::mem::take(&mut self.buffer);
        self.focused = false;
    }

    fn cancel(&mut self) {
        self.buffer.clear();
        self.focused = false;
    }
}
