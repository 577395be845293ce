//! The history page: every saved record in a table, newest at the bottom,
//! plus the clear-all flow behind a confirmation dialog.

use cringe_records::RecordStore;
use crossterm::event::KeyCode;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Position, Rect};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Row, Table, TableState};
use tracing::warn;

use crate::ui;

const EMPTY_INFO: &str = "History is empty.";
const CLEAR_FAILED: &str = "Could not clear the history.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialog {
    /// Ask before throwing the whole history away.
    ConfirmClear,
    /// One-line notice dismissed by any key.
    Info(&'static str),
}

#[derive(Debug, Default)]
pub struct HistoryPage {
    table_state: TableState,
    dialog: Option<Dialog>,
    clear_down: bool,
    clear_area: Rect,
    confirm_area: Rect,
    cancel_area: Rect,
}

impl HistoryPage {
    pub fn new() -> Self {
        HistoryPage::default()
    }

    /// While a dialog is up it owns the keyboard and the pointer.
    pub fn dialog_open(&self) -> bool {
        self.dialog.is_some()
    }

    pub fn request_clear(&mut self, store: &RecordStore) {
        self.dialog = Some(if store.is_empty() {
            Dialog::Info(EMPTY_INFO)
        } else {
            Dialog::ConfirmClear
        });
    }

    pub async fn confirm_clear(&mut self, store: &mut RecordStore) {
        match store.clear().await {
            Ok(()) => {
                self.table_state.select(None);
                self.dialog = None;
            }
            Err(err) => {
                // The records are still on disk and still on screen.
                warn!("failed to clear history: {err:?}");
                self.dialog = Some(Dialog::Info(CLEAR_FAILED));
            }
        }
    }

    pub async fn handle_key(&mut self, code: KeyCode, store: &mut RecordStore) {
        match self.dialog {
            Some(Dialog::ConfirmClear) => match code {
                KeyCode::Enter | KeyCode::Char('y') => self.confirm_clear(store).await,
                KeyCode::Esc | KeyCode::Char('n') => self.dialog = None,
                _ => {}
            },
            Some(Dialog::Info(_)) => self.dialog = None,
            None => match code {
                KeyCode::Up | KeyCode::Char('k') => self.scroll_up(store.len()),
                KeyCode::Down | KeyCode::Char('j') => self.scroll_down(store.len()),
                KeyCode::Char('c') => self.request_clear(store),
                _ => {}
            },
        }
    }

    fn scroll_up(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let prev = self.table_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.table_state.select(Some(prev));
    }

    fn scroll_down(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let next = match self.table_state.selected() {
            Some(i) => (i + 1).min(len - 1),
            None => 0,
        };
        self.table_state.select(Some(next));
    }

    pub fn press_at(&mut self, x: u16, y: u16) {
        if self.dialog.is_none() {
            self.clear_down = self.clear_area.contains(Position::new(x, y));
        }
    }

    pub fn clear_pressed(&mut self) {
        self.clear_down = false;
    }

    pub async fn click_at(&mut self, x: u16, y: u16, store: &mut RecordStore) {
        let pos = Position::new(x, y);
        match self.dialog {
            Some(Dialog::ConfirmClear) => {
                if self.confirm_area.contains(pos) {
                    self.confirm_clear(store).await;
                } else if self.cancel_area.contains(pos) {
                    self.dialog = None;
                }
            }
            Some(Dialog::Info(_)) => self.dialog = None,
            None => {
                if self.clear_down && self.clear_area.contains(pos) {
                    self.request_clear(store);
                }
            }
        }
        self.clear_down = false;
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, store: &RecordStore) {
        let rows_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(3),
            ])
            .split(area);

        let title = Paragraph::new("CRINGE HISTORY")
            .style(ui::title())
            .alignment(Alignment::Center);
        f.render_widget(title, rows_layout[0]);

        let rows: Vec<Row> = store
            .records()
            .iter()
            .map(|record| Row::new(vec![record.date.clone(), record.count.to_string()]))
            .collect();
        let table = Table::new(rows, [Constraint::Length(20), Constraint::Min(5)])
            .header(Row::new(vec!["Date", "Count"]).style(ui::table_header()))
            .block(Block::default().borders(Borders::ALL))
            .row_highlight_style(ui::selected_row());
        f.render_stateful_widget(table, rows_layout[2], &mut self.table_state);

        self.clear_area = ui::centered(rows_layout[4], 16, 3);
        let style = if store.is_empty() {
            ui::disabled_button()
        } else {
            ui::danger_button(self.clear_down)
        };
        let clear = Paragraph::new("CLEAR")
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(clear, self.clear_area);

        if let Some(dialog) = self.dialog {
            self.render_dialog(f, area, dialog);
        }
    }

    fn render_dialog(&mut self, f: &mut Frame, area: Rect, dialog: Dialog) {
        let height = match dialog {
            Dialog::ConfirmClear => 7,
            Dialog::Info(_) => 5,
        };
        let modal = ui::centered(area, 36, height);
        f.render_widget(Clear, modal);
        f.render_widget(
            Block::default().borders(Borders::ALL).style(ui::base()),
            modal,
        );

        let message = match dialog {
            Dialog::ConfirmClear => "Clear all history?",
            Dialog::Info(text) => text,
        };
        let message_area = Rect::new(
            modal.x + 1,
            modal.y + 1,
            modal.width.saturating_sub(2),
            1,
        );
        let message = Paragraph::new(message)
            .style(ui::base())
            .alignment(Alignment::Center);
        f.render_widget(message, message_area);

        match dialog {
            Dialog::ConfirmClear => {
                let buttons = Rect::new(
                    modal.x + 1,
                    modal.y + 3,
                    modal.width.saturating_sub(2),
                    3,
                );
                let halves = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(buttons);
                self.cancel_area = ui::centered(halves[0], 12, 3);
                self.confirm_area = ui::centered(halves[1], 12, 3);

                let cancel = Paragraph::new("Cancel")
                    .style(ui::tap_button(false))
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL));
                f.render_widget(cancel, self.cancel_area);

                let confirm = Paragraph::new("Clear")
                    .style(ui::danger_button(false))
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL));
                f.render_widget(confirm, self.confirm_area);
            }
            Dialog::Info(_) => {
                let hint_area = Rect::new(
                    modal.x + 1,
                    modal.y + 3,
                    modal.width.saturating_sub(2),
                    1,
                );
                let hint = Paragraph::new("press any key")
                    .style(ui::base())
                    .alignment(Alignment::Center);
                f.render_widget(hint, hint_area);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cringe_records::{MemoryStorage, Record, Storage, StorageError};

    fn store() -> RecordStore {
        RecordStore::new(Box::new(MemoryStorage::new()))
    }

    async fn store_with(counts: &[u32]) -> RecordStore {
        let mut store = store();
        for &count in counts {
            store.append(Record::now(count)).await.unwrap();
        }
        store
    }

    /// Lets writes through but refuses to delete anything.
    struct StubbornStorage {
        inner: MemoryStorage,
    }

    #[async_trait]
    impl Storage for StubbornStorage {
        async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get_item(key).await
        }

        async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.inner.set_item(key, value).await
        }

        async fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("read-only")))
        }
    }

    #[tokio::test]
    async fn test_clear_on_empty_history_informs() {
        let store = store();
        let mut page = HistoryPage::new();
        page.request_clear(&store);
        assert_eq!(page.dialog, Some(Dialog::Info(EMPTY_INFO)));
    }

    #[tokio::test]
    async fn test_clear_asks_for_confirmation() {
        let store = store_with(&[4]).await;
        let mut page = HistoryPage::new();
        page.request_clear(&store);
        assert_eq!(page.dialog, Some(Dialog::ConfirmClear));
    }

    #[tokio::test]
    async fn test_confirmed_clear_empties_history() {
        let mut store = store_with(&[4, 9]).await;
        let mut page = HistoryPage::new();
        page.request_clear(&store);
        page.handle_key(KeyCode::Enter, &mut store).await;
        assert!(store.is_empty());
        assert!(!page.dialog_open());
    }

    #[tokio::test]
    async fn test_cancelled_clear_keeps_history() {
        let mut store = store_with(&[4, 9]).await;
        let mut page = HistoryPage::new();
        page.request_clear(&store);
        page.handle_key(KeyCode::Esc, &mut store).await;
        assert_eq!(store.len(), 2);
        assert!(!page.dialog_open());
    }

    #[tokio::test]
    async fn test_failed_clear_keeps_history_and_says_so() {
        let storage = StubbornStorage {
            inner: MemoryStorage::new(),
        };
        let mut store = RecordStore::new(Box::new(storage));
        store.append(Record::now(4)).await.unwrap();

        let mut page = HistoryPage::new();
        page.request_clear(&store);
        page.handle_key(KeyCode::Enter, &mut store).await;
        assert_eq!(store.len(), 1);
        assert_eq!(page.dialog, Some(Dialog::Info(CLEAR_FAILED)));

        // Any key puts the notice away.
        page.handle_key(KeyCode::Char('x'), &mut store).await;
        assert!(!page.dialog_open());
    }

    #[tokio::test]
    async fn test_scroll_is_clamped() {
        let mut store = store_with(&[1, 2, 3]).await;
        let mut page = HistoryPage::new();

        page.handle_key(KeyCode::Up, &mut store).await;
        assert_eq!(page.table_state.selected(), Some(0));

        for _ in 0..10 {
            page.handle_key(KeyCode::Down, &mut store).await;
        }
        assert_eq!(page.table_state.selected(), Some(2));
    }

    #[tokio::test]
    async fn test_scroll_on_empty_history_selects_nothing() {
        let mut store = store();
        let mut page = HistoryPage::new();
        page.handle_key(KeyCode::Down, &mut store).await;
        assert_eq!(page.table_state.selected(), None);
    }

    #[tokio::test]
    async fn test_dialog_click_targets() {
        let mut store = store_with(&[4]).await;
        let mut page = HistoryPage::new();
        page.request_clear(&store);
        page.confirm_area = Rect::new(20, 10, 12, 3);
        page.cancel_area = Rect::new(4, 10, 12, 3);

        // A click outside both buttons leaves the dialog up.
        page.click_at(0, 0, &mut store).await;
        assert!(page.dialog_open());

        page.click_at(5, 11, &mut store).await;
        assert!(!page.dialog_open());
        assert_eq!(store.len(), 1);

        page.request_clear(&store);
        page.click_at(21, 11, &mut store).await;
        assert!(!page.dialog_open());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_clear_button_click() {
        let mut store = store_with(&[4]).await;
        let mut page = HistoryPage::new();
        page.clear_area = Rect::new(30, 18, 16, 3);
        page.press_at(32, 19);
        page.click_at(32, 19, &mut store).await;
        assert_eq!(page.dialog, Some(Dialog::ConfirmClear));
    }
}
