//! The tap counter page: a running count, the CRINGE button that bumps it
//! and the RESET button that files the count away as a record.

use std::time::{Duration, Instant};

use cringe_records::{Record, RecordStore};
use crossterm::event::KeyCode;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Position, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use tracing::warn;

use crate::ui;

/// How long a key-triggered button stays in its pressed style.
const KEY_FLASH: Duration = Duration::from_millis(120);

#[derive(Debug, Default)]
pub struct CounterPage {
    count: u32,
    cringe_pressed: bool,
    reset_pressed: bool,
    tap_flash: Option<Instant>,
    reset_flash: Option<Instant>,
    cringe_area: Rect,
    reset_area: Rect,
}

impl CounterPage {
    pub fn new() -> Self {
        CounterPage::default()
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn tap(&mut self) {
        self.count = self.count.saturating_add(1);
    }

    /// File the current count away and start over. The store skips counts
    /// of zero, so mashing reset does not litter the history.
    pub async fn reset(&mut self, store: &mut RecordStore) {
        let record = Record::now(self.count);
        self.count = 0;
        if let Err(err) = store.append(record).await {
            warn!("failed to save record: {err:?}");
        }
    }

    pub async fn handle_key(&mut self, code: KeyCode, store: &mut RecordStore) {
        match code {
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.tap_flash = Some(Instant::now() + KEY_FLASH);
                self.tap();
            }
            KeyCode::Char('r') => {
                self.reset_flash = Some(Instant::now() + KEY_FLASH);
                self.reset(store).await;
            }
            _ => {}
        }
    }

    pub fn press_at(&mut self, x: u16, y: u16) {
        let pos = Position::new(x, y);
        self.cringe_pressed = self.cringe_area.contains(pos);
        self.reset_pressed = self.reset_area.contains(pos);
    }

    pub fn clear_pressed(&mut self) {
        self.cringe_pressed = false;
        self.reset_pressed = false;
    }

    /// Complete a click. A button only fires when the press started on it
    /// and the pointer is still over it on release.
    pub async fn click_at(&mut self, x: u16, y: u16, store: &mut RecordStore) {
        let pos = Position::new(x, y);
        if self.cringe_pressed && self.cringe_area.contains(pos) {
            self.tap();
        } else if self.reset_pressed && self.reset_area.contains(pos) {
            self.reset(store).await;
        }
        self.clear_pressed();
    }

    fn flash_active(flash: Option<Instant>) -> bool {
        flash.is_some_and(|until| Instant::now() < until)
    }

    #[cfg(test)]
    pub(crate) fn set_cringe_area(&mut self, area: Rect) {
        self.cringe_area = area;
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(4),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(area);

        let count = Paragraph::new(self.count.to_string())
            .style(ui::title())
            .alignment(Alignment::Center);
        f.render_widget(count, rows[1]);

        self.cringe_area = ui::centered(rows[3], 26, rows[3].height);
        let pressed = self.cringe_pressed || Self::flash_active(self.tap_flash);
        let cringe = Paragraph::new(vec![Line::from("CRINGE"), Line::from("⚠")])
            .style(ui::tap_button(pressed))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(cringe, self.cringe_area);

        self.reset_area = ui::centered(rows[5], 16, rows[5].height);
        let pressed = self.reset_pressed || Self::flash_active(self.reset_flash);
        let reset = Paragraph::new("RESET")
            .style(ui::danger_button(pressed))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(reset, self.reset_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cringe_records::MemoryStorage;

    fn store() -> RecordStore {
        RecordStore::new(Box::new(MemoryStorage::new()))
    }

    #[test]
    fn test_tap_increments() {
        let mut page = CounterPage::new();
        page.tap();
        page.tap();
        assert_eq!(page.count(), 2);
    }

    #[test]
    fn test_count_saturates() {
        let mut page = CounterPage::new();
        page.count = u32::MAX;
        page.tap();
        assert_eq!(page.count(), u32::MAX);
    }

    #[tokio::test]
    async fn test_reset_records_count_and_zeroes() {
        let mut store = store();
        let mut page = CounterPage::new();
        for _ in 0..3 {
            page.tap();
        }
        page.reset(&mut store).await;
        assert_eq!(page.count(), 0);
        assert_eq!(store.records().len(), 1);
        assert_eq!(store.records()[0].count, 3);
    }

    #[tokio::test]
    async fn test_reset_at_zero_records_nothing() {
        let mut store = store();
        let mut page = CounterPage::new();
        page.reset(&mut store).await;
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_space_and_enter_tap() {
        let mut store = store();
        let mut page = CounterPage::new();
        page.handle_key(KeyCode::Char(' '), &mut store).await;
        page.handle_key(KeyCode::Enter, &mut store).await;
        assert_eq!(page.count(), 2);
    }

    #[tokio::test]
    async fn test_reset_key_files_a_record() {
        let mut store = store();
        let mut page = CounterPage::new();
        page.handle_key(KeyCode::Char(' '), &mut store).await;
        page.handle_key(KeyCode::Char('r'), &mut store).await;
        assert_eq!(page.count(), 0);
        assert_eq!(store.records().len(), 1);
    }

    #[tokio::test]
    async fn test_click_fires_only_inside_pressed_button() {
        let mut store = store();
        let mut page = CounterPage::new();
        page.cringe_area = Rect::new(10, 10, 20, 4);

        // Press inside, release outside: no tap.
        page.press_at(15, 11);
        page.click_at(50, 11, &mut store).await;
        assert_eq!(page.count(), 0);

        // Press and release inside: tap.
        page.press_at(15, 11);
        page.click_at(20, 12, &mut store).await;
        assert_eq!(page.count(), 1);

        // Press outside entirely: nothing.
        page.press_at(2, 2);
        page.click_at(15, 11, &mut store).await;
        assert_eq!(page.count(), 1);
    }

    #[tokio::test]
    async fn test_click_reset_button() {
        let mut store = store();
        let mut page = CounterPage::new();
        page.reset_area = Rect::new(10, 20, 16, 3);
        page.tap();
        page.press_at(12, 21);
        page.click_at(12, 21, &mut store).await;
        assert_eq!(page.count(), 0);
        assert_eq!(store.records().len(), 1);
    }
}
