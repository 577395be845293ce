//! Full-screen terminal app. Owns the record store, the two pages and the
//! pager, runs the event loop and renders frames.

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::Result;
use cringe_records::{APP_NAME, RecordStore};
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
};
use futures::{StreamExt, future::FutureExt, select};
use futures_timer::Delay;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::widgets::{Block, Paragraph};
use ratatui::{Frame, Terminal};
use tracing::{debug, warn};

use crate::counter::CounterPage;
use crate::history::HistoryPage;
use crate::pager::{NavStrategy, Page, Pager};
use crate::ui;

/// Frame cadence while idle; also the animation timestep.
const TICK: Duration = Duration::from_millis(16);

pub struct App {
    store: RecordStore,
    pager: Pager,
    counter: CounterPage,
    history: HistoryPage,
    should_quit: bool,
}

impl App {
    pub fn new(store: RecordStore, strategy: NavStrategy) -> Self {
        App {
            store,
            pager: Pager::new(strategy),
            counter: CounterPage::new(),
            history: HistoryPage::new(),
            should_quit: false,
        }
    }

    /// Take over the terminal, run until quit, put the terminal back.
    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            SetTitle(APP_NAME)
        )?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_loop(&mut terminal).await;

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        )?;
        terminal.show_cursor()?;
        result
    }

    async fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let mut reader = EventStream::new();
        let mut last_tick = Instant::now();
        loop {
            let now = Instant::now();
            self.pager.tick(now - last_tick);
            last_tick = now;

            terminal.draw(|f| self.render(f))?;
            if self.should_quit {
                break;
            }

            let mut delay = Delay::new(TICK).fuse();
            let mut event = reader.next().fuse();
            select! {
                _ = delay => {}
                maybe_event = event => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event).await,
                        Some(Err(err)) => {
                            warn!("failed to read terminal event: {err:?}");
                        }
                        None => break,
                    }
                }
            }
        }
        Ok(())
    }

    async fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key).await,
            Event::Mouse(mouse) => self.handle_mouse(mouse).await,
            Event::Resize(cols, rows) => debug!("resized to {cols}x{rows}"),
            _ => {}
        }
    }

    async fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        if self.history.dialog_open() {
            self.history.handle_key(key.code, &mut self.store).await;
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Left | KeyCode::Char('h') => self.pager.select(Page::Counter),
            KeyCode::Right | KeyCode::Char('l') => self.pager.select(Page::History),
            KeyCode::Tab => self.pager.select(self.pager.page().other()),
            _ if self.pager.is_animating() => {}
            _ => match self.pager.page() {
                Page::Counter => self.counter.handle_key(key.code, &mut self.store).await,
                Page::History => self.history.handle_key(key.code, &mut self.store).await,
            },
        }
    }

    async fn handle_mouse(&mut self, mouse: MouseEvent) {
        let (x, y) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                // Dialog buttons act on release only.
                if self.history.dialog_open() {
                    return;
                }
                self.pager.on_down(x, y);
                if !self.pager.is_animating() {
                    match self.pager.page() {
                        Page::Counter => self.counter.press_at(x, y),
                        Page::History => self.history.press_at(x, y),
                    }
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if self.history.dialog_open() {
                    return;
                }
                self.pager.on_drag(x, y);
                if self.pager.is_swiping() {
                    // A swipe steals the press from any button under it.
                    self.counter.clear_pressed();
                    self.history.clear_pressed();
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if self.history.dialog_open() {
                    self.history.click_at(x, y, &mut self.store).await;
                    return;
                }
                if self.pager.on_up() {
                    self.counter.clear_pressed();
                    self.history.clear_pressed();
                } else if !self.pager.is_animating() {
                    match self.pager.page() {
                        Page::Counter => self.counter.click_at(x, y, &mut self.store).await,
                        Page::History => self.history.click_at(x, y, &mut self.store).await,
                    }
                }
            }
            MouseEventKind::ScrollUp if self.can_scroll_history() => {
                self.history.handle_key(KeyCode::Up, &mut self.store).await;
            }
            MouseEventKind::ScrollDown if self.can_scroll_history() => {
                self.history.handle_key(KeyCode::Down, &mut self.store).await;
            }
            _ => {}
        }
    }

    fn can_scroll_history(&self) -> bool {
        self.pager.page() == Page::History && !self.history.dialog_open()
    }

    fn render(&mut self, f: &mut Frame) {
        let size = f.area();
        f.render_widget(Block::default().style(ui::base()), size);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        self.pager.set_width(rows[0].width);
        for (page, pane) in self.pager.split(rows[0]) {
            match page {
                Page::Counter => self.counter.render(f, pane),
                Page::History => self.history.render(f, pane, &self.store),
            }
        }

        let dots =
            Paragraph::new(ui::dots(self.pager.page().index())).alignment(Alignment::Center);
        f.render_widget(dots, rows[1]);
    }
}
