//! Two-page navigation shell.
//!
//! Owns which page is in front and how the other one is reached: either an
//! instant flip (`paged`) or a drag-and-slide transition (`gesture`). The
//! slide itself is a short eased interpolation of the horizontal reveal,
//! driven from the app tick.

use std::time::Duration;

use clap::ValueEnum;
use ratatui::layout::Rect;

use crate::gesture::{DragTracker, Release, SwipeDir};

const COMMIT_DURATION: Duration = Duration::from_millis(300);
const SPRING_BACK_DURATION: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Counter,
    History,
}

impl Page {
    pub fn index(self) -> usize {
        match self {
            Page::Counter => 0,
            Page::History => 1,
        }
    }

    pub fn other(self) -> Page {
        match self {
            Page::Counter => Page::History,
            Page::History => Page::Counter,
        }
    }

    /// Page revealed by swiping in `dir`, if any. Swiping left pulls in the
    /// page on the right.
    fn neighbor(self, dir: SwipeDir) -> Option<Page> {
        match (self, dir) {
            (Page::Counter, SwipeDir::Left) => Some(Page::History),
            (Page::History, SwipeDir::Right) => Some(Page::Counter),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NavStrategy {
    /// Switch pages instantly.
    Paged,
    /// Drag pages with the mouse, with slide and spring-back animation.
    Gesture,
}

fn ease_out(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

fn ease_out_cubic(t: f32) -> f32 {
    let u = 1.0 - t;
    1.0 - u * u * u
}

#[derive(Debug)]
struct Slide {
    from: f32,
    to: f32,
    elapsed: Duration,
    duration: Duration,
    easing: fn(f32) -> f32,
    target: Option<Page>,
}

impl Slide {
    fn commit(from: f32, to: f32, target: Page) -> Self {
        Slide {
            from,
            to,
            elapsed: Duration::ZERO,
            duration: COMMIT_DURATION,
            easing: ease_out,
            target: Some(target),
        }
    }

    fn spring_back(from: f32) -> Self {
        Slide {
            from,
            to: 0.0,
            elapsed: Duration::ZERO,
            duration: SPRING_BACK_DURATION,
            easing: ease_out_cubic,
            target: None,
        }
    }

    fn tick(&mut self, dt: Duration) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        let t = (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * (self.easing)(t)
    }
}

#[derive(Debug)]
pub struct Pager {
    page: Page,
    strategy: NavStrategy,
    tracker: DragTracker,
    slide: Option<Slide>,
    width: u16,
}

impl Pager {
    pub fn new(strategy: NavStrategy) -> Self {
        Pager {
            page: Page::Counter,
            strategy,
            tracker: DragTracker::new(),
            slide: None,
            width: 80,
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    /// A slide is in flight. Page input is held off until it lands.
    pub fn is_animating(&self) -> bool {
        self.slide.is_some()
    }

    pub fn is_swiping(&self) -> bool {
        self.tracker.is_swiping()
    }

    /// Record the width of the page area so drag distances scale with the
    /// terminal. Called every render.
    pub fn set_width(&mut self, width: u16) {
        self.width = width.max(1);
    }

    fn threshold(&self) -> u16 {
        (self.width / 4).max(1)
    }

    /// Keyboard navigation. No-op while a transition or drag is in flight.
    pub fn select(&mut self, target: Page) {
        if target == self.page
            || self.slide.is_some()
            || self.tracker.is_swiping()
            || self.tracker.is_animating()
        {
            return;
        }
        match self.strategy {
            NavStrategy::Paged => self.page = target,
            NavStrategy::Gesture => {
                let to = if target.index() > self.page.index() {
                    -f32::from(self.width)
                } else {
                    f32::from(self.width)
                };
                self.slide = Some(Slide::commit(0.0, to, target));
            }
        }
    }

    pub fn on_down(&mut self, x: u16, y: u16) {
        if self.slide.is_none() {
            self.tracker.on_down(x, y);
        }
    }

    pub fn on_drag(&mut self, x: u16, y: u16) {
        self.tracker.on_drag(x, y);
    }

    /// Release the pointer. Returns true when the release ended a swipe, in
    /// which case it must not also count as a click. A committed swipe flips
    /// the page instantly in `Paged` mode and starts a slide in `Gesture`.
    pub fn on_up(&mut self) -> bool {
        let from = self.clamp_travel(self.tracker.offset()) as f32;
        match self.tracker.on_up(self.threshold()) {
            Some(Release::Commit(dir)) => {
                match (self.strategy, self.page.neighbor(dir)) {
                    (NavStrategy::Paged, Some(target)) => {
                        self.page = target;
                        self.tracker.finish_animation();
                    }
                    (NavStrategy::Gesture, Some(target)) => {
                        let to = match dir {
                            SwipeDir::Left => -f32::from(self.width),
                            SwipeDir::Right => f32::from(self.width),
                        };
                        self.slide = Some(Slide::commit(from, to, target));
                    }
                    // Swiped past the end of the pair: nothing to commit to.
                    (NavStrategy::Paged, None) => self.tracker.finish_animation(),
                    (NavStrategy::Gesture, None) => {
                        self.slide = Some(Slide::spring_back(from));
                    }
                }
                true
            }
            Some(Release::SpringBack) => {
                match self.strategy {
                    NavStrategy::Paged => self.tracker.finish_animation(),
                    NavStrategy::Gesture => self.slide = Some(Slide::spring_back(from)),
                }
                true
            }
            None => false,
        }
    }

    pub fn tick(&mut self, dt: Duration) {
        if let Some(slide) = &mut self.slide {
            slide.tick(dt);
            if slide.is_complete() {
                if let Some(target) = slide.target {
                    self.page = target;
                }
                self.slide = None;
                self.tracker.finish_animation();
            }
        }
    }

    /// Travel only exists toward a page that is actually there.
    fn clamp_travel(&self, dx: i32) -> i32 {
        let limit = i32::from(self.width);
        match self.page {
            Page::Counter => dx.clamp(-limit, 0),
            Page::History => dx.clamp(0, limit),
        }
    }

    /// Signed horizontal reveal in columns. Negative pulls the right-hand
    /// neighbor in, positive the left-hand one. Paged mode never reveals:
    /// pages only flip whole.
    fn reveal(&self) -> i32 {
        if self.strategy == NavStrategy::Paged {
            0
        } else if let Some(slide) = &self.slide {
            slide.value().round() as i32
        } else if self.tracker.is_swiping() {
            self.clamp_travel(self.tracker.offset())
        } else {
            0
        }
    }

    /// Pages to draw, left to right, with the area each one gets. Mid-drag
    /// and mid-slide this is the current page and its incoming neighbor.
    pub fn split(&self, area: Rect) -> Vec<(Page, Rect)> {
        let reveal = self.reveal().clamp(-i32::from(area.width), i32::from(area.width));
        let shift = reveal.unsigned_abs() as u16;
        if shift == 0 || shift >= area.width {
            let page = if shift >= area.width {
                // Fully revealed but not yet landed.
                match self.slide.as_ref().and_then(|s| s.target) {
                    Some(target) => target,
                    None => self.page,
                }
            } else {
                self.page
            };
            return vec![(page, area)];
        }
        let incoming = if reveal < 0 {
            self.page.neighbor(SwipeDir::Left)
        } else {
            self.page.neighbor(SwipeDir::Right)
        };
        let Some(incoming) = incoming else {
            return vec![(self.page, area)];
        };
        let remainder = area.width - shift;
        if reveal < 0 {
            vec![
                (self.page, Rect::new(area.x, area.y, remainder, area.height)),
                (
                    incoming,
                    Rect::new(area.x + remainder, area.y, shift, area.height),
                ),
            ]
        } else {
            vec![
                (incoming, Rect::new(area.x, area.y, shift, area.height)),
                (
                    self.page,
                    Rect::new(area.x + shift, area.y, remainder, area.height),
                ),
            ]
        }
    }
}
