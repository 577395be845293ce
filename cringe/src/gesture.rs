//! Horizontal swipe recognition over terminal mouse events.
//!
//! A drag is captured as a swipe candidate only when its first movement is
//! predominantly horizontal; vertical movement is left alone so list
//! scrolling keeps working. Capture is decided once per drag.

/// Direction of pointer travel for a committed swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDir {
    Left,
    Right,
}

/// Outcome of releasing a captured drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// Released below the distance threshold: return to the origin page.
    SpringBack,
    /// Released past the threshold: navigate to the neighbor page.
    Commit(SwipeDir),
}

/// `Idle -> Dragging` on press; `Dragging -> Animating` on release of a
/// captured drag; `Animating -> Idle` when the owner reports the transition
/// finished. Input is ignored while animating: transitions are short and
/// never cancelled midway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Dragging {
        origin: (u16, u16),
        dx: i32,
        dy: i32,
        captured: Option<bool>,
    },
    Animating,
}

#[derive(Debug)]
pub struct DragTracker {
    phase: Phase,
}

impl Default for DragTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl DragTracker {
    pub fn new() -> Self {
        DragTracker { phase: Phase::Idle }
    }

    pub fn on_down(&mut self, x: u16, y: u16) {
        if self.phase == Phase::Animating {
            return;
        }
        self.phase = Phase::Dragging {
            origin: (x, y),
            dx: 0,
            dy: 0,
            captured: None,
        };
    }

    pub fn on_drag(&mut self, x: u16, y: u16) {
        if let Phase::Dragging {
            origin,
            dx,
            dy,
            captured,
        } = &mut self.phase
        {
            *dx = i32::from(x) - i32::from(origin.0);
            *dy = i32::from(y) - i32::from(origin.1);
            if captured.is_none() && (*dx != 0 || *dy != 0) {
                // First movement decides: strictly more horizontal than
                // vertical, same rule as the original pan responder.
                *captured = Some(dx.abs() > dy.abs());
            }
        }
    }

    /// Release the drag. Returns the outcome for a captured horizontal drag
    /// and moves to `Animating`; an uncaptured drag just falls back to
    /// `Idle`.
    pub fn on_up(&mut self, threshold: u16) -> Option<Release> {
        match self.phase {
            Phase::Dragging {
                dx,
                captured: Some(true),
                ..
            } => {
                self.phase = Phase::Animating;
                if dx.unsigned_abs() >= u32::from(threshold.max(1)) {
                    let dir = if dx < 0 { SwipeDir::Left } else { SwipeDir::Right };
                    Some(Release::Commit(dir))
                } else {
                    Some(Release::SpringBack)
                }
            }
            Phase::Dragging { .. } => {
                self.phase = Phase::Idle;
                None
            }
            _ => None,
        }
    }

    /// Current horizontal displacement of a captured drag, 0 otherwise.
    pub fn offset(&self) -> i32 {
        match self.phase {
            Phase::Dragging {
                dx,
                captured: Some(true),
                ..
            } => dx,
            _ => 0,
        }
    }

    pub fn is_swiping(&self) -> bool {
        matches!(
            self.phase,
            Phase::Dragging {
                captured: Some(true),
                ..
            }
        )
    }

    pub fn is_animating(&self) -> bool {
        self.phase == Phase::Animating
    }

    pub fn finish_animation(&mut self) {
        if self.phase == Phase::Animating {
            self.phase = Phase::Idle;
        }
    }
}
