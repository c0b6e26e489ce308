use formula_tree::geometry::Point;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::caret::CaretPlacement;

/// The blinking caret is a resource of the host, like a system caret or a DOM element.
/// The host is told when to create it, move it and toggle it.
pub trait CaretHost {
    fn create_caret(&mut self, width: i32, height: i32);
    fn destroy_caret(&mut self);
    fn set_caret_position(&mut self, position: Point);
    fn show_caret(&mut self);
    fn hide_caret(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaretVisualState {
    Destroyed,
    Hidden { height: i32 },
    Shown { height: i32 },
}

/// Drives the host caret. Its height can only be set when creating it, so a different height means recreating it.
pub struct CaretVisual<H: CaretHost> {
    host: H,
    state: CaretVisualState,
    width: i32,
}

impl<H: CaretHost> CaretVisual<H> {
    pub fn new(host: H, width: i32) -> Self {
        Self {
            host,
            state: CaretVisualState::Destroyed,
            width,
        }
    }

    pub fn state(&self) -> CaretVisualState {
        self.state
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Creates and shows the caret, does nothing if it already exists
    pub fn acquire(&mut self, placement: CaretPlacement) {
        if self.state != CaretVisualState::Destroyed {
            return;
        }
        self.host.create_caret(self.width, placement.height);
        self.host.set_caret_position(placement.position);
        self.host.show_caret();
        self.state = CaretVisualState::Shown {
            height: placement.height,
        };
    }

    pub fn release(&mut self) {
        if self.state == CaretVisualState::Destroyed {
            return;
        }
        self.host.destroy_caret();
        self.state = CaretVisualState::Destroyed;
    }

    /// Moves the caret. Returns true if it had to be recreated, because its height changed.
    /// A destroyed caret stays destroyed.
    pub fn update(&mut self, placement: CaretPlacement) -> bool {
        let (height, shown) = match self.state {
            CaretVisualState::Destroyed => return false,
            CaretVisualState::Hidden { height } => (height, false),
            CaretVisualState::Shown { height } => (height, true),
        };

        let recreated = height != placement.height;
        if recreated {
            debug!(
                "Recreating caret, height changed from {} to {}",
                height, placement.height
            );
            self.host.destroy_caret();
            self.host.create_caret(self.width, placement.height);
        }
        self.host.set_caret_position(placement.position);
        if recreated && shown {
            self.host.show_caret();
        }
        self.state = if shown {
            CaretVisualState::Shown {
                height: placement.height,
            }
        } else {
            CaretVisualState::Hidden {
                height: placement.height,
            }
        };
        recreated
    }

    /// Returns true if the caret was visible before
    pub fn hide(&mut self) -> bool {
        match self.state {
            CaretVisualState::Shown { height } => {
                self.host.hide_caret();
                self.state = CaretVisualState::Hidden { height };
                true
            }
            _ => false,
        }
    }

    pub fn show(&mut self) {
        if let CaretVisualState::Hidden { height } = self.state {
            self.host.show_caret();
            self.state = CaretVisualState::Shown { height };
        }
    }

    /// Hides the caret until the guard gets dropped, so that painting doesn't draw over it
    pub fn hide_for_repaint(&mut self) -> RepaintGuard<'_, H> {
        let restore = self.hide();
        RepaintGuard {
            visual: self,
            restore,
        }
    }
}

/// Shows the caret again when dropped, if it was visible when the guard was created
pub struct RepaintGuard<'a, H: CaretHost> {
    visual: &'a mut CaretVisual<H>,
    restore: bool,
}

impl<'a, H: CaretHost> Drop for RepaintGuard<'a, H> {
    fn drop(&mut self) {
        if self.restore {
            self.visual.show();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaretEvent {
    Created { width: i32, height: i32 },
    Destroyed,
    Moved(Point),
    Shown,
    Hidden,
}

/// Records what happens to the caret. For hosts that draw the caret themselves, and for tests.
#[derive(Debug, Default)]
pub struct HeadlessCaretHost {
    pub events: Vec<CaretEvent>,
}

impl HeadlessCaretHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take_events(&mut self) -> Vec<CaretEvent> {
        std::mem::take(&mut self.events)
    }
}

impl CaretHost for HeadlessCaretHost {
    fn create_caret(&mut self, width: i32, height: i32) {
        self.events.push(CaretEvent::Created { width, height });
    }

    fn destroy_caret(&mut self) {
        self.events.push(CaretEvent::Destroyed);
    }

    fn set_caret_position(&mut self, position: Point) {
        self.events.push(CaretEvent::Moved(position));
    }

    fn show_caret(&mut self) {
        self.events.push(CaretEvent::Shown);
    }

    fn hide_caret(&mut self) {
        self.events.push(CaretEvent::Hidden);
    }
}
