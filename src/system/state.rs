//! Control State Cell
//!
//! The one piece of state that crosses task boundaries: the current
//! (mode, active) pair. The control loop is the only writer; the indicator
//! task and anything else that wants to know what the robot is doing reads a
//! snapshot. Loads and stores happen inside a critical section, so a reader
//! can never observe a mode from one update paired with the active flag of
//! another.

use core::cell::Cell;

use critical_section::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use crate::control::mode::ControlState;

/// State shared by the running system
pub static SHARED_STATE: SharedState = SharedState::new();

/// Critical-section guarded state cell with a change notification
pub struct SharedState {
    state: Mutex<Cell<ControlState>>,
    changed: Signal<CriticalSectionRawMutex, ControlState>,
}

impl SharedState {
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(Cell::new(ControlState::INITIAL)),
            changed: Signal::new(),
        }
    }

    /// Reads the whole state atomically
    pub fn snapshot(&self) -> ControlState {
        critical_section::with(|cs| self.state.borrow(cs).get())
    }

    /// Replaces the state and wakes whoever waits for changes
    pub fn publish(&self, state: ControlState) {
        critical_section::with(|cs| self.state.borrow(cs).set(state));
        self.changed.signal(state);
    }

    /// Waits for the next published state
    pub async fn wait_changed(&self) -> ControlState {
        self.changed.wait().await
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}
