use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

use crate::definitions::keyboard;

#[derive(Debug, Default)]
struct KeypadState {
    keys: [bool; keyboard::SIZE],
    /// Counts every key down event, so that a waiter can tell a new press
    /// apart from a key that was already held.
    presses: u64,
    /// The key of the latest key down event.
    last: Option<u8>,
    /// Set once the run is over, waiters give up.
    closed: bool,
}

/// Input is done with a hex keyboard that has 16 keys ranging `0-F`. The `8`, `4`, `6`, and
/// `2` keys are typically used for directional input. Three opcodes are used to detect input.
/// One skips an instruction if a specific key is pressed, while another does the same if a
/// specific key is not pressed. The third waits for a key press, and then stores it in one of
/// the data registers.
///
/// The keypad is a cheap handle, clones share the same keys. The input source
/// presses and releases keys from its own thread while the chip reads them.
#[derive(Debug, Clone, Default)]
pub struct Keypad {
    state: Arc<Mutex<KeypadState>>,
    pressed: Arc<Condvar>,
}

impl Keypad {
    pub fn new() -> Self {
        Keypad::default()
    }

    /// Marks the key as held down and wakes up a waiting chip.
    /// Invalid keys are logged and ignored.
    pub fn press(&self, key: usize) {
        if key >= keyboard::SIZE {
            log::warn!("invalid key pressed {}", key);
            return;
        }
        let mut state = self.state.lock();
        state.keys[key] = true;
        state.presses = state.presses.wrapping_add(1);
        state.last = Some(key as u8);
        drop(state);

        self.pressed.notify_all();
    }

    /// Marks the key as released. Invalid keys are logged and ignored.
    pub fn release(&self, key: usize) {
        if key >= keyboard::SIZE {
            log::warn!("invalid key released {}", key);
            return;
        }
        self.state.lock().keys[key] = false;
    }

    /// Releases every key.
    pub fn reset(&self) {
        self.state.lock().keys = [false; keyboard::SIZE];
    }

    /// Checks if the given key is currently held down.
    ///
    /// Panics if the key is not in `0x0..=0xF`.
    pub fn is_pressed(&self, key: usize) -> bool {
        assert!(key < keyboard::SIZE, "There is no key {:#X}.", key);
        self.state.lock().keys[key]
    }

    /// A snapshot of all the keys.
    pub fn get_keys(&self) -> [bool; keyboard::SIZE] {
        self.state.lock().keys
    }

    /// Blocks until the next key down event and returns its key.
    ///
    /// Keys held before the call do not count. Returns `None` if the keypad
    /// was [`close`](Keypad::close)d, before or while waiting.
    pub fn wait_for_key(&self) -> Option<u8> {
        let mut state = self.state.lock();
        let seen = state.presses;
        log::debug!("waiting for a key press");

        while !state.closed && state.presses == seen {
            self.pressed.wait(&mut state);
        }

        if state.closed {
            None
        } else {
            state.last
        }
    }

    /// Wakes every waiter, until [`reopen`](Keypad::reopen)ed every wait
    /// returns right away. Used when the run shuts down.
    pub fn close(&self) {
        self.state.lock().closed = true;
        self.pressed.notify_all();
    }

    /// Lets waits block again after a [`close`](Keypad::close).
    pub fn reopen(&self) {
        self.state.lock().closed = false;
    }

    /// Checks if the keypad was closed.
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }
}
