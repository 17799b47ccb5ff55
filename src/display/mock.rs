/*
 *  display/mock.rs
 *
 *  monodisp - one API for small displays
 *  (c) 2020-26 Stuart Hunter
 *
 *  Mock transfer and buttons for testing without hardware
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use std::sync::{Arc, Mutex, MutexGuard};

use crate::display::error::DisplayError;
use crate::display::traits::{Button, ButtonInput, Transfer};

/// Mock panel that records every transferred buffer
///
/// Clones share the same state, so a test can hand one clone to the
/// compositor and keep another for inspection.
#[derive(Debug, Clone, Default)]
pub struct MockTransfer {
    state: Arc<Mutex<MockTransferState>>,
}

/// Shared state of a [`MockTransfer`]
#[derive(Debug, Default)]
pub struct MockTransferState {
    /// Copy of every buffer accepted, in order
    pub frames: Vec<Vec<u8>>,

    /// Number of transfer() calls, failed ones included
    pub transfer_count: usize,

    /// Total bytes accepted
    pub bytes_written: usize,

    /// Fail every transfer (for error path testing)
    pub simulate_failure: bool,

    /// Number of transfers rejected while failing
    pub failed_count: usize,
}

impl MockTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the shared state; a poisoned lock still yields the data.
    pub fn state(&self) -> MutexGuard<'_, MockTransferState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn transfer_count(&self) -> usize {
        self.state().transfer_count
    }

    pub fn frames(&self) -> Vec<Vec<u8>> {
        self.state().frames.clone()
    }

    pub fn last_frame(&self) -> Option<Vec<u8>> {
        self.state().frames.last().cloned()
    }

    pub fn set_failure(&self, fail: bool) {
        self.state().simulate_failure = fail;
    }

    pub fn reset(&self) {
        *self.state() = MockTransferState::default();
    }
}

impl Transfer for MockTransfer {
    fn transfer(&mut self, buffer: &[u8]) -> Result<(), DisplayError> {
        let mut state = self.state();
        state.transfer_count += 1;
        if state.simulate_failure {
            state.failed_count += 1;
            return Err(DisplayError::Transfer("simulated transfer failure".into()));
        }
        state.bytes_written += buffer.len();
        state.frames.push(buffer.to_vec());
        Ok(())
    }
}

/// Scripted button presses, each consumed by one edge poll
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockButtons {
    pending_up: usize,
    pending_down: usize,
    polls: usize,
}

impl MockButtons {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, button: Button) {
        match button {
            Button::Up => self.pending_up += 1,
            Button::Down => self.pending_down += 1,
        }
    }

    /// Number of edge() calls seen
    pub fn polls(&self) -> usize {
        self.polls
    }
}

impl ButtonInput for MockButtons {
    fn edge(&mut self, button: Button) -> bool {
        self.polls += 1;
        let pending = match button {
            Button::Up => &mut self.pending_up,
            Button::Down => &mut self.pending_down,
        };
        if *pending > 0 {
            *pending -= 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_transfer_records_frames() {
        let mock = MockTransfer::new();
        let mut sink = mock.clone();
        sink.transfer(&[1, 2, 3]).unwrap();
        sink.transfer(&[4]).unwrap();
        assert_eq!(mock.transfer_count(), 2);
        assert_eq!(mock.state().bytes_written, 4);
        assert_eq!(mock.last_frame(), Some(vec![4]));
    }

    #[test]
    fn test_mock_transfer_simulated_failure() {
        let mut mock = MockTransfer::new();
        mock.set_failure(true);
        assert!(mock.transfer(&[0; 8]).is_err());
        assert_eq!(mock.state().failed_count, 1);
        assert!(mock.frames().is_empty());
        mock.reset();
        assert_eq!(mock.transfer_count(), 0);
    }

    #[test]
    fn test_mock_buttons_consume_presses() {
        let mut buttons = MockButtons::new();
        buttons.press(Button::Up);
        buttons.press(Button::Up);
        assert!(buttons.edge(Button::Up));
        assert!(!buttons.edge(Button::Down));
        assert!(buttons.edge(Button::Up));
        assert!(!buttons.edge(Button::Up));
        assert_eq!(buttons.polls(), 4);
    }
}
