/*
 *  display/traits.rs
 *
 *  monodisp - one API for small displays
 *  (c) 2020-26 Stuart Hunter
 *
 *  Boundary traits: buffer transfer to the panel and button edges
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

use embedded_hal::digital::InputPin;
use log::debug;

use crate::display::error::DisplayError;

/// Minimal hardware boundary - pushes a raw surface buffer to a panel
///
/// The buffer layout is the one of the surface the compositor owns (see
/// [`PixelEncoding`](crate::display::PixelEncoding)). Implementations own all
/// bus and register knowledge. Callers treat a transfer as best effort: an
/// error is logged, never retried.
pub trait Transfer {
    fn transfer(&mut self, buffer: &[u8]) -> Result<(), DisplayError>;
}

impl<T: Transfer + ?Sized> Transfer for &mut T {
    fn transfer(&mut self, buffer: &[u8]) -> Result<(), DisplayError> {
        (**self).transfer(buffer)
    }
}

impl<T: Transfer + ?Sized> Transfer for Box<T> {
    fn transfer(&mut self, buffer: &[u8]) -> Result<(), DisplayError> {
        (**self).transfer(buffer)
    }
}

/// Scroll buttons polled by the scroll-back log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Up,
    Down,
}

/// Edge-triggered button source
pub trait ButtonInput {
    /// Whether a press edge was observed on `button` since the last poll.
    fn edge(&mut self, button: Button) -> bool;
}

impl<B: ButtonInput + ?Sized> ButtonInput for &mut B {
    fn edge(&mut self, button: Button) -> bool {
        (**self).edge(button)
    }
}

/// Rising-edge detector over two GPIO inputs
pub struct EdgeButtons<U, D> {
    up: U,
    down: D,
    active_low: bool,
    last_up: bool,
    last_down: bool,
}

impl<U: InputPin, D: InputPin> EdgeButtons<U, D> {
    /// Buttons that read high while pressed.
    pub fn new(up: U, down: D) -> Self {
        Self { up, down, active_low: false, last_up: false, last_down: false }
    }

    /// Buttons wired to ground with a pull-up.
    pub fn active_low(mut self) -> Self {
        self.active_low = true;
        self
    }

    pub fn release(self) -> (U, D) {
        (self.up, self.down)
    }
}

// A pin read error counts as "not pressed".
fn pressed<P: InputPin>(pin: &mut P, active_low: bool) -> bool {
    match pin.is_high() {
        Ok(level) => level != active_low,
        Err(e) => {
            debug!("button read failed: {:?}", e);
            false
        }
    }
}

impl<U: InputPin, D: InputPin> ButtonInput for EdgeButtons<U, D> {
    fn edge(&mut self, button: Button) -> bool {
        let (pin_state, last) = match button {
            Button::Up => (pressed(&mut self.up, self.active_low), &mut self.last_up),
            Button::Down => (pressed(&mut self.down, self.active_low), &mut self.last_down),
        };
        let edge = pin_state && !*last;
        *last = pin_state;
        edge
    }
}
