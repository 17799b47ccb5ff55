/*
 *  display/components/trace.rs
 *
 *  monodisp - one API for small displays
 *  (c) 2020-26 Stuart Hunter
 *
 *  Sampled sine trace across the display
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

use core::f32::consts::PI;

use crate::constants::{TRACE_LEFT_MARGIN, TRACE_SCALE_OFFSET};

/// Parameters of one trace: `A sin(2 pi f t / T - phase)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceParams {
    pub frequency: f32,
    pub phase: f32,
    pub amplitude: f32,
    pub time_ms: u32,
}

/// One point per millisecond sample `t` in `[0, time_ms]`
///
/// The samples are spread over `width - 20` pixels starting at x = 10, so a
/// long trace plots many samples onto the same column. Coordinates are
/// truncated and may fall outside the surface; the surface clips them.
pub fn trace_points(
    width: u32,
    height: u32,
    params: TraceParams,
) -> impl Iterator<Item = (i32, i32)> {
    let time_ms = params.time_ms;
    let step = if time_ms == 0 {
        0.0
    } else {
        (width as f32 - TRACE_SCALE_OFFSET as f32) / time_ms as f32
    };
    let mid = height as f32 / 2.0;
    let y_scale = height as f32 / TRACE_SCALE_OFFSET as f32;

    let samples = (time_ms > 0).then_some(0..=time_ms).into_iter().flatten();
    samples.map(move |t| {
        let t = t as f32;
        let diversion =
            params.amplitude * (2.0 * PI * params.frequency * t / time_ms as f32 - params.phase).sin();
        let x = TRACE_LEFT_MARGIN + t * step;
        let y = mid + diversion * y_scale;
        (x as i32, y as i32)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(amplitude: f32, time_ms: u32) -> TraceParams {
        TraceParams { frequency: 1.0, phase: 0.0, amplitude, time_ms }
    }

    #[test]
    fn test_sample_count_and_span() {
        let pts: Vec<_> = trace_points(128, 64, params(5.0, 108)).collect();
        assert_eq!(pts.len(), 109);
        assert_eq!(pts[0], (10, 32));
        assert_eq!(pts[108].0, 118);
    }

    #[test]
    fn test_flat_trace_sits_on_midline() {
        assert!(trace_points(128, 64, params(0.0, 100)).all(|(_, y)| y == 32));
    }

    #[test]
    fn test_zero_duration_is_empty() {
        assert_eq!(trace_points(128, 64, params(5.0, 0)).count(), 0);
    }

    #[test]
    fn test_peak_height() {
        // quarter period of a 1 Hz trace over 1000 ms peaks at A * H / 20
        let pts: Vec<_> = trace_points(128, 64, params(4.0, 1000)).collect();
        assert_eq!(pts[250].1, 32 + 12);
    }

    #[test]
    fn test_longest_duration_has_no_overflow() {
        let mut pts = trace_points(128, 64, params(f32::MAX, u32::MAX));
        assert_eq!(pts.next().map(|(x, _)| x), Some(10));
        assert_eq!(pts.next().map(|(x, _)| x), Some(10));
    }
}
