/*
 *  display/components/gear.rs
 *
 *  monodisp - one API for small displays
 *  (c) 2020-26 Stuart Hunter
 *
 *  Breathing gear animation as a lazy frame producer
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
use embedded_graphics::prelude::Point;

/// One frame of the gear: vertex offsets from the origin and dot radius
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GearFrame {
    pub index: u32,
    pub rad_moving: i32,
    pub vertices: Vec<Point>,
}

/// Finite, restartable sequence of gear frames
///
/// The dot radius ratchets: it climbs by one per frame from every multiple
/// of `point_radius_max`, turns round once it reaches the maximum and sinks
/// back towards zero.
#[derive(Debug, Clone, PartialEq)]
pub struct GearAnimation {
    frames: u32,
    base_radius: f32,
    points: u32,
    point_radius_max: i32,
    frame: u32,
    rad_moving: i32,
    shift: i32,
}

impl GearAnimation {
    pub fn new(frames: u32, base_radius: u32, points: u32, point_radius_max: u32) -> Self {
        Self {
            frames,
            base_radius: base_radius as f32,
            points,
            point_radius_max: i32::try_from(point_radius_max).unwrap_or(i32::MAX),
            frame: 0,
            rad_moving: 0,
            shift: 0,
        }
    }

    pub fn restart(&mut self) {
        self.frame = 0;
        self.rad_moving = 0;
        self.shift = 0;
    }

    pub fn len_in_frames(&self) -> u32 {
        self.frames
    }

    fn vertices(&self, frame: u32) -> Vec<Point> {
        let rotation = 2.0 * PI * frame as f32 / self.frames as f32;
        let (sin_r, cos_r) = rotation.sin_cos();
        (0..self.points)
            .map(|i| {
                let angle = 2.0 * PI * i as f32 / self.points as f32;
                let (sin_a, cos_a) = angle.sin_cos();
                let (x, y) = (self.base_radius * cos_a, self.base_radius * sin_a);
                Point::new((x * cos_r - y * sin_r) as i32, (x * sin_r + y * cos_r) as i32)
            })
            .collect()
    }
}

impl Iterator for GearAnimation {
    type Item = GearFrame;

    fn next(&mut self) -> Option<GearFrame> {
        if self.frame >= self.frames {
            return None;
        }
        let index = self.frame;
        let max = self.point_radius_max;
        if max > 0 {
            if index % max as u32 == 0 {
                self.shift = 1;
            }
            if self.rad_moving >= max {
                self.shift = -1;
            }
            self.rad_moving += self.shift;
        }
        self.frame += 1;
        Some(GearFrame { index, rad_moving: self.rad_moving, vertices: self.vertices(index) })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.frames.saturating_sub(self.frame) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for GearAnimation {}
