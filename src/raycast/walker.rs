//! Fast voxel traversal (Amanatides & Woo) over any number of axes.
//!
//! The walker advances one grid-line crossing per call. Crossing distances
//! are recomputed from the current position and cell every step instead of
//! being accumulated, so a long ray cannot drift away from the grid lines.

use tracing::trace;

use crate::grid::Grid;
use crate::raycast::Passable;
use crate::types::{Blocker, TraversalError};

#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) enum Stop {
    /// The entered cell is open, the walk goes on.
    Continue,
    /// The entered cell (or the position reached) refuses the ray.
    Blocked(Blocker),
    /// The distance budget ran out inside the cell being left.
    Exhausted,
}

/// One step of the walk: the ray left `left` after travelling `length`
/// inside it and now sits in `entered`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct Crossing<const D: usize> {
    pub left: [i32; D],
    pub entered: [i32; D],
    pub length: f32,
    /// Accumulated path length from the start.
    pub distance: f32,
    pub stop: Stop,
}

pub(crate) struct Walker<'a, G, P, F, const D: usize> {
    grid: &'a G,
    passable: P,
    position_allowed: F,
    origin: [f32; D],
    resolution: f32,
    /// Unit direction.
    direction: [f32; D],
    /// Sign of the direction along each axis, zero for axes the ray never crosses.
    step: [i32; D],
    position: [f32; D],
    cell: [i32; D],
    distance: f32,
    max_distance: f32,
}

impl<'a, G, P, F, const D: usize> Walker<'a, G, P, F, D>
where
    G: Grid<D>,
    P: Passable<G::Cell>,
    F: Fn([f32; D]) -> bool,
{
    pub fn new(
        grid: &'a G,
        start: [f32; D],
        direction: [f32; D],
        max_distance: f32,
        passable: P,
        position_allowed: F,
    ) -> Result<Self, TraversalError> {
        let direction = normalize(direction).ok_or(TraversalError::DegenerateDirection)?;
        if start.iter().any(|v| !v.is_finite()) {
            return Err(TraversalError::InvalidOrigin(Blocker::OutOfBounds));
        }

        let origin = grid.origin();
        let resolution = grid.resolution();
        let extents = grid.extents();
        // Refused before any index arithmetic, which would overflow far away.
        let inside = (0..D).all(|axis| {
            let g = (start[axis] - origin[axis]) / resolution;
            (0.0..=extents[axis] as f32).contains(&g)
        });
        if !inside {
            return Err(TraversalError::InvalidOrigin(Blocker::OutOfBounds));
        }

        let step = direction.map(step_sign);
        let cell = std::array::from_fn(|axis| {
            locate(start[axis], origin[axis], resolution, step[axis])
        });

        let mut walker = Self {
            grid,
            passable,
            position_allowed,
            origin,
            resolution,
            direction,
            step,
            position: start,
            cell,
            distance: 0.0,
            max_distance,
        };
        for axis in 0..D {
            walker.cell[axis] = walker.settle(axis, walker.cell[axis]);
        }

        if let Some(blocker) = walker.blocker() {
            return Err(TraversalError::InvalidOrigin(blocker));
        }
        Ok(walker)
    }

    /// Move to the next grid-line crossing, or stop short of it when the
    /// distance budget does not reach it.
    pub fn advance(&mut self) -> Crossing<D> {
        let mut t_axis = [f32::INFINITY; D];
        let mut boundary = [0.0; D];
        let mut next_cell = self.cell;
        let mut winner: Option<usize> = None;

        for axis in 0..D {
            if self.step[axis] == 0 {
                continue;
            }
            let (t, line, index) = self.crossing(axis);
            if !(t > 0.0) {
                continue;
            }
            t_axis[axis] = t;
            boundary[axis] = line;
            next_cell[axis] = index;
            // Strict comparison keeps the lowest axis on ties.
            if winner.is_none_or(|w| t < t_axis[w]) {
                winner = Some(axis);
            }
        }

        let left = self.cell;
        let remaining = self.max_distance - self.distance;
        let t = match winner {
            Some(axis) if t_axis[axis] <= remaining => t_axis[axis],
            _ => {
                let length = if remaining > 0.0 { remaining } else { 0.0 };
                for axis in 0..D {
                    self.position[axis] += self.direction[axis] * length;
                }
                if length > 0.0 {
                    self.distance = self.max_distance;
                }
                trace!(cell = ?left, length, distance = self.distance, "ray exhausted");
                return Crossing {
                    left,
                    entered: left,
                    length,
                    distance: self.distance,
                    stop: Stop::Exhausted,
                };
            }
        };

        for axis in 0..D {
            if t_axis[axis] == t {
                // Crossed: sit exactly on the grid line, in the neighbouring cell.
                self.position[axis] = boundary[axis];
                self.cell[axis] = next_cell[axis];
            } else if self.step[axis] != 0 {
                self.position[axis] += self.direction[axis] * t;
                self.cell[axis] = self.settle(axis, self.cell[axis]);
            }
        }
        self.distance = (self.distance + t).min(self.max_distance);

        let stop = match self.blocker() {
            Some(blocker) => Stop::Blocked(blocker),
            None => Stop::Continue,
        };
        trace!(from = ?left, to = ?self.cell, length = t, distance = self.distance, ?stop, "ray crossed boundary");

        Crossing {
            left,
            entered: self.cell,
            length: t,
            distance: self.distance,
            stop,
        }
    }

    /// Distance along the ray to the next grid line on `axis`, that line's
    /// world coordinate and the index of the cell beyond it.
    fn crossing(&self, axis: usize) -> (f32, f32, i32) {
        let step = self.step[axis];
        let mut line = if step > 0 {
            self.cell[axis] + 1
        } else {
            self.cell[axis]
        };
        let mut boundary = self.line(axis, line);
        let mut t = (boundary - self.position[axis]) / self.direction[axis];
        if t <= 0.0 {
            // Rounding left the position on (or past) the line; aim for the next one.
            line += step;
            boundary = self.line(axis, line);
            t = (boundary - self.position[axis]) / self.direction[axis];
        }
        let index = if step > 0 { line } else { line - 1 };
        (t, boundary, index)
    }

    /// World coordinate of grid line `index` on `axis`.
    #[inline]
    fn line(&self, axis: usize, index: i32) -> f32 {
        index as f32 * self.resolution + self.origin[axis]
    }

    /// Bring a floor-derived index in line with the position as `crossing`
    /// measures it, so a position already on the next line counts as past it.
    /// Only ever moves along the direction of travel.
    fn settle(&self, axis: usize, mut index: i32) -> i32 {
        let p = self.position[axis];
        for _ in 0..2 {
            let reached = match self.step[axis] {
                1 => p >= self.line(axis, index + 1),
                -1 => p <= self.line(axis, index),
                _ => false,
            };
            if !reached {
                break;
            }
            index += self.step[axis];
        }
        index
    }

    fn blocker(&self) -> Option<Blocker> {
        match self.grid.cell(self.cell) {
            None => Some(Blocker::OutOfBounds),
            Some(cell) if !self.passable.passable(cell) => Some(Blocker::Impassable),
            Some(_) if !(self.position_allowed)(self.position) => Some(Blocker::PositionRejected),
            Some(_) => None,
        }
    }
}

/// Unit vector along `v`, or `None` for zero-length and non-finite input.
fn normalize<const D: usize>(v: [f32; D]) -> Option<[f32; D]> {
    let scale = v.iter().fold(0.0f32, |m, c| m.max(c.abs()));
    if !(scale.is_finite() && scale > 0.0) || v.iter().any(|c| c.is_nan()) {
        return None;
    }
    let scaled = v.map(|c| c / scale);
    let norm = scaled.iter().map(|c| c * c).sum::<f32>().sqrt();
    Some(scaled.map(|c| c / norm))
}

fn step_sign(d: f32) -> i32 {
    if d > 0.0 {
        1
    } else if d < 0.0 {
        -1
    } else {
        0
    }
}

/// Cell index along one axis. A coordinate exactly on a grid line belongs to
/// the cell the ray is heading into, which for a negative step is the lower one.
fn locate(position: f32, origin: f32, resolution: f32, step: i32) -> i32 {
    let g = (position - origin) / resolution;
    let floor = g.floor();
    if step < 0 && floor == g {
        floor as i32 - 1
    } else {
        floor as i32
    }
}
