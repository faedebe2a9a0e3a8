//! Analog/vector input to directions.
//!
//! Gamepads and virtual sticks report a 2D vector. Only the four pure unit
//! vectors turn the snake; anything else (diagonals, dead zone, release)
//! keeps the caller's default. `y = 1` is up, matching the board's row axis.

use crate::types::Direction;

/// Map a move vector to a direction, or `default` if it is not a pure axis
///
/// `y` is checked before `x`.
pub fn direction_from_vector(x: f32, y: f32, default: Direction) -> Direction {
    if approximately(y, 1.0) {
        Direction::Up
    } else if approximately(y, -1.0) {
        Direction::Down
    } else if approximately(x, -1.0) {
        Direction::Left
    } else if approximately(x, 1.0) {
        Direction::Right
    } else {
        default
    }
}

/// Float equality with a relative tolerance and a small absolute floor
pub fn approximately(a: f32, b: f32) -> bool {
    let tolerance = (1e-6 * a.abs().max(b.abs())).max(f32::EPSILON * 8.0);
    (b - a).abs() < tolerance
}
