//! Collision and bounds tests
//!
//! Everything in the arena is a circle, so a hit is simply two circles whose
//! centers are closer than the sum of their radii.

use glam::Vec2;

/// Whether two circles overlap (strictly; touching edges do not count)
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}

/// Whether a point has left the playfield `[0, bounds.x] x [0, bounds.y]`
///
/// Points exactly on the edge are still inside.
#[inline]
pub fn out_of_bounds(pos: Vec2, bounds: Vec2) -> bool {
    pos.x < 0.0 || pos.x > bounds.x || pos.y < 0.0 || pos.y > bounds.y
}

/// Push a circle back inside the playfield so its edge never crosses a wall
///
/// Low edge is checked before high edge on each axis, so a field narrower
/// than the circle pins it against the high wall.
pub fn clamp_circle(pos: Vec2, radius: f32, bounds: Vec2) -> Vec2 {
    let mut p = pos;
    if p.x - radius < 0.0 {
        p.x = radius;
    }
    if p.x + radius > bounds.x {
        p.x = bounds.x - radius;
    }
    if p.y - radius < 0.0 {
        p.y = radius;
    }
    if p.y + radius > bounds.y {
        p.y = bounds.y - radius;
    }
    p
}
