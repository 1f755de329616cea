//! Shape generation for 2D primitives
//!
//! Every function appends triangles (3 vertices each) to `out`, in
//! playfield pixel coordinates.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;
use crate::colors::Rgba;

/// Segment count that keeps a circle of this radius looking round
pub fn segments_for_radius(radius: f32) -> u32 {
    ((radius * 0.8) as u32).clamp(10, 48)
}

/// Filled circle as a triangle fan around `center`
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: Rgba) {
    let segments = segments_for_radius(radius);
    out.reserve((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;

        out.push(Vertex::new(center, color));
        out.push(Vertex::new(
            center + Vec2::new(theta1.cos(), theta1.sin()) * radius,
            color,
        ));
        out.push(Vertex::new(
            center + Vec2::new(theta2.cos(), theta2.sin()) * radius,
            color,
        ));
    }
}

/// Axis-aligned rectangle with top-left corner `min`
pub fn rect(out: &mut Vec<Vertex>, min: Vec2, size: Vec2, color: Rgba) {
    if size.x <= 0.0 || size.y <= 0.0 {
        return;
    }
    let max = min + size;
    quad(
        out,
        [min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)],
        color,
    );
}

/// Rectangle starting at `origin` and extending `length` along `angle`,
/// `width` thick and centered on that line (gun barrels)
pub fn bar(out: &mut Vec<Vertex>, origin: Vec2, angle: f32, length: f32, width: f32, color: Rgba) {
    let along = Vec2::new(angle.cos(), angle.sin());
    let across = along.perp() * (width / 2.0);
    let tip = origin + along * length;
    quad(
        out,
        [origin - across, tip - across, tip + across, origin + across],
        color,
    );
}

/// Two triangles covering a convex quad given in winding order
fn quad(out: &mut Vec<Vertex>, corners: [Vec2; 4], color: Rgba) {
    let [a, b, c, d] = corners.map(|p| Vertex::new(p, color));
    out.extend_from_slice(&[a, b, c, a, c, d]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_stays_on_radius() {
        let mut out = Vec::new();
        let center = Vec2::new(50.0, 60.0);
        circle(&mut out, center, 40.0, [1.0; 4]);
        assert_eq!(out.len() % 3, 0);
        assert_eq!(out.len() as u32, segments_for_radius(40.0) * 3);
        for v in &out {
            let d = Vec2::from_array(v.position).distance(center);
            assert!(d < 1e-3 || (d - 40.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_rect_skips_empty() {
        let mut out = Vec::new();
        rect(&mut out, Vec2::ZERO, Vec2::new(0.0, 5.0), [1.0; 4]);
        assert!(out.is_empty());
        rect(&mut out, Vec2::ZERO, Vec2::new(60.0, 5.0), [1.0; 4]);
        assert_eq!(out.len(), 6);
    }

    #[test]
    fn test_bar_points_along_angle() {
        let mut out = Vec::new();
        bar(&mut out, Vec2::ZERO, 0.0, 60.0, 10.0, [1.0; 4]);
        let xs: Vec<f32> = out.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = out.iter().map(|v| v.position[1]).collect();
        assert!(xs.iter().all(|&x| (-1e-4..=60.0001).contains(&x)));
        assert!(ys.iter().all(|&y| y.abs() <= 5.0001));
    }
}
