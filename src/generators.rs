//! Utilities for generating examples, benchmarks, and test cases.

use std::f64::consts::PI;

use crate::Point;

/// Generate `n * n` sites on a square grid with spacing `spacing`.
///
/// Grids are about as degenerate as inputs get: every vertex of the diagram
/// is shared by four cells, and many sites share coordinates.
pub fn grid(n: usize, spacing: f64) -> Vec<Point> {
    let mut ret = Vec::with_capacity(n * n);
    for i in 0..n {
        for j in 0..n {
            ret.push(Point::new(i as f64 * spacing, j as f64 * spacing));
        }
    }
    ret
}

/// Like `grid`, but each site is nudged by a small, deterministic offset so
/// that the sites are in general position.
pub fn jittered_grid(n: usize, spacing: f64) -> Vec<Point> {
    let mut state = 0x2545_f491_4f6c_dd1du64;
    let mut jitter = || {
        // xorshift64
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        ((state >> 11) as f64 / (1u64 << 53) as f64 - 0.5) * spacing * 0.25
    };

    let mut ret = grid(n, spacing);
    for p in &mut ret {
        p.x += jitter();
        p.y += jitter();
    }
    ret
}

/// Generate `n` sites on a sunflower spiral of radius `radius`.
///
/// The sites are spread out evenly over the disk, and no two of them share a
/// coordinate.
pub fn spiral(n: usize, radius: f64) -> Vec<Point> {
    let golden_angle = PI * (3.0 - 5.0f64.sqrt());
    (0..n)
        .map(|i| {
            let r = radius * ((i as f64 + 0.5) / n as f64).sqrt();
            let theta = i as f64 * golden_angle;
            Point::new(r * theta.cos(), r * theta.sin())
        })
        .collect()
}

/// Generate `n` sites evenly spaced along a line through the origin.
///
/// Colinear sites never produce a vertex, so the diagram is `n - 1`
/// parallel edges.
pub fn colinear(n: usize, direction: (f64, f64)) -> Vec<Point> {
    (0..n)
        .map(|i| Point::new(i as f64 * direction.0, i as f64 * direction.1))
        .collect()
}
