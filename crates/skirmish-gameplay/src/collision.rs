//! Circle-circle overlap detection and positional separation.
//!
//! Solid bodies only; projectile hits go through
//! [`crate::projectile::ProjectileManager::check_hit`].

use skirmish_common::{Vec2, EPSILON};

/// Checks whether two circles overlap (strict inequality: tangent
/// circles do not count).
#[must_use]
pub fn circles_overlap(p1: Vec2, r1: f32, p2: Vec2, r2: f32) -> bool {
    p1.distance(p2) < r1 + r2
}

/// Separates two overlapping circles symmetrically, pushing each half
/// the overlap apart along the center axis.
///
/// Coincident centers are skipped: no separation axis exists, and the
/// bodies stay coincident until later motion breaks the tie.
pub fn separate_symmetric(p1: &mut Vec2, r1: f32, p2: &mut Vec2, r2: f32) {
    let delta = *p1 - *p2;
    let dist = delta.length();
    let min_dist = r1 + r2;
    if dist >= min_dist || dist <= EPSILON {
        return;
    }
    let normal = delta * (1.0 / dist);
    let half_overlap = (min_dist - dist) / 2.0;
    *p1 += normal * half_overlap;
    *p2 -= normal * half_overlap;
}

/// Pushes `mover` away from a fixed `anchor` circle.
///
/// The mover is displaced by half the overlap plus `push_force`. Both
/// sides of a pair apply this independently in the same tick, which is
/// an approximation rather than a shared exact solve.
pub fn separate_with_push(mover: &mut Vec2, r_mover: f32, anchor: Vec2, r_anchor: f32, push_force: f32) {
    let delta = *mover - anchor;
    let dist = delta.length();
    let min_dist = r_mover + r_anchor;
    if dist >= min_dist || dist <= EPSILON {
        return;
    }
    let normal = delta * (1.0 / dist);
    let push = (min_dist - dist) / 2.0 + push_force;
    *mover += normal * push;
}

/// Resolves all pairwise overlaps in a set of circles in fixed `i < j`
/// order, one pass.
///
/// With three or more mutually overlapping bodies a single pass can
/// leave residual overlap; it shrinks over subsequent ticks instead of
/// being iterated to convergence here.
pub fn resolve_pairs(positions: &mut [Vec2], radii: &[f32]) {
    debug_assert_eq!(positions.len(), radii.len());
    for i in 0..positions.len() {
        for j in (i + 1)..positions.len() {
            let (left, right) = positions.split_at_mut(j);
            separate_symmetric(&mut left[i], radii[i], &mut right[0], radii[j]);
        }
    }
}
