//! Interior point seeding for convex regions.

use crate::math::Real;
use na::SVector;
use oorandom::Rand64;

/// Draws `count` points inside the convex hull of `corners`.
///
/// Each point is a convex combination of the corners, with one independent
/// uniform `[0, 1)` weight per corner normalized to sum to one. Containment
/// in the hull is guaranteed by construction; the distribution however is
/// **not** uniform over the region, it is biased toward the centroid.
/// Callers must only rely on containment.
pub fn sample_in_convex_polygon<const D: usize>(
    rng: &mut Rand64,
    corners: &[na::Point<Real, D>],
    count: usize,
) -> Vec<na::Point<Real, D>> {
    let mut points = Vec::with_capacity(count);
    let mut weights = vec![0.0; corners.len()];

    for _ in 0..count {
        let mut sum = 0.0;
        for w in &mut weights {
            *w = rng.rand_float();
            sum += *w;
        }

        if sum <= Real::EPSILON {
            // All weights drawn zero; fall back to equal weights.
            weights.fill(1.0);
            sum = corners.len() as Real;
        }

        let mut acc = SVector::<Real, D>::zeros();
        for (w, corner) in weights.iter().zip(corners.iter()) {
            acc += corner.coords * *w;
        }

        points.push(na::Point::from(acc / sum));
    }

    points
}

/// The random stream used for the interior points of one face.
///
/// Every face gets its own stream keyed by `(seed, face)` so that the result
/// does not depend on the order in which faces are processed.
pub(crate) fn face_rng(seed: u64, face: u32) -> Rand64 {
    Rand64::new(((face as u128 + 1) << 64) | seed as u128)
}
