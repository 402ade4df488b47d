//! Small numeric helpers shared by the builder and the slash gesture.

use glam::{Vec2, Vec3};

/// Average of a set of points. Returns `Vec3::ZERO` for an empty set.
pub fn centroid<I>(points: I) -> Vec3
where
    I: IntoIterator<Item = Vec3>,
{
    let (sum, count) = points
        .into_iter()
        .fold((Vec3::ZERO, 0usize), |(sum, count), p| (sum + p, count + 1));
    if count == 0 {
        Vec3::ZERO
    } else {
        sum / count as f32
    }
}

/// Least-squares slope of `y` over `x`.
///
/// Returns `None` for fewer than two points or when every `x` is identical
/// (vertical line).
pub fn linear_regression_slope(points: &[Vec2]) -> Option<f32> {
    if points.len() < 2 {
        return None;
    }

    let n = points.len() as f32;
    let (sum_x, sum_y, sum_xx, sum_xy) = points.iter().fold((0.0, 0.0, 0.0, 0.0), |acc, p| {
        (acc.0 + p.x, acc.1 + p.y, acc.2 + p.x * p.x, acc.3 + p.x * p.y)
    });

    let ss_x = sum_xx - sum_x * sum_x / n;
    let co = sum_xy - sum_x * sum_y / n;
    if ss_x.abs() <= f32::EPSILON {
        return None;
    }
    Some(co / ss_x)
}
