use nalgebra::{Point3, Rotation3, Unit, Vector3};

/// Builds a rotation about `axis` by `angle_degrees`.
///
/// Returns `None` if `axis` has (near) zero length.
pub fn rotation_from_axis_angle(axis: &Vector3<f64>, angle_degrees: f64) -> Option<Rotation3<f64>> {
    let unit = Unit::try_new(*axis, 1e-12)?;
    Some(Rotation3::from_axis_angle(&unit, angle_degrees.to_radians()))
}

pub fn calculate_rmsd(coords1: &[Point3<f64>], coords2: &[Point3<f64>]) -> Option<f64> {
    if coords1.len() != coords2.len() || coords1.is_empty() {
        return None;
    }
    let n = coords1.len() as f64;
    let squared_dist_sum: f64 = coords1
        .iter()
        .zip(coords2.iter())
        .map(|(p1, p2)| (p1 - p2).norm_squared())
        .sum();
    Some((squared_dist_sum / n).sqrt())
}

/// Largest displacement of any point between two coordinate sets of equal length.
pub fn max_displacement(coords1: &[Point3<f64>], coords2: &[Point3<f64>]) -> Option<f64> {
    if coords1.len() != coords2.len() {
        return None;
    }
    Some(
        coords1
            .iter()
            .zip(coords2)
            .map(|(p1, p2)| (p1 - p2).norm())
            .fold(0.0, f64::max),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn quarter_turn_about_z_maps_x_to_y() {
        let rotation = rotation_from_axis_angle(&Vector3::z(), 90.0).unwrap();
        let rotated = rotation * Vector3::x();
        assert!((rotated - Vector3::y()).norm() < TOLERANCE);
    }

    #[test]
    fn axis_length_does_not_matter() {
        let a = rotation_from_axis_angle(&Vector3::new(0.0, 0.0, 5.0), 33.0).unwrap();
        let b = rotation_from_axis_angle(&Vector3::z(), 33.0).unwrap();
        assert!((a.matrix() - b.matrix()).norm() < TOLERANCE);
    }

    #[test]
    fn zero_axis_has_no_rotation() {
        assert!(rotation_from_axis_angle(&Vector3::zeros(), 90.0).is_none());
    }

    #[test]
    fn rmsd_of_uniform_shift_equals_shift_length() {
        let a = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
        let b: Vec<_> = a.iter().map(|p| p + Vector3::new(0.0, 3.0, 4.0)).collect();

        assert!((calculate_rmsd(&a, &b).unwrap() - 5.0).abs() < TOLERANCE);
        assert!(calculate_rmsd(&a, &b[..1]).is_none());
        assert!(calculate_rmsd(&[], &[]).is_none());
    }

    #[test]
    fn max_displacement_finds_largest_move() {
        let a = vec![Point3::origin(), Point3::origin()];
        let b = vec![Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 2.0, 0.0)];

        assert_eq!(max_displacement(&a, &b), Some(2.0));
        assert_eq!(max_displacement(&[], &[]), Some(0.0));
    }
}
