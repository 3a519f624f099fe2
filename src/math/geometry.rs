use nalgebra::{Point3, Unit, Vector3};

/// Cosine of the angle at `vertex` between the rays towards `a` and `b`.
///
/// This is the collinearity measure used by the eclipse tests: +1 means `a`
/// and `b` lie in the same direction from `vertex`, -1 means `vertex` sits
/// between them. Returns `None` if either ray has (nearly) zero length.
pub fn alignment(vertex: &Point3<f64>, a: &Point3<f64>, b: &Point3<f64>) -> Option<f64> {
    let u = Unit::try_new(a - vertex, 1e-20)?;
    let v = Unit::try_new(b - vertex, 1e-20)?;
    Some(u.into_inner().dot(&v.into_inner()))
}

/// Angular radius of a sphere, using the small-angle (pinhole) approximation.
pub fn apparent_radius(radius: f64, distance: f64) -> f64 {
    radius / distance
}

/// Computes the vector rejection of u from v. v must be non-zero.
pub fn reject(u: &Vector3<f64>, v: &Vector3<f64>) -> Vector3<f64> {
    let u_proj_v = u.dot(v) * v / v.norm_squared();
    u - u_proj_v
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn test_alignment() {
        let origin = Point3::origin();
        let x = Point3::new(2.0, 0.0, 0.0);
        let neg_x = Point3::new(-5.0, 0.0, 0.0);
        let z = Point3::new(0.0, 0.0, 3.0);

        assert_relative_eq!(alignment(&origin, &x, &x).unwrap(), 1.0);
        assert_relative_eq!(alignment(&origin, &x, &neg_x).unwrap(), -1.0);
        assert_relative_eq!(alignment(&origin, &x, &z).unwrap(), 0.0);

        // Offset vertex
        let vertex = Point3::new(1.0, 1.0, 1.0);
        let a = Point3::new(2.0, 2.0, 1.0);
        let b = Point3::new(3.0, 1.0, 1.0);
        assert_relative_eq!(
            alignment(&vertex, &a, &b).unwrap(),
            std::f64::consts::FRAC_1_SQRT_2,
            max_relative = 1e-15
        );
    }

    #[test]
    fn test_alignment_degenerate() {
        let origin = Point3::origin();
        let x = Point3::new(1.0, 0.0, 0.0);
        assert!(alignment(&origin, &origin, &x).is_none());
        assert!(alignment(&origin, &x, &origin).is_none());
    }

    #[test]
    fn test_reject() {
        assert_relative_eq!(
            reject(&Vector3::new(4.0, 5.0, 7.0), &Vector3::new(1.0, 2.0, 3.0)),
            Vector3::new(1.5, 0.0, -0.5),
        );

        assert_relative_eq!(
            reject(&Vector3::new(0.0, 0.0, 0.0), &Vector3::new(1.0, 2.0, 3.0)),
            Vector3::new(0.0, 0.0, 0.0),
        );
    }
}
