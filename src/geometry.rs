use geo_types::Point;

/// Helper function to convert degrees to radians
pub fn radians(deg: f64) -> f64 {
    std::f64::consts::PI * (deg / 180.0)
}

/// And back again.
pub fn degrees(rad: f64) -> f64 {
    rad * 180.0 / std::f64::consts::PI
}

/// Distance helpers for [`geo_types::Point`], treating a point as a vector
/// where that makes sense.
pub trait PointDistance {
    /// Scalar distance between two points.
    fn distance(&self, other: &Point<f64>) -> f64;

    /// Length of the point as if it were a vector from the origin.
    fn length(&self) -> f64;

    /// Bearing from `self` to `other` in degrees, measured the same way the
    /// turtle measures heading (0 = +x, 90 = +y).
    fn bearing(&self, other: &Point<f64>) -> f64;
}

impl PointDistance for Point<f64> {
    fn distance(&self, other: &Point<f64>) -> f64 {
        (*other - *self).length()
    }

    fn length(&self) -> f64 {
        self.x().hypot(self.y())
    }

    fn bearing(&self, other: &Point<f64>) -> f64 {
        let delta = *other - *self;
        degrees(delta.y().atan2(delta.x()))
    }
}

/// Displacement of `amount` along `heading` degrees, each axis rounded to
/// the nearest whole unit. Halves round away from zero, so `-2.5` becomes
/// `-3` (Java's `Math.round` would give `-2`).
pub fn step(heading: f64, amount: f64) -> Point<f64> {
    let (sin, cos) = radians(heading).sin_cos();
    Point::new((amount * cos).round(), (amount * sin).round())
}
