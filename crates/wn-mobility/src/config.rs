//! Random-waypoint parameters and the waypoint sampling region.

use std::f64::consts::TAU;

use wn_core::Vec3;

use crate::{MobilityError, MobilityResult};

/// Region inside which new waypoints are drawn.  Two-dimensional; the node's
/// altitude is never changed.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Boundary {
    Rectangle {
        center_x: f64,
        center_y: f64,
        width:    f64,
        height:   f64,
    },
    Circle {
        center_x: f64,
        center_y: f64,
        radius:   f64,
    },
}

impl Boundary {
    /// Check that every field is finite and every extent strictly positive.
    pub fn validate(&self) -> MobilityResult<()> {
        match *self {
            Boundary::Rectangle { center_x, center_y, width, height } => {
                if !center_x.is_finite() || !center_y.is_finite() {
                    return Err(MobilityError::Config("rectangle center must be finite".into()));
                }
                if !(width.is_finite() && width > 0.0) || !(height.is_finite() && height > 0.0) {
                    return Err(MobilityError::Config(format!(
                        "rectangle extent must be positive, got {width} x {height}"
                    )));
                }
            }
            Boundary::Circle { center_x, center_y, radius } => {
                if !center_x.is_finite() || !center_y.is_finite() {
                    return Err(MobilityError::Config("circle center must be finite".into()));
                }
                if !(radius.is_finite() && radius > 0.0) {
                    return Err(MobilityError::Config(format!(
                        "circle radius must be positive, got {radius}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Map one pair of unit-interval draws `[u, v]` to a point inside the
    /// region at altitude `z`.
    ///
    /// Rectangles are sampled uniformly per axis.  Circles use
    /// `r = R·sqrt(u)`, `θ = 2π·v`, which is uniform in area.
    pub fn sample(&self, [u, v]: [f64; 2], z: f64) -> Vec3 {
        match *self {
            Boundary::Rectangle { center_x, center_y, width, height } => Vec3::new(
                center_x - width * 0.5 + u * width,
                center_y - height * 0.5 + v * height,
                z,
            ),
            Boundary::Circle { center_x, center_y, radius } => {
                let r = radius * u.sqrt();
                let theta = TAU * v;
                Vec3::new(center_x + r * theta.cos(), center_y + r * theta.sin(), z)
            }
        }
    }

    /// `true` if the horizontal projection of `p` lies inside the region
    /// (inclusive, with a small tolerance for floating-point edges).
    pub fn contains(&self, p: Vec3) -> bool {
        const EPS: f64 = 1e-9;
        match *self {
            Boundary::Rectangle { center_x, center_y, width, height } => {
                (p.x - center_x).abs() <= width * 0.5 + EPS
                    && (p.y - center_y).abs() <= height * 0.5 + EPS
            }
            Boundary::Circle { center_x, center_y, radius } => {
                let dx = p.x - center_x;
                let dy = p.y - center_y;
                (dx * dx + dy * dy).sqrt() <= radius + EPS
            }
        }
    }
}

/// Parameters of the random-waypoint model.
///
/// Build one directly and call [`validate`][Self::validate] (the engine
/// constructor does this for you).  Invalid values are rejected, never
/// clamped.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RandomWaypointConfig {
    /// Lower bound of the per-leg speed draw (m/s).  Must be `> 0`.
    pub speed_min: f64,

    /// Upper bound of the per-leg speed draw (m/s).  Must be `>= speed_min`;
    /// equal bounds give a constant speed.
    pub speed_max: f64,

    /// Dwell time at each waypoint (s).  `0` means the next leg starts
    /// immediately.
    pub pause_duration: f64,

    /// Sampling region for waypoints.
    pub boundary: Boundary,
}

impl RandomWaypointConfig {
    pub fn validate(&self) -> MobilityResult<()> {
        if !self.speed_min.is_finite() || !self.speed_max.is_finite() {
            return Err(MobilityError::Config(format!(
                "speed range must be finite, got [{}, {}]",
                self.speed_min, self.speed_max
            )));
        }
        if self.speed_min <= 0.0 {
            return Err(MobilityError::Config(format!(
                "minimum speed must be positive, got {}",
                self.speed_min
            )));
        }
        if self.speed_max < self.speed_min {
            return Err(MobilityError::Config(format!(
                "maximum speed {} is below minimum speed {}",
                self.speed_max, self.speed_min
            )));
        }
        if !self.pause_duration.is_finite() || self.pause_duration < 0.0 {
            return Err(MobilityError::Config(format!(
                "pause duration must be a non-negative number of seconds, got {}",
                self.pause_duration
            )));
        }
        self.boundary.validate()
    }
}
