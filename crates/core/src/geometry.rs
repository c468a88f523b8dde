// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sphere geometry: a position type and the great-circle math the engine
//! needs to resolve distance and motion. Elevation sampling and terrain
//! composition are out of scope here (world generation owns the content);
//! this module only carries the minimal contract — a radius and a flat
//! `BareSphere` implementation — needed to exercise the engine end to end.

use serde::{Deserialize, Serialize};

/// A position on a sphere, in spherical coordinates: `phi` is colatitude
/// (0 at the north pole, pi at the south pole), `theta` is longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub phi: f64,
    pub theta: f64,
}

impl Point {
    pub fn new(phi: f64, theta: f64) -> Self {
        Self { phi, theta }
    }

    /// Great-circle distance to `other` on a sphere of the given `radius`.
    pub fn great_circle_distance_to(&self, other: &Point, radius: f64) -> f64 {
        let dtheta = other.theta - self.theta;
        let cos_angle =
            self.phi.cos() * other.phi.cos() + self.phi.sin() * other.phi.sin() * dtheta.cos();
        radius * cos_angle.clamp(-1.0, 1.0).acos()
    }

    /// Returns the point reached by moving `distance` along `bearing`
    /// (radians, 0 = toward increasing theta) on a sphere of `radius`.
    ///
    /// Standard destination-point formula, expressed in colatitude (`phi`)
    /// rather than latitude: `lat = pi/2 - phi`.
    pub fn moved_by(&self, distance: f64, bearing: f64, radius: f64) -> Self {
        if radius <= 0.0 {
            return *self;
        }

        let angular_distance = distance / radius;
        let (sin_d, cos_d) = angular_distance.sin_cos();
        let sin_lat1 = self.phi.cos();
        let cos_lat1 = self.phi.sin();

        let sin_lat2 = (sin_lat1 * cos_d + cos_lat1 * sin_d * bearing.cos()).clamp(-1.0, 1.0);
        let lat2 = sin_lat2.asin();
        let new_phi = std::f64::consts::FRAC_PI_2 - lat2;

        let dtheta = (bearing.sin() * sin_d * cos_lat1).atan2(cos_d - sin_lat1 * sin_lat2);

        Self {
            phi: new_phi,
            theta: self.theta + dtheta,
        }
    }
}

/// Supplies a sphere radius and (optionally) terrain height at a point.
/// World generation composes the terrain; the engine only ever needs the
/// radius for distance and motion math.
pub trait Elevation: Send + Sync {
    fn radius(&self) -> f64;
    fn sample(&self, point: Point) -> f64;
}

/// A featureless sphere — sufficient for every invariant the engine checks,
/// since terrain height plays no role in distance, motion, or crafting.
pub struct BareSphere {
    radius: f64,
}

impl BareSphere {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }
}

impl Elevation for BareSphere {
    fn radius(&self) -> f64 {
        self.radius
    }

    fn sample(&self, _point: Point) -> f64 {
        0.0
    }
}

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod tests;
