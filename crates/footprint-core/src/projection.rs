//! Conversion from planar map coordinates to geographic coordinates.
//!
//! The import pipeline works entirely in planar coordinates. Emitted points
//! additionally carry a geographic position computed by a [`Projection`].
//!
//! # Overview
//!
//! - [`Projection`] - A pure planar → geographic conversion
//! - [`LambertConformalConic`] - Inverse Lambert conformal conic on an ellipsoid,
//!   with [`LambertConformalConic::lambert93`] preset for the French national grid
//! - [`IdentityProjection`] - Passes coordinates through (x → longitude, y → latitude)
//! - [`ProjectionKind`] - Configuration-level selector for the above

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use log::warn;
use serde::Deserialize;

use crate::geometry::{GeoCoordinate, PlanarPoint};

/// Maximum number of fixed-point iterations for the inverse latitude.
const MAX_LATITUDE_ITERATIONS: usize = 20;

/// Convergence threshold for the inverse latitude, in radians.
const LATITUDE_TOLERANCE: f64 = 1e-12;

/// A pure conversion from planar coordinates to geographic coordinates.
///
/// Implementations must be total over the coordinate range they are used
/// with and must not depend on external state.
pub trait Projection {
    /// Converts a planar point to latitude/longitude in degrees
    fn planar_to_geographic(&self, point: PlanarPoint) -> GeoCoordinate;
}

/// Treats planar coordinates as already geographic.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityProjection;

impl Projection for IdentityProjection {
    fn planar_to_geographic(&self, point: PlanarPoint) -> GeoCoordinate {
        GeoCoordinate::new(point.y(), point.x())
    }
}

/// Defining parameters of a Lambert conformal conic projection with two
/// standard parallels. Angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConicParameters {
    pub semi_major_axis: f64,
    pub inverse_flattening: f64,
    pub standard_parallel_1: f64,
    pub standard_parallel_2: f64,
    pub latitude_of_origin: f64,
    pub central_meridian: f64,
    pub false_easting: f64,
    pub false_northing: f64,
}

/// Lambert conformal conic projection (two standard parallels, ellipsoidal).
///
/// # Examples
///
/// ```
/// # use footprint_core::geometry::PlanarPoint;
/// # use footprint_core::projection::{LambertConformalConic, Projection};
/// let lambert = LambertConformalConic::lambert93();
/// let origin = lambert.planar_to_geographic(PlanarPoint::new(700_000.0, 6_600_000.0));
///
/// assert!((origin.lat() - 46.5).abs() < 1e-9);
/// assert!((origin.lon() - 3.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LambertConformalConic {
    eccentricity: f64,
    cone_constant: f64,
    scaled_f: f64,
    rho0: f64,
    central_meridian: f64,
    false_easting: f64,
    false_northing: f64,
}

impl LambertConformalConic {
    /// Lambert 93 (EPSG:2154) on the GRS80 ellipsoid.
    pub fn lambert93() -> Self {
        Self::new(ConicParameters {
            semi_major_axis: 6_378_137.0,
            inverse_flattening: 298.257_222_101,
            standard_parallel_1: 44.0,
            standard_parallel_2: 49.0,
            latitude_of_origin: 46.5,
            central_meridian: 3.0,
            false_easting: 700_000.0,
            false_northing: 6_600_000.0,
        })
    }

    /// Derives the projection constants from its defining parameters.
    pub fn new(params: ConicParameters) -> Self {
        let flattening = 1.0 / params.inverse_flattening;
        let eccentricity = (2.0 * flattening - flattening * flattening).sqrt();

        let phi1 = params.standard_parallel_1.to_radians();
        let phi2 = params.standard_parallel_2.to_radians();
        let phi0 = params.latitude_of_origin.to_radians();

        let m1 = Self::m(phi1, eccentricity);
        let m2 = Self::m(phi2, eccentricity);
        let t0 = Self::t(phi0, eccentricity);
        let t1 = Self::t(phi1, eccentricity);
        let t2 = Self::t(phi2, eccentricity);

        let cone_constant = if (phi1 - phi2).abs() < f64::EPSILON {
            phi1.sin()
        } else {
            (m1.ln() - m2.ln()) / (t1.ln() - t2.ln())
        };
        let f = m1 / (cone_constant * t1.powf(cone_constant));
        let scaled_f = params.semi_major_axis * f;

        Self {
            eccentricity,
            cone_constant,
            scaled_f,
            rho0: scaled_f * t0.powf(cone_constant),
            central_meridian: params.central_meridian.to_radians(),
            false_easting: params.false_easting,
            false_northing: params.false_northing,
        }
    }

    /// Forward projection, geographic → planar.
    pub fn geographic_to_planar(&self, coordinate: GeoCoordinate) -> PlanarPoint {
        let phi = coordinate.lat().to_radians();
        let lambda = coordinate.lon().to_radians();

        let rho = self.scaled_f * Self::t(phi, self.eccentricity).powf(self.cone_constant);
        let theta = self.cone_constant * (lambda - self.central_meridian);

        PlanarPoint::new(
            self.false_easting + rho * theta.sin(),
            self.false_northing + self.rho0 - rho * theta.cos(),
        )
    }

    fn m(phi: f64, e: f64) -> f64 {
        let sin = phi.sin();
        phi.cos() / (1.0 - e * e * sin * sin).sqrt()
    }

    fn t(phi: f64, e: f64) -> f64 {
        let sin = phi.sin();
        (FRAC_PI_4 - phi / 2.0).tan() / ((1.0 - e * sin) / (1.0 + e * sin)).powf(e / 2.0)
    }
}

impl Projection for LambertConformalConic {
    fn planar_to_geographic(&self, point: PlanarPoint) -> GeoCoordinate {
        let n = self.cone_constant;
        let e = self.eccentricity;

        let dx = point.x() - self.false_easting;
        let dy = self.rho0 - (point.y() - self.false_northing);

        let rho = n.signum() * dx.hypot(dy);
        let theta = if n < 0.0 {
            (-dx).atan2(-dy)
        } else {
            dx.atan2(dy)
        };
        let t = (rho / self.scaled_f).powf(1.0 / n);

        let lambda = theta / n + self.central_meridian;

        let mut phi = FRAC_PI_2 - 2.0 * t.atan();
        let mut converged = false;
        for _ in 0..MAX_LATITUDE_ITERATIONS {
            let sin = phi.sin();
            let next = FRAC_PI_2 - 2.0 * (t * ((1.0 - e * sin) / (1.0 + e * sin)).powf(e / 2.0)).atan();
            let delta = (next - phi).abs();
            phi = next;
            if delta < LATITUDE_TOLERANCE {
                converged = true;
                break;
            }
        }
        if !converged {
            warn!(x = point.x(), y = point.y(); "Inverse latitude did not converge");
        }

        GeoCoordinate::new(phi.to_degrees(), lambda.to_degrees())
    }
}

/// Projection selector used in configuration files.
///
/// Deserializes from `"lambert93"` or `"identity"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionKind {
    /// French national grid, the planar system of cadastre documents
    #[default]
    Lambert93,
    /// No conversion
    Identity,
}

impl ProjectionKind {
    /// Instantiates the selected projection.
    pub fn build(self) -> Box<dyn Projection + Send + Sync> {
        match self {
            ProjectionKind::Lambert93 => Box::new(LambertConformalConic::lambert93()),
            ProjectionKind::Identity => Box::new(IdentityProjection),
        }
    }
}
