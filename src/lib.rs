// Copyright (c) 2024-2025 Ken Barker

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! wgs84-distance
//!
//! A library for calculating the distance between a pair of positions on the
//! Earth's surface using three different models of the Earth.
//!
//! - [`vincenty_distance`] models the Earth as the
//!   [WGS-84](https://www.icao.int/NACC/Documents/Meetings/2014/ECARAIM/REF08-Doc9674.pdf)
//!   ellipsoid and calculates the geodesic distance using
//!   [Vincenty's inverse formula](https://en.wikipedia.org/wiki/Vincenty%27s_formulae).
//!   It is the most accurate model, but iterative.
//! - [`great_circle_distance`] models the Earth as a sphere and calculates the
//!   great circle distance using the
//!   [spherical law of cosines](https://en.wikipedia.org/wiki/Spherical_law_of_cosines).
//! - [`haversine_distance`] also models the Earth as a sphere, but uses the
//!   [haversine formula](https://en.wikipedia.org/wiki/Haversine_formula)
//!   which is well conditioned for short distances.
//!
//! The spherical models use the mean radius of the Earth, 6 371 009 metres.
//!
//! All distances are in `Metres`, conversion to other units is left to the caller.
//!
//! ## Design
//!
//! The functions are pure: they take a pair of `LatLong`s and return a
//! distance. Positions are not validated, out of range latitudes and
//! longitudes produce mathematically consistent, if geographically
//! meaningless, distances.
//!
//! Vincenty's formula iterates up to 200 times to a tolerance of 1e-12
//! radians. It does not converge for nearly antipodal positions: it then
//! returns the distance calculated from the last iteration, which may be
//! `NaN`. The [`vincenty`] module reports how the iteration ended and
//! [`try_vincenty_distance`] returns an error if it did not converge.
//!
//! The library depends upon the following crates:
//!
//! - [angle-sc](https://crates.io/crates/angle-sc) - to define `Angle`,
//!   `Degrees` and `Radians` and perform trigonometric calculations;
//! - [unit-sphere](https://crates.io/crates/unit-sphere) - to define `LatLong`;
//! - [icao_units](https://crates.io/crates/icao-units) - to define `Metres`.
//!
//! The library is declared [no_std](https://docs.rust-embedded.org/book/intro/no-std.html)
//! so it can be used in embedded applications.

#![cfg_attr(not(test), no_std)]

extern crate angle_sc;
extern crate icao_units;
extern crate unit_sphere;

pub mod ellipsoid;
pub mod sphere;
pub mod vincenty;

pub use angle_sc::{Angle, Degrees, Radians};
pub use icao_units::si::Metres;
pub use unit_sphere::LatLong;
pub use vincenty::{Termination, VincentyError, VincentyParameters, VincentySolution};

use once_cell::sync::Lazy;

/// The parameters of an `Ellipsoid`.
#[derive(Clone, Debug, PartialEq)]
pub struct Ellipsoid {
    /// The Semimajor axis of the ellipsoid.
    a: Metres,
    /// The flattening of the ellipsoid, a ratio.
    f: f64,

    /// The Semiminor axis of the ellipsoid.
    b: Metres,
    /// One minus the flattening ratio.
    one_minus_f: f64,
    /// The square of the second Eccentricity of the ellipsoid.
    ep_2: f64,
}

impl Ellipsoid {
    /// Constructor.
    /// * `a` - the Semimajor axis of the `Ellipsoid`.
    /// * `f` - the flattening of the `Ellipsoid`, a ratio.
    #[must_use]
    pub fn new(a: Metres, f: f64) -> Self {
        Self {
            a,
            f,
            b: ellipsoid::calculate_minor_axis(a, f),
            one_minus_f: 1.0 - f,
            ep_2: ellipsoid::calculate_sq_2nd_eccentricity(f),
        }
    }

    /// Construct an `Ellipsoid` with the WGS-84 parameters.
    #[must_use]
    pub fn wgs84() -> Self {
        Self::new(ellipsoid::wgs84::A, ellipsoid::wgs84::F)
    }

    /// The Semimajor axis of the ellipsoid.
    #[must_use]
    pub const fn a(&self) -> Metres {
        self.a
    }

    /// The flattening of the ellipsoid, a ratio.
    #[must_use]
    pub const fn f(&self) -> f64 {
        self.f
    }

    /// The Semiminor axis of the ellipsoid.
    #[must_use]
    pub const fn b(&self) -> Metres {
        self.b
    }

    /// One minus the flattening ratio.
    #[must_use]
    pub const fn one_minus_f(&self) -> f64 {
        self.one_minus_f
    }

    /// The square of the second Eccentricity of the ellipsoid.
    #[must_use]
    pub const fn ep_2(&self) -> f64 {
        self.ep_2
    }
}

/// A static instance of the WGS-84 `Ellipsoid`.
pub static WGS84_ELLIPSOID: Lazy<Ellipsoid> = Lazy::new(Ellipsoid::wgs84);

/// Calculate the geodesic distance between a pair of positions on the WGS-84
/// ellipsoid using Vincenty's inverse formula.
///
/// Positions less than 0.00001° apart, as the sum of their latitude and
/// longitude differences, are at distance zero.
/// * `a`, `b` - the positions in geodetic coordinates.
///
/// returns the geodesic distance, even if the iteration did not converge.
///
/// # Examples
/// ```
/// use wgs84_distance::*;
///
/// let lizard_point = LatLong::new(Degrees(50.066_32), Degrees(-5.714_75));
/// let john_o_groats = LatLong::new(Degrees(58.644_02), Degrees(-3.07));
/// let distance = vincenty_distance(&lizard_point, &john_o_groats);
/// assert!((distance.0 - 969_955.190).abs() < 0.01);
/// ```
#[must_use]
pub fn vincenty_distance(a: &LatLong, b: &LatLong) -> Metres {
    vincenty::calculate_vincenty_solution(a, b, &VincentyParameters::default(), &WGS84_ELLIPSOID)
        .distance()
}

/// Calculate the geodesic distance between a pair of positions on the WGS-84
/// ellipsoid using Vincenty's inverse formula, if it converges.
/// * `a`, `b` - the positions in geodetic coordinates.
///
/// # Errors
///
/// `VincentyError::NonConvergence` if the positions are nearly antipodal
/// and the iteration did not converge.
///
/// # Examples
/// ```
/// use wgs84_distance::*;
///
/// let a = LatLong::new(Degrees(0.0), Degrees(0.0));
/// let b = LatLong::new(Degrees(0.5), Degrees(179.7));
/// assert!(try_vincenty_distance(&a, &b).is_err());
/// ```
pub fn try_vincenty_distance(a: &LatLong, b: &LatLong) -> Result<Metres, VincentyError> {
    vincenty::calculate_vincenty_solution(a, b, &VincentyParameters::default(), &WGS84_ELLIPSOID)
        .checked_distance()
}

/// Calculate the great circle distance between a pair of positions on a
/// sphere with the mean radius of the Earth, using the spherical law of cosines.
/// * `a`, `b` - the positions.
///
/// # Examples
/// ```
/// use wgs84_distance::*;
///
/// let a = LatLong::new(Degrees(0.0), Degrees(0.0));
/// let b = LatLong::new(Degrees(0.0), Degrees(90.0));
/// let distance = great_circle_distance(&a, &b);
/// assert!((distance.0 - 10_007_557.535).abs() < 1e-3);
/// ```
#[must_use]
pub fn great_circle_distance(a: &LatLong, b: &LatLong) -> Metres {
    sphere::calculate_great_circle_distance(a, b, sphere::MEAN_EARTH_RADIUS)
}

/// Calculate the great circle distance between a pair of positions on a
/// sphere with the mean radius of the Earth, using the haversine formula.
/// * `a`, `b` - the positions.
#[must_use]
pub fn haversine_distance(a: &LatLong, b: &LatLong) -> Metres {
    sphere::calculate_haversine_distance(a, b, sphere::MEAN_EARTH_RADIUS)
}
