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

//! The vincenty module contains an implementation of Vincenty's inverse
//! formula for the length of the geodesic between a pair of positions on an
//! ellipsoid.
//!
//! T Vincenty, [Direct and Inverse Solutions of Geodesics on the Ellipsoid with application of nested equations](https://www.ngs.noaa.gov/PUBS_LIB/inverse.pdf),
//! Survey Review XXIII, 1975.
//!
//! The formula solves for λ, the longitude difference on the auxiliary
//! sphere, by fixed-point iteration. The iteration is bounded by
//! [`VincentyParameters::max_iterations`] and the way in which it ended is
//! reported by the [`Termination`] of the [`VincentySolution`].
//!
//! Nearly antipodal positions are not treated specially: the iteration may
//! fail to converge or produce `NaN`, which is returned to the caller.

#![allow(clippy::float_cmp)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::suboptimal_flops)]

use crate::ellipsoid::calculate_reduced_latitude;
use crate::{Ellipsoid, Metres};
use angle_sc::{Angle, Degrees};
use unit_sphere::LatLong;

/// The default maximum number of λ iterations.
pub const DEFAULT_MAX_ITERATIONS: u32 = 200;

/// The default convergence tolerance of λ in radians, about 0.06mm on the Earth.
pub const DEFAULT_TOLERANCE: f64 = 1e-12;

/// Positions whose combined latitude and longitude difference is less than
/// this value are coincident.
pub const COINCIDENT_THRESHOLD: Degrees = Degrees(0.000_01);

/// The parameters that bound the λ iteration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VincentyParameters {
    /// The maximum number of iterations to attempt.
    max_iterations: u32,
    /// The change in λ, in radians, at which the iteration has converged.
    tolerance: f64,
}

impl VincentyParameters {
    /// Constructor.
    /// * `max_iterations` - the maximum number of iterations to attempt.
    /// * `tolerance` - the convergence tolerance of λ in radians.
    #[must_use]
    pub const fn new(max_iterations: u32, tolerance: f64) -> Self {
        Self {
            max_iterations,
            tolerance,
        }
    }

    /// The maximum number of iterations to attempt.
    #[must_use]
    pub const fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// The convergence tolerance of λ in radians.
    #[must_use]
    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

impl Default for VincentyParameters {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE)
    }
}

/// How the calculation of a `VincentySolution` ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// The positions were coincident, no iterations were performed.
    Coincident,
    /// λ changed by no more than the tolerance.
    Converged,
    /// The maximum number of iterations was reached without converging,
    /// the distance was calculated from the last λ.
    IterationLimit,
}

/// The error returned when a distance is required from an iteration which
/// did not converge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum VincentyError {
    /// λ had not converged when the iteration limit was reached.
    #[error("Vincenty's formula did not converge in {iterations} iterations")]
    NonConvergence { iterations: u32 },
}

/// The result of Vincenty's inverse formula.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VincentySolution {
    /// The geodesic distance.
    distance: Metres,
    /// The number of λ iterations performed.
    iterations: u32,
    /// How the iteration ended.
    termination: Termination,
}

impl VincentySolution {
    /// The geodesic distance, whether or not the iteration converged.
    #[must_use]
    pub const fn distance(&self) -> Metres {
        self.distance
    }

    /// The number of λ iterations performed, zero for coincident positions.
    #[must_use]
    pub const fn iterations(&self) -> u32 {
        self.iterations
    }

    /// How the iteration ended.
    #[must_use]
    pub const fn termination(&self) -> Termination {
        self.termination
    }

    /// Whether the distance was calculated from a converged λ or from
    /// coincident positions.
    #[must_use]
    pub const fn converged(&self) -> bool {
        !matches!(self.termination, Termination::IterationLimit)
    }

    /// The geodesic distance, if the iteration converged.
    ///
    /// # Errors
    ///
    /// `VincentyError::NonConvergence` if the iteration limit was reached.
    pub const fn checked_distance(&self) -> Result<Metres, VincentyError> {
        match self.termination {
            Termination::IterationLimit => Err(VincentyError::NonConvergence {
                iterations: self.iterations,
            }),
            Termination::Coincident | Termination::Converged => Ok(self.distance),
        }
    }
}

/// Whether a pair of positions are coincident, i.e. the sum of the absolute
/// differences of their latitudes and longitudes is less than
/// `COINCIDENT_THRESHOLD`.
/// * `a`, `b` - the positions.
#[must_use]
pub fn is_coincident(a: &LatLong, b: &LatLong) -> bool {
    libm::fabs(a.lat().0 - b.lat().0) + libm::fabs(a.lon().0 - b.lon().0)
        < COINCIDENT_THRESHOLD.0
}

/// The great circle arc on the auxiliary sphere for a value of λ.
#[derive(Clone, Copy, Debug)]
struct AuxiliaryArc {
    sin_sigma: f64,
    cos_sigma: f64,
    /// The arc length in radians.
    sigma: f64,
    /// The sine of the azimuth of the arc at the Equator.
    sin_alpha: f64,
    cos_sq_alpha: f64,
    /// The cosine of twice the arc length from the Equator to the arc mid point.
    cos_2sigma_m: f64,
}

impl AuxiliaryArc {
    /// Calculate the arc between reduced latitudes `beta1` and `beta2`
    /// separated by `lambda` radians of longitude on the auxiliary sphere.
    fn new(beta1: Angle, beta2: Angle, lambda: f64) -> Self {
        let (sin_u1, cos_u1) = (beta1.sin().0, beta1.cos().0);
        let (sin_u2, cos_u2) = (beta2.sin().0, beta2.cos().0);
        let sin_lambda = libm::sin(lambda);
        let cos_lambda = libm::cos(lambda);

        let x = cos_u2 * sin_lambda;
        let y = cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda;
        let sin_sigma = libm::sqrt(x * x + y * y);
        let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        let sigma = libm::atan2(sin_sigma, cos_sigma);

        // sin_sigma is zero for antipodal positions
        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;

        // On an equatorial line sin_u1 * sin_u2 is also zero
        let cos_2sigma_m = if cos_sq_alpha == 0.0 {
            0.0
        } else {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        };

        Self {
            sin_sigma,
            cos_sigma,
            sigma,
            sin_alpha,
            cos_sq_alpha,
            cos_2sigma_m,
        }
    }

    /// Calculate the next value of λ from this arc.
    /// * `l` - the geodetic longitude difference in radians.
    /// * `f` - the flattening of the ellipsoid.
    fn next_lambda(&self, l: f64, f: f64) -> f64 {
        let c = f / 16.0 * self.cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * self.cos_sq_alpha));
        l + (1.0 - c)
            * f
            * self.sin_alpha
            * (self.sigma
                + c * self.sin_sigma
                    * (self.cos_2sigma_m
                        + c * self.cos_sigma
                            * (-1.0 + 2.0 * self.cos_2sigma_m * self.cos_2sigma_m)))
    }

    /// Calculate the length of the arc on the ellipsoid.
    /// * `ellipsoid` - the `Ellipsoid`.
    fn length(&self, ellipsoid: &Ellipsoid) -> Metres {
        let u_sq = self.cos_sq_alpha * ellipsoid.ep_2();
        let a = 1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
        let b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));

        let cos_2sigma_m_sq = self.cos_2sigma_m * self.cos_2sigma_m;
        let delta_sigma = b
            * self.sin_sigma
            * (self.cos_2sigma_m
                + b / 4.0
                    * (self.cos_sigma * (-1.0 + 2.0 * cos_2sigma_m_sq)
                        - b / 6.0
                            * self.cos_2sigma_m
                            * (-3.0 + 4.0 * self.sin_sigma * self.sin_sigma)
                            * (-3.0 + 4.0 * cos_2sigma_m_sq)));

        Metres(ellipsoid.b().0 * a * (self.sigma - delta_sigma))
    }
}

/// Calculate the geodesic distance between a pair of positions using
/// Vincenty's inverse formula.
/// * `a`, `b` - the start and finish positions in geodetic coordinates.
/// * `parameters` - the iteration limit and tolerance.
/// * `ellipsoid` - the `Ellipsoid`.
///
/// returns the distance, the number of iterations and how the iteration ended.
///
/// # Examples
/// ```
/// use wgs84_distance::*;
/// use wgs84_distance::vincenty::{calculate_vincenty_solution, Termination, VincentyParameters};
///
/// let istanbul = LatLong::new(Degrees(42.0), Degrees(29.0));
/// let washington = LatLong::new(Degrees(39.0), Degrees(-77.0));
/// let solution = calculate_vincenty_solution(
///     &istanbul,
///     &washington,
///     &VincentyParameters::default(),
///     &WGS84_ELLIPSOID,
/// );
/// assert_eq!(Termination::Converged, solution.termination());
/// assert!((solution.distance().0 - 8_339_863.136).abs() < 1e-3);
/// ```
#[must_use]
pub fn calculate_vincenty_solution(
    a: &LatLong,
    b: &LatLong,
    parameters: &VincentyParameters,
    ellipsoid: &Ellipsoid,
) -> VincentySolution {
    if is_coincident(a, b) {
        return VincentySolution {
            distance: Metres(0.0),
            iterations: 0,
            termination: Termination::Coincident,
        };
    }

    let beta1 = calculate_reduced_latitude(Angle::from(a.lat()), ellipsoid.one_minus_f());
    let beta2 = calculate_reduced_latitude(Angle::from(b.lat()), ellipsoid.one_minus_f());

    let l = (b.lon().0 - a.lon().0).to_radians();
    let mut lambda = l;

    // The spherical estimate, used when max_iterations is zero
    let mut arc = AuxiliaryArc::new(beta1, beta2, lambda);
    let mut iterations = 0;
    let mut termination = Termination::IterationLimit;
    while iterations < parameters.max_iterations() {
        iterations += 1;
        arc = AuxiliaryArc::new(beta1, beta2, lambda);

        let previous = lambda;
        lambda = arc.next_lambda(l, ellipsoid.f());
        if libm::fabs(previous - lambda) <= parameters.tolerance() {
            termination = Termination::Converged;
            break;
        }
    }

    if termination == Termination::Converged {
        tracing::trace!(iterations, "Vincenty converged");
    } else {
        tracing::warn!(
            iterations,
            tolerance = parameters.tolerance(),
            "Vincenty iteration limit reached"
        );
    }

    VincentySolution {
        distance: arc.length(ellipsoid),
        iterations,
        termination,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WGS84_ELLIPSOID;
    use angle_sc::is_within_tolerance;

    fn solve(a: &LatLong, b: &LatLong, parameters: &VincentyParameters) -> VincentySolution {
        calculate_vincenty_solution(a, b, parameters, &WGS84_ELLIPSOID)
    }

    #[test]
    fn test_vincenty_parameters() {
        let parameters = VincentyParameters::default();
        assert_eq!(200, parameters.max_iterations());
        assert_eq!(1e-12, parameters.tolerance());

        let parameters = VincentyParameters::new(10, 1e-9);
        assert_eq!(10, parameters.max_iterations());
        assert_eq!(1e-9, parameters.tolerance());
    }

    #[test]
    fn test_is_coincident() {
        let a = LatLong::new(Degrees(51.5), Degrees(-0.125));
        assert!(is_coincident(&a, &a));

        // combined difference of 0.000009 degrees
        let b = LatLong::new(Degrees(51.500_005), Degrees(-0.124_996));
        assert!(is_coincident(&a, &b));
        assert!(is_coincident(&b, &a));

        // combined difference of 0.00002 degrees
        let c = LatLong::new(Degrees(51.500_01), Degrees(-0.124_99));
        assert!(!is_coincident(&a, &c));

        // each difference is below the threshold, but not their sum
        let d = LatLong::new(Degrees(51.500_006), Degrees(-0.124_994));
        assert!(!is_coincident(&a, &d));
    }

    #[test]
    fn test_coincident_solution() {
        let a = LatLong::new(Degrees(0.0), Degrees(0.0));
        let b = LatLong::new(Degrees(0.000_005), Degrees(0.000_004));

        let solution = solve(&a, &b, &VincentyParameters::default());
        assert_eq!(0.0, solution.distance().0);
        assert_eq!(0, solution.iterations());
        assert_eq!(Termination::Coincident, solution.termination());
        assert!(solution.converged());
        assert_eq!(Ok(Metres(0.0)), solution.checked_distance());
    }

    #[test]
    fn test_beyond_coincident_threshold() {
        let a = LatLong::new(Degrees(0.0), Degrees(0.0));
        let b = LatLong::new(Degrees(0.000_01), Degrees(0.000_01));

        let solution = solve(&a, &b, &VincentyParameters::default());
        assert_eq!(Termination::Converged, solution.termination());
        assert!(0 < solution.iterations());
        assert!(is_within_tolerance(
            1.569_034_689_540_938,
            solution.distance().0,
            1e-9
        ));
    }

    #[test]
    fn test_lizard_point_to_john_o_groats() {
        let lizard_point = LatLong::new(Degrees(50.066_32), Degrees(-5.714_75));
        let john_o_groats = LatLong::new(Degrees(58.644_02), Degrees(-3.07));

        let solution = solve(&lizard_point, &john_o_groats, &VincentyParameters::default());
        assert_eq!(Termination::Converged, solution.termination());
        assert_eq!(4, solution.iterations());
        assert!(is_within_tolerance(
            969_955.190_110,
            solution.distance().0,
            1e-2
        ));
    }

    #[test]
    fn test_equatorial_line() {
        let a = LatLong::new(Degrees(0.0), Degrees(0.0));
        let b = LatLong::new(Degrees(0.0), Degrees(90.0));

        let solution = solve(&a, &b, &VincentyParameters::default());
        assert_eq!(Termination::Converged, solution.termination());
        assert_eq!(5, solution.iterations());

        // a quarter of the Equator
        let expected = WGS84_ELLIPSOID.a().0 * core::f64::consts::FRAC_PI_2;
        assert!(is_within_tolerance(expected, solution.distance().0, 1e-4));
    }

    #[test]
    fn test_meridian() {
        let a = LatLong::new(Degrees(0.0), Degrees(0.0));
        let b = LatLong::new(Degrees(90.0), Degrees(0.0));

        let solution = solve(&a, &b, &VincentyParameters::default());
        assert_eq!(Termination::Converged, solution.termination());
        assert_eq!(1, solution.iterations());

        // a quarter of a meridian
        assert!(is_within_tolerance(
            10_001_965.729_312,
            solution.distance().0,
            1e-3
        ));
    }

    #[test]
    fn test_limited_iterations() {
        let lizard_point = LatLong::new(Degrees(50.066_32), Degrees(-5.714_75));
        let john_o_groats = LatLong::new(Degrees(58.644_02), Degrees(-3.07));

        let solution = solve(
            &lizard_point,
            &john_o_groats,
            &VincentyParameters::new(2, DEFAULT_TOLERANCE),
        );
        assert_eq!(Termination::IterationLimit, solution.termination());
        assert_eq!(2, solution.iterations());
        assert!(!solution.converged());
        assert!(is_within_tolerance(
            969_955.151_877,
            solution.distance().0,
            1e-3
        ));
        assert_eq!(
            Err(VincentyError::NonConvergence { iterations: 2 }),
            solution.checked_distance()
        );

        // Without iterating, the distance is from the spherical estimate of λ
        let solution = solve(
            &lizard_point,
            &john_o_groats,
            &VincentyParameters::new(0, DEFAULT_TOLERANCE),
        );
        assert_eq!(Termination::IterationLimit, solution.termination());
        assert_eq!(0, solution.iterations());
        assert!(is_within_tolerance(
            969_921.285_048,
            solution.distance().0,
            1e-3
        ));
    }

    #[test]
    fn test_nearly_antipodal_does_not_converge() {
        let a = LatLong::new(Degrees(0.0), Degrees(0.0));
        let b = LatLong::new(Degrees(0.5), Degrees(179.7));

        let solution = solve(&a, &b, &VincentyParameters::default());
        assert_eq!(Termination::IterationLimit, solution.termination());
        assert_eq!(DEFAULT_MAX_ITERATIONS, solution.iterations());
        assert!(solution.checked_distance().is_err());
    }

    #[test]
    fn test_vincenty_error_display() {
        let error = VincentyError::NonConvergence { iterations: 200 };
        assert_eq!(
            "Vincenty's formula did not converge in 200 iterations",
            error.to_string()
        );
    }
}
