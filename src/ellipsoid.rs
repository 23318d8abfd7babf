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

//! The ellipsoid module contains functions for deriving the parameters used
//! by Vincenty's formulae from an ellipsoid's Semimajor axis and flattening.

#![allow(clippy::suboptimal_flops)]

pub mod wgs84;

use crate::Metres;
use angle_sc::Angle;

/// Calculate the Semiminor axis (polar radius) of an ellipsoid: `b = (1-f)·a`.
/// * `a` - the Semimajor axis of an ellipsoid.
/// * `f` - the flattening ratio.
/// # Examples
/// ```
/// use wgs84_distance::Metres;
/// use wgs84_distance::ellipsoid::{calculate_minor_axis, wgs84};
///
/// let b = calculate_minor_axis(wgs84::A, wgs84::F);
/// assert!((b.0 - 6_356_752.314_245).abs() < 1e-3);
/// ```
#[must_use]
pub fn calculate_minor_axis(a: Metres, f: f64) -> Metres {
    Metres(a.0 * (1.0 - f))
}

/// Calculate the square of the Eccentricity of an ellipsoid.
/// * `f` - the flattening ratio.
#[must_use]
pub fn calculate_sq_eccentricity(f: f64) -> f64 {
    f * (2.0 - f)
}

/// Calculate the square of the second Eccentricity of an ellipsoid,
/// i.e. `(a² - b²) / b²`.
/// * `f` - the flattening ratio.
#[must_use]
pub fn calculate_sq_2nd_eccentricity(f: f64) -> f64 {
    let one_minus_f = 1.0 - f;
    calculate_sq_eccentricity(f) / (one_minus_f * one_minus_f)
}

/// Convert a geodetic Latitude to a reduced (parametric) Latitude on the
/// auxiliary sphere: `atan((1-f)·tan(lat))`.
///
/// The result is computed from the sine and cosine of `lat`, so it remains
/// well defined at the poles where `tan(lat)` is not.
/// Like `atan`, the result is in the range -90° to 90°: a latitude beyond
/// the poles, e.g. 100°, is folded back to the reduced latitude of -80°.
/// * `lat` - the geodetic Latitude
/// * `one_minus_f` - one minus the flattening ratio.
#[must_use]
pub fn calculate_reduced_latitude(lat: Angle, one_minus_f: f64) -> Angle {
    let sin_lat = lat.sin().0;
    let cos_lat = lat.cos().0;
    if cos_lat < 0.0 {
        Angle::from_y_x(-one_minus_f * sin_lat, -cos_lat)
    } else {
        Angle::from_y_x(one_minus_f * sin_lat, cos_lat)
    }
}
