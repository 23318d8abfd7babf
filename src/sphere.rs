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

//! The sphere module contains closed-form distance calculations on a
//! spherical model of the Earth.
//!
//! Both functions take the radius of the sphere, normally
//! [`MEAN_EARTH_RADIUS`].

#![allow(clippy::suboptimal_flops)]

use crate::Metres;
use angle_sc::{trig, Angle, Degrees};
use unit_sphere::LatLong;

/// The mean radius of the Earth in metres, as used by the spherical models.
pub const MEAN_EARTH_RADIUS: Metres = Metres(6_371_009.0);

/// Calculate the great circle distance between a pair of positions using the
/// spherical law of cosines:
/// `R · acos(sin φ1·sin φ2 + cos φ1·cos φ2·cos(λ1 − λ2))`.
///
/// Rounding may take the cosine of the arc length just beyond ±1 so it is
/// clamped before taking its arc cosine. Near zero the arc cosine is
/// ill-conditioned, the distance between positions a few centimetres apart
/// may be wrong by up to about 0.1 m; use the haversine formula for them.
/// * `a`, `b` - the positions.
/// * `radius` - the radius of the sphere.
///
/// returns the great circle distance.
#[must_use]
pub fn calculate_great_circle_distance(a: &LatLong, b: &LatLong, radius: Metres) -> Metres {
    let lat1 = Angle::from(a.lat());
    let lat2 = Angle::from(b.lat());
    let delta_long = Angle::from(Degrees(a.lon().0 - b.lon().0));

    let cos_distance = lat1.sin().0 * lat2.sin().0
        + lat1.cos().0 * lat2.cos().0 * delta_long.cos().0;
    Metres(radius.0 * libm::acos(trig::UnitNegRange::clamp(cos_distance).0))
}

/// Calculate the great circle distance between a pair of positions using the
/// haversine formula:
/// `2·R·asin(sqrt(sin²(Δφ/2) + cos φ1·cos φ2·sin²(Δλ/2)))`.
/// * `a`, `b` - the positions.
/// * `radius` - the radius of the sphere.
///
/// returns the great circle distance.
#[must_use]
pub fn calculate_haversine_distance(a: &LatLong, b: &LatLong, radius: Metres) -> Metres {
    let lat1 = Angle::from(a.lat());
    let lat2 = Angle::from(b.lat());
    let half_delta_lat = Angle::from(Degrees(0.5 * (b.lat().0 - a.lat().0)));
    let half_delta_long = Angle::from(Degrees(0.5 * (b.lon().0 - a.lon().0)));

    let sin_half_delta_lat = half_delta_lat.sin().0;
    let sin_half_delta_long = half_delta_long.sin().0;
    let h = sin_half_delta_lat * sin_half_delta_lat
        + lat1.cos().0 * lat2.cos().0 * sin_half_delta_long * sin_half_delta_long;
    Metres(2.0 * radius.0 * libm::asin(libm::sqrt(h)))
}
