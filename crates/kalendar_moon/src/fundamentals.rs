//! Fundamental lunar/solar arguments and nutation in longitude.
//!
//! Delaunay arguments from IERS Conventions 2010, Table 5.2e. The Moon's
//! mean longitude and the short nutation series follow Meeus,
//! *Astronomical Algorithms* (2nd ed.), Chapters 22 and 47.

use std::f64::consts::TAU;

/// Arcseconds to radians conversion factor.
const AS2RAD: f64 = TAU / 1_296_000.0;

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg % 360.0;
    if r < 0.0 { r + 360.0 } else { r }
}

/// Normalize an angle to (-180, +180] degrees.
pub fn normalize_pm180(deg: f64) -> f64 {
    let mut d = deg % 360.0;
    if d > 180.0 {
        d -= 360.0;
    } else if d <= -180.0 {
        d += 360.0;
    }
    d
}

/// The five Delaunay arguments in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Delaunay {
    /// Mean anomaly of the Moon.
    pub l: f64,
    /// Mean anomaly of the Sun.
    pub lp: f64,
    /// Mean argument of latitude of the Moon.
    pub f: f64,
    /// Mean elongation of the Moon from the Sun.
    pub d: f64,
    /// Mean longitude of the Moon's ascending node.
    pub om: f64,
}

/// Compute the Delaunay arguments.
///
/// `t` = Julian centuries since J2000.0.
pub fn delaunay(t: f64) -> Delaunay {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let l = (485868.249036 + 1717915923.2178 * t + 31.8792 * t2 + 0.051635 * t3 - 0.00024470 * t4)
        * AS2RAD;
    let lp = (1287104.79305 + 129596581.0481 * t - 0.5532 * t2 + 0.000136 * t3 - 0.00001149 * t4)
        * AS2RAD;
    let f = (335779.526232 + 1739527262.8478 * t - 12.7512 * t2 - 0.001037 * t3 + 0.00000417 * t4)
        * AS2RAD;
    let d = (1072260.70369 + 1602961601.2090 * t - 6.3706 * t2 + 0.006593 * t3 - 0.00003169 * t4)
        * AS2RAD;
    let om =
        (450160.398036 - 6962890.5431 * t + 7.4722 * t2 + 0.007702 * t3 - 0.00005939 * t4) * AS2RAD;

    Delaunay { l, lp, f, d, om }
}

/// Mean longitude of the Moon, degrees [0, 360). Meeus eq. 47.1.
pub fn moon_mean_longitude_deg(t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    normalize_360(
        218.3164477 + 481267.88123421 * t - 0.0015786 * t2 + t3 / 538_841.0 - t4 / 65_194_000.0,
    )
}

/// Geometric mean longitude of the Sun, degrees [0, 360). Meeus eq. 25.2.
pub fn sun_mean_longitude_deg(t: f64) -> f64 {
    normalize_360(280.46646 + 36000.76983 * t + 0.0003032 * t * t)
}

/// Nutation in longitude Δψ in degrees.
///
/// Four-term series from Meeus Ch. 22, good to ~0.5″.
pub fn nutation_longitude_deg(t: f64) -> f64 {
    let om = (125.04452 - 1934.136261 * t).to_radians();
    let l_sun = (280.4665 + 36000.7698 * t).to_radians();
    let l_moon = (218.3165 + 481267.8813 * t).to_radians();
    let arcsec = -17.20 * om.sin() - 1.32 * (2.0 * l_sun).sin() - 0.23 * (2.0 * l_moon).sin()
        + 0.21 * (2.0 * om).sin();
    arcsec / 3600.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_wraps_negative() {
        assert!((normalize_360(-10.0) - 350.0).abs() < 1e-12);
        assert!((normalize_360(730.0) - 10.0).abs() < 1e-10);
    }

    #[test]
    fn pm180_range() {
        assert!((normalize_pm180(350.0) + 10.0).abs() < 1e-12);
        assert!((normalize_pm180(-190.0) - 170.0).abs() < 1e-12);
        assert!((normalize_pm180(180.0) - 180.0).abs() < 1e-12);
    }

    #[test]
    fn node_at_j2000_near_125() {
        let args = delaunay(0.0);
        let om = normalize_360(args.om.to_degrees());
        assert!((om - 125.04).abs() < 0.01, "Ω = {om}");
    }

    #[test]
    fn elongation_at_j2000_near_297() {
        let args = delaunay(0.0);
        let d = normalize_360(args.d.to_degrees());
        assert!((d - 297.85).abs() < 0.01, "D = {d}");
    }

    #[test]
    fn meeus_47a_mean_longitude() {
        // 1992 April 12, 0h TD: T = -0.077221081451
        let lp = moon_mean_longitude_deg(-0.077221081451);
        assert!((lp - 134.290182).abs() < 1e-4, "L' = {lp}");
    }

    #[test]
    fn nutation_amplitude_bounded() {
        for i in 0..40 {
            let t = -0.2 + i as f64 * 0.01;
            assert!(nutation_longitude_deg(t).abs() < 20.0 / 3600.0);
        }
    }

    #[test]
    fn meeus_22a_nutation() {
        // 1987 April 10, 0h TD: Δψ = -3.788″
        let t = -0.127296372348;
        let dpsi = nutation_longitude_deg(t) * 3600.0;
        assert!((dpsi + 3.788).abs() < 0.5, "Δψ = {dpsi}″");
    }
}
