//! Apparent geocentric ecliptic longitude of the Moon.
//!
//! Periodic terms from Meeus, *Astronomical Algorithms* (2nd ed.),
//! Chapter 47, Table 47.A (longitude column). Arguments D, M, M', F come
//! from the Delaunay polynomials in [`crate::fundamentals`]. Accuracy is
//! ~10″ in longitude, far finer than a daily phase bucket needs.

use crate::fundamentals::{delaunay, moon_mean_longitude_deg, normalize_360, nutation_longitude_deg};

/// Table 47.A longitude terms: `[nD, nM, nM', nF, Σl]`, Σl in 1e-6 deg.
///
/// Terms with `|nM| = 1` are scaled by E, `|nM| = 2` by E², to account
/// for the decreasing eccentricity of Earth's orbit.
#[rustfmt::skip]
static LONGITUDE_TERMS: [[i32; 5]; 59] = [
    //  D   M   M'   F       Σl
    [   0,  0,  1,  0, 6_288_774],
    [   2,  0, -1,  0, 1_274_027],
    [   2,  0,  0,  0,   658_314],
    [   0,  0,  2,  0,   213_618],
    [   0,  1,  0,  0,  -185_116],
    [   0,  0,  0,  2,  -114_332],
    [   2,  0, -2,  0,    58_793],
    [   2, -1, -1,  0,    57_066],
    [   2,  0,  1,  0,    53_322],
    [   2, -1,  0,  0,    45_758],
    [   0,  1, -1,  0,   -40_923],
    [   1,  0,  0,  0,   -34_720],
    [   0,  1,  1,  0,   -30_383],
    [   2,  0,  0, -2,    15_327],
    [   0,  0,  1,  2,   -12_528],
    [   0,  0,  1, -2,    10_980],
    [   4,  0, -1,  0,    10_675],
    [   0,  0,  3,  0,    10_034],
    [   4,  0, -2,  0,     8_548],
    [   2,  1, -1,  0,    -7_888],
    [   2,  1,  0,  0,    -6_766],
    [   1,  0, -1,  0,    -5_163],
    [   1,  1,  0,  0,     4_987],
    [   2, -1,  1,  0,     4_036],
    [   2,  0,  2,  0,     3_994],
    [   4,  0,  0,  0,     3_861],
    [   2,  0, -3,  0,     3_665],
    [   0,  1, -2,  0,    -2_689],
    [   2,  0, -1,  2,    -2_602],
    [   2, -1, -2,  0,     2_390],
    [   1,  0,  1,  0,    -2_348],
    [   2, -2,  0,  0,     2_236],
    [   0,  1,  2,  0,    -2_120],
    [   0,  2,  0,  0,    -2_069],
    [   2, -2, -1,  0,     2_048],
    [   2,  0,  1, -2,    -1_773],
    [   2,  0,  0,  2,    -1_595],
    [   4, -1, -1,  0,     1_215],
    [   0,  0,  2,  2,    -1_110],
    [   3,  0, -1,  0,      -892],
    [   2,  1,  1,  0,      -810],
    [   4, -1, -2,  0,       759],
    [   0,  2, -1,  0,      -713],
    [   2,  2, -1,  0,      -700],
    [   2,  1, -2,  0,       691],
    [   2, -1,  0, -2,       596],
    [   4,  0,  1,  0,       549],
    [   0,  0,  4,  0,       537],
    [   4, -1,  0,  0,       520],
    [   1,  0, -2,  0,      -487],
    [   2,  1,  0, -2,      -399],
    [   0,  0,  2, -2,      -381],
    [   1,  1,  1,  0,       351],
    [   3,  0, -2,  0,      -340],
    [   4,  0, -3,  0,       330],
    [   2, -1,  2,  0,       327],
    [   0,  2,  1,  0,      -323],
    [   1,  1, -1,  0,       299],
    [   2,  0,  3,  0,       294],
];

/// Sum of the periodic longitude terms, degrees.
fn periodic_longitude_deg(t: f64) -> f64 {
    let args = delaunay(t);
    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t * t;

    let mut sum = 0.0_f64;
    for row in &LONGITUDE_TERMS {
        let arg = row[0] as f64 * args.d
            + row[1] as f64 * args.lp
            + row[2] as f64 * args.l
            + row[3] as f64 * args.f;
        let scale = match row[1].abs() {
            1 => e,
            2 => e * e,
            _ => 1.0,
        };
        sum += row[4] as f64 * scale * arg.sin();
    }

    // Venus, Jupiter, and flattening corrections (Meeus A1, A2, L' - F).
    let a1 = (119.75 + 131.849 * t).to_radians();
    let a2 = (53.09 + 479_264.290 * t).to_radians();
    let lp = moon_mean_longitude_deg(t).to_radians();
    sum += 3958.0 * a1.sin() + 1962.0 * (lp - args.f).sin() + 318.0 * a2.sin();

    sum * 1e-6
}

/// True longitude of the Moon, mean equinox of date, degrees [0, 360).
pub fn moon_true_longitude_deg(t: f64) -> f64 {
    normalize_360(moon_mean_longitude_deg(t) + periodic_longitude_deg(t))
}

/// Apparent longitude of the Moon, true equinox of date, degrees [0, 360).
///
/// `t` = Julian centuries since J2000.0.
pub fn moon_apparent_longitude_deg(t: f64) -> f64 {
    normalize_360(moon_true_longitude_deg(t) + nutation_longitude_deg(t))
}
