//! Reference constants for the stock Kerbin system.
//!
//! Live missions read body parameters from telemetry; these values feed the
//! preview binary and the scenario tests.

/// A celestial body as seen by the planners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub name: &'static str,
    /// Standard gravitational parameter (`m^3/s^2`)
    pub mu: f64,
    /// Equatorial radius (`m`)
    pub radius: f64,
    /// Semi-major axis of the body's own orbit around its parent (`m`), 0 for the root
    pub sma: f64,
    /// Altitude where the atmosphere ends (`m`), 0 when airless
    pub atmosphere_height: f64,
}

impl Body {
    /// Circular orbit period at radius `r` around this body (s).
    pub fn circular_period(&self, r: f64) -> f64 {
        2.0 * std::f64::consts::PI * (r.powi(3) / self.mu).sqrt()
    }

    /// Circular orbit speed at radius `r` (m/s).
    pub fn circular_velocity(&self, r: f64) -> f64 {
        (self.mu / r).sqrt()
    }
}

pub const KERBIN: Body = Body {
    name: "Kerbin",
    mu: 3.531_6e12,
    radius: 600_000.0,
    sma: 13_599_840_256.0,
    atmosphere_height: 70_000.0,
};

pub const MUN: Body = Body {
    name: "Mun",
    mu: 6.513_842_4e10,
    radius: 200_000.0,
    sma: 12_000_000.0,
    atmosphere_height: 0.0,
};
