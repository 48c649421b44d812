//! Conversion of physical initial conditions (km, km/s, kg) into screen
//! space.
//!
//! The data extent is fitted to a bit under half the screen height, masses
//! are divided by the heaviest/lightest ratio and the largest radius is
//! drawn at a tenth of the screen height. The gravitational constant is
//! rescaled to match.

use crate::body::Body;
use crate::error::{Error, Result};
use serde::Deserialize;
use ultraviolet::Vec2;

/// Newton's constant as used by the unit conversion.
pub const GRAVITATIONAL_CONSTANT: f64 = 6.674e-17;

/// Fraction of the screen height spanned by the data extent is `1 / EXTENT_MARGIN`.
const EXTENT_MARGIN: f64 = 2.1;

/// Largest body radius in pixels is `height / RADIUS_FRACTION`.
const RADIUS_FRACTION: f64 = 10.0;

/// Target screen size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct Screen {
    pub width: u32,
    pub height: u32,
}

impl Default for Screen {
    fn default() -> Self {
        Self {
            width: 1500,
            height: 900,
        }
    }
}

impl Screen {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid(format!(
                "screen must be non-empty, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) * 0.5
    }
}

/// One row of physical initial conditions.
///
/// Deserialized from the flat row `[x, y, radius, vx, vy, mass]`.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(from = "[f64; 6]")]
pub struct InitialCondition {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub vx: f64,
    pub vy: f64,
    pub mass: f64,
}

impl From<[f64; 6]> for InitialCondition {
    fn from([x, y, radius, vx, vy, mass]: [f64; 6]) -> Self {
        Self {
            x,
            y,
            radius,
            vx,
            vy,
            mass,
        }
    }
}

impl From<InitialCondition> for [f64; 6] {
    fn from(c: InitialCondition) -> Self {
        [c.x, c.y, c.radius, c.vx, c.vy, c.mass]
    }
}

impl InitialCondition {
    fn validate(&self, index: usize) -> Result<()> {
        let row: [f64; 6] = (*self).into();
        if row.iter().any(|v| !v.is_finite()) {
            return Err(Error::invalid(format!("row {index} has non-finite values")));
        }
        if self.radius <= 0.0 || self.mass <= 0.0 {
            return Err(Error::invalid(format!(
                "row {index} needs positive radius and mass, got r={} m={}",
                self.radius, self.mass
            )));
        }
        Ok(())
    }
}

/// Scale factors derived from a data set and a screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitScale {
    /// Kilometres per pixel.
    pub pixel_to_km: f64,
    /// Divisor applied to every mass.
    pub mass_scale: f64,
    /// Divisor applied to every radius.
    pub radius_scale: f64,
}

impl UnitScale {
    pub fn from_data(rows: &[InitialCondition], screen: Screen) -> Result<Self> {
        if rows.is_empty() {
            return Err(Error::invalid("initial conditions are empty"));
        }
        for (i, row) in rows.iter().enumerate() {
            row.validate(i)?;
        }

        let span = |f: fn(&InitialCondition) -> f64| {
            let (lo, hi) = rows
                .iter()
                .map(f)
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                    (lo.min(v), hi.max(v))
                });
            (lo, hi)
        };

        let (x_lo, x_hi) = span(|r| r.x);
        let (y_lo, y_hi) = span(|r| r.y);
        let longest_axis = (x_hi - x_lo).max(y_hi - y_lo);
        if longest_axis <= 0.0 {
            return Err(Error::invalid(
                "initial conditions need a non-zero spatial extent",
            ));
        }

        let height = f64::from(screen.height);
        let (m_lo, m_hi) = span(|r| r.mass);
        let (_, r_hi) = span(|r| r.radius);

        Ok(Self {
            pixel_to_km: EXTENT_MARGIN * longest_axis / height,
            mass_scale: m_hi / m_lo,
            radius_scale: r_hi / height * RADIUS_FRACTION,
        })
    }

    /// `G` expressed in the scaled unit system.
    pub fn gravitational_constant(&self) -> f64 {
        GRAVITATIONAL_CONSTANT * self.pixel_to_km / self.mass_scale
    }
}

/// Bodies in screen space plus the matching gravitational constant.
#[derive(Clone, Debug)]
pub struct Normalized {
    pub bodies: Vec<Body>,
    pub g: f32,
    pub scale: UnitScale,
}

/// Rescales `rows` into screen space, centering the origin on the screen.
///
/// With two or more rows the second body is put on a circular orbit around
/// the first: its tangential speed becomes `sqrt(G * m0 / d)` while the radial
/// part of its supplied velocity is kept.
pub fn normalize(rows: &[InitialCondition], screen: Screen) -> Result<Normalized> {
    let scale = UnitScale::from_data(rows, screen)?;
    let g = scale.gravitational_constant();
    let center = (f64::from(screen.width) / 2.0, f64::from(screen.height) / 2.0);

    let mut scaled: Vec<InitialCondition> = rows
        .iter()
        .map(|r| InitialCondition {
            x: r.x / scale.pixel_to_km + center.0,
            y: r.y / scale.pixel_to_km + center.1,
            radius: r.radius / scale.radius_scale,
            vx: r.vx / scale.pixel_to_km,
            vy: r.vy / scale.pixel_to_km,
            mass: r.mass / scale.mass_scale,
        })
        .collect();

    if let [primary, secondary, ..] = scaled.as_mut_slice() {
        circularize(primary, secondary, g)?;
    }

    let bodies = scaled
        .iter()
        .map(|r| {
            Body::with_mass(
                Vec2::new(r.x as f32, r.y as f32),
                Vec2::new(r.vx as f32, r.vy as f32),
                r.radius as f32,
                r.mass as f32,
            )
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::info!(
        bodies = bodies.len(),
        pixel_to_km = scale.pixel_to_km,
        mass_scale = scale.mass_scale,
        g,
        "normalized initial conditions"
    );

    Ok(Normalized {
        bodies,
        g: g as f32,
        scale,
    })
}

fn circularize(
    primary: &InitialCondition,
    secondary: &mut InitialCondition,
    g: f64,
) -> Result<()> {
    let (dx, dy) = (secondary.x - primary.x, secondary.y - primary.y);
    let d = dx.hypot(dy);
    if d <= 0.0 {
        return Err(Error::invalid(
            "secondary body coincides with the primary",
        ));
    }
    let (nx, ny) = (dx / d, dy / d);
    let (tx, ty) = (-ny, nx);
    let radial = secondary.vx * nx + secondary.vy * ny;
    let speed = (g * primary.mass / d).sqrt();

    secondary.vx = radial * nx + speed * tx;
    secondary.vy = radial * ny + speed * ty;
    Ok(())
}
