//! Orifice-plate parameter record and flow-meter formulas.
//!
//! The discharge-coefficient correlation is the standard flange/corner-tap
//! form `Cd = 0.5959 + 0.0312·β^2.1 − 0.1840·β^8 + …` with tap-location and
//! edge-profile correction terms. Tap locations are a pure function of the
//! tap selection and pipe diameter; the coefficient re-derives them on every
//! call, so a stale location can never leak into a computation.

use crate::error::{MeterError, MeterResult};
use pf_core::units::{kgps, m, m2, Area, Density, DynVisc, Length, MassRate, Pressure};
use std::fmt;

/// Orifice edge profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeType {
    /// Square sharp edge (no correction term).
    Sharp,
    /// Rounded edge.
    Round,
    /// V-shaped (bevelled) edge.
    VShaped,
}

impl EdgeType {
    pub const ALL: [EdgeType; 3] = [EdgeType::Sharp, EdgeType::Round, EdgeType::VShaped];

    pub fn label(self) -> &'static str {
        match self {
            Self::Sharp => "Sharp edge",
            Self::Round => "Round edge",
            Self::VShaped => "V-shaped edge",
        }
    }

    /// Parse a presentation-layer label (combo box entry or CLI argument).
    ///
    /// Closed enums make an unrecognized variant unrepresentable in the core,
    /// so this boundary is the only place the unsupported-edge failure can
    /// still occur.
    pub fn from_label(label: &str) -> MeterResult<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "sharp" | "sharp edge" => Ok(Self::Sharp),
            "round" | "round edge" => Ok(Self::Round),
            "v" | "v-shaped" | "v-shaped edge" => Ok(Self::VShaped),
            _ => Err(MeterError::UnsupportedEdgeType {
                label: label.to_string(),
            }),
        }
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Pressure-tap arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapType {
    /// Taps one inch (0.0254 m) either side of the plate.
    Center,
    /// Taps immediately at the plate faces.
    Corner,
    /// Pipe taps at 2.5·D upstream and 8·D downstream.
    Pipe,
    /// Radius taps at D upstream and D/2 downstream.
    Radial,
}

impl TapType {
    pub const ALL: [TapType; 4] = [
        TapType::Center,
        TapType::Corner,
        TapType::Pipe,
        TapType::Radial,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Center => "Center tap",
            Self::Corner => "Corner tap",
            Self::Pipe => "Pipe tap",
            Self::Radial => "Radial tap",
        }
    }

    /// Parse a presentation-layer label. See [`EdgeType::from_label`].
    pub fn from_label(label: &str) -> MeterResult<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "center" | "center tap" => Ok(Self::Center),
            "corner" | "corner tap" => Ok(Self::Corner),
            "pipe" | "pipe tap" => Ok(Self::Pipe),
            "radial" | "radial tap" => Ok(Self::Radial),
            _ => Err(MeterError::UnsupportedTapType {
                label: label.to_string(),
            }),
        }
    }
}

impl fmt::Display for TapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Pressure-measurement point locations relative to the plate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapLocations {
    pub upstream: Length,
    pub downstream: Length,
}

/// Orifice-plate geometry and fluid properties for one computation.
///
/// Constructed fresh per update action, used for one or more flow-rate
/// calls across a pressure sweep, then dropped. Physically-invalid inputs
/// (orifice wider than the pipe, negative density) are accepted here and
/// surface, where they surface at all, as typed computation errors.
#[derive(Debug, Clone)]
pub struct PlateParameters {
    pub pipe_diameter: Length,
    pub orifice_diameter: Length,
    /// Default driving pressure; sweeps use it as the reference span center.
    pub differential_pressure: Pressure,
    pub fluid_density: Density,
    /// Accepted but unused by any current formula; a future Reynolds-number
    /// derivation would consume it.
    pub fluid_viscosity: DynVisc,
    pub reynolds_number: f64,
    pub edge_type: EdgeType,
    pub tap_type: TapType,
}

impl PlateParameters {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pipe_diameter: Length,
        orifice_diameter: Length,
        differential_pressure: Pressure,
        fluid_density: Density,
        fluid_viscosity: DynVisc,
        reynolds_number: f64,
        edge_type: EdgeType,
        tap_type: TapType,
    ) -> Self {
        Self {
            pipe_diameter,
            orifice_diameter,
            differential_pressure,
            fluid_density,
            fluid_viscosity,
            reynolds_number,
            edge_type,
            tap_type,
        }
    }

    /// Bore area, π·(d/2)².
    pub fn orifice_area(&self) -> Area {
        let r = self.orifice_diameter.value / 2.0;
        m2(std::f64::consts::PI * r * r)
    }

    /// Diameter ratio β = d/D.
    ///
    /// Ratios above 1 are physically invalid but not rejected here; only an
    /// exactly-zero pipe diameter fails.
    pub fn diameter_ratio(&self) -> MeterResult<f64> {
        let d_pipe = self.pipe_diameter.value;
        if d_pipe == 0.0 {
            return Err(MeterError::DivisionByZero {
                what: "orifice_diameter / pipe_diameter",
            });
        }
        Ok(self.orifice_diameter.value / d_pipe)
    }

    /// Tap locations for the current tap selection. Fully determined by
    /// `tap_type` and `pipe_diameter`; never caller-set.
    pub fn tap_locations(&self) -> TapLocations {
        let d_pipe = self.pipe_diameter;
        match self.tap_type {
            TapType::Center => TapLocations {
                upstream: m(0.0254),
                downstream: m(0.0254),
            },
            TapType::Corner => TapLocations {
                upstream: m(0.0),
                downstream: m(0.0),
            },
            TapType::Pipe => TapLocations {
                upstream: d_pipe * 2.5,
                downstream: d_pipe * 8.0,
            },
            TapType::Radial => TapLocations {
                upstream: d_pipe,
                downstream: d_pipe / 2.0,
            },
        }
    }

    /// Discharge coefficient Cd for the current geometry and flow regime.
    ///
    /// Re-derives tap locations from the current selection as its first
    /// step. Fails explicitly where the correlation would otherwise produce
    /// NaN/Inf: zero pipe diameter, β = 1 (the `1 − β⁴` and `1 − β`
    /// denominators), and Re = 0 (the `10⁶/Re` term).
    pub fn discharge_coefficient(&self) -> MeterResult<f64> {
        let taps = self.tap_locations();
        let beta = self.diameter_ratio()?;

        // diameter_ratio already rejected a zero pipe diameter
        let d_pipe = self.pipe_diameter.value;
        let l1 = taps.upstream.value / d_pipe;
        let l2 = taps.downstream.value / d_pipe;

        if self.reynolds_number == 0.0 {
            return Err(MeterError::DivisionByZero {
                what: "10^6 / Re term",
            });
        }

        let beta4 = beta.powi(4);
        if beta4 == 1.0 {
            return Err(MeterError::DivisionByZero {
                what: "1 - beta^4 term",
            });
        }

        let cd_base = 0.5959 + 0.0312 * beta.powf(2.1) - 0.1840 * beta.powi(8)
            + 0.0029 * beta.powf(2.5) * (1.0e6 / self.reynolds_number).powf(0.75)
            + 0.0900 * l1 * (beta4 / (1.0 - beta4))
            - 0.0337 * l2 * beta.powi(3);

        let cd = match self.edge_type {
            EdgeType::Sharp => cd_base,
            EdgeType::Round => cd_base + 0.0005 * (1.5 * beta / (1.0 - beta)).powi(2),
            EdgeType::VShaped => cd_base + 0.0005 * (2.5 * beta / (1.0 - beta)).powi(2),
        };

        check_finite(cd, "discharge coefficient")
    }

    /// Mass flow rate Cd·√(2·Δp·ρ)·A for an explicit driving pressure.
    ///
    /// The driving pressure is an argument rather than the stored
    /// differential pressure so a sweep can vary it per sample; the stored
    /// value is only the caller's default.
    pub fn flow_rate(&self, driving_pressure: Pressure) -> MeterResult<MassRate> {
        let cd = self.discharge_coefficient()?;

        let radicand = 2.0 * driving_pressure.value * self.fluid_density.value;
        if radicand < 0.0 {
            return Err(MeterError::NegativeRadicand {
                what: "2 * dp * rho",
                value: radicand,
            });
        }

        let q = cd * radicand.sqrt() * self.orifice_area().value;
        check_finite(q, "flow rate")?;

        Ok(kgps(q))
    }
}

fn check_finite(v: f64, what: &'static str) -> MeterResult<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(MeterError::NonFinite { what, value: v })
    }
}
