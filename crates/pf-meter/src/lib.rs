//! pf-meter: orifice-plate flow-meter calculations for plateflow.
//!
//! Provides:
//! - `PlateParameters`: the plate geometry / fluid property record
//! - Edge and tap selections as closed enums
//! - Discharge coefficient, tap location, and mass flow rate formulas
//! - Driving-pressure sweeps for curve plotting
//!
//! All operations are deterministic, short-lived arithmetic over a single
//! parameter record. Numeric hazards (zero pipe diameter, β saturated to 1,
//! zero Reynolds number, negative square-root arguments) surface as typed
//! `MeterError` values instead of silent NaN/Inf.
//!
//! # Example
//!
//! ```
//! use pf_core::units::{kg_m3, m, pa, pa_s};
//! use pf_meter::{EdgeType, PlateParameters, TapType};
//!
//! let plate = PlateParameters::new(
//!     m(0.1),
//!     m(0.05),
//!     pa(5_000.0),
//!     kg_m3(1_000.0),
//!     pa_s(0.001),
//!     100_000.0,
//!     EdgeType::Sharp,
//!     TapType::Corner,
//! );
//!
//! let q = plate.flow_rate(pa(5_000.0)).unwrap();
//! println!("Flow rate: {} kg/s", q.value);
//! ```

pub mod error;
pub mod plate;
pub mod sweeps;

// Re-exports for ergonomics
pub use error::{MeterError, MeterResult};
pub use plate::{EdgeType, PlateParameters, TapLocations, TapType};
pub use sweeps::{sweep_flow_curve, FlowCurve, PressureSweep, DEFAULT_SWEEP_POINTS};
