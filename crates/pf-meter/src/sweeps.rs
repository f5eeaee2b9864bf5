//! Driving-pressure sweeps for flow-curve plotting.
//!
//! A sweep is a sequence of independent `flow_rate` calls; samples share no
//! state and each re-derives its own coefficient, so ordering never matters.
//! Failed samples stay in the result as gaps rather than aborting the curve.

use crate::error::MeterError;
use crate::plate::PlateParameters;
use pf_core::units::{pa, Pressure};
use std::fmt;

/// Sample count used by the reference curve.
pub const DEFAULT_SWEEP_POINTS: usize = 50;

/// Linear driving-pressure span, in Pa.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureSweep {
    pub start_pa: f64,
    pub end_pa: f64,
    pub num_points: usize,
}

impl PressureSweep {
    pub fn new(start_pa: f64, end_pa: f64, num_points: usize) -> Self {
        Self {
            start_pa,
            end_pa,
            num_points,
        }
    }

    /// Reference span around a differential pressure: Δp/1000 up to Δp·10,
    /// [`DEFAULT_SWEEP_POINTS`] samples.
    pub fn around(differential_pressure: Pressure) -> Self {
        let dp = differential_pressure.value;
        Self {
            start_pa: dp / 1000.0,
            end_pa: dp * 10.0,
            num_points: DEFAULT_SWEEP_POINTS,
        }
    }

    /// Generate all sample pressures, uniformly spaced with an exact endpoint.
    pub fn points(&self) -> Vec<f64> {
        if self.num_points <= 1 {
            return vec![self.start_pa];
        }

        let mut points = Vec::with_capacity(self.num_points);
        let delta = (self.end_pa - self.start_pa) / (self.num_points - 1) as f64;

        for i in 0..self.num_points {
            points.push(self.start_pa + i as f64 * delta);
        }

        // Ensure exact endpoint
        points[self.num_points - 1] = self.end_pa;
        points
    }
}

impl fmt::Display for PressureSweep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sweep {} Pa to {} Pa ({} points)",
            self.start_pa, self.end_pa, self.num_points
        )
    }
}

/// Result of a flow-curve sweep.
///
/// `flow_rates_kg_s` has one entry per sample pressure; `None` marks a
/// failed computation, left undrawn by the presentation layer.
#[derive(Debug, Clone)]
pub struct FlowCurve {
    pub pressures_pa: Vec<f64>,
    pub flow_rates_kg_s: Vec<Option<f64>>,
    pub num_successful: usize,
    pub num_failed: usize,
    /// The most recent failure, if any; lets a caller say why a curve is
    /// empty without inspecting every sample.
    pub last_error: Option<MeterError>,
}

impl FlowCurve {
    /// (driving_pressure, flow_rate) pairs for the successful samples.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.pressures_pa
            .iter()
            .zip(&self.flow_rates_kg_s)
            .filter_map(|(p, q)| q.map(|q| [*p, q]))
            .collect()
    }

    /// Flow rates of the successful samples, in sweep order.
    pub fn successful_flow_rates(&self) -> Vec<f64> {
        self.flow_rates_kg_s.iter().filter_map(|q| *q).collect()
    }
}

/// Execute a sweep: one independent `flow_rate` call per sample pressure.
pub fn sweep_flow_curve(params: &PlateParameters, sweep: &PressureSweep) -> FlowCurve {
    let pressures = sweep.points();
    let mut flow_rates = Vec::with_capacity(pressures.len());
    let mut num_successful = 0;
    let mut num_failed = 0;
    let mut last_error = None;

    for p in &pressures {
        match params.flow_rate(pa(*p)) {
            Ok(q) => {
                flow_rates.push(Some(q.value));
                num_successful += 1;
            }
            Err(err) => {
                flow_rates.push(None);
                num_failed += 1;
                last_error = Some(err);
            }
        }
    }

    FlowCurve {
        pressures_pa: pressures,
        flow_rates_kg_s: flow_rates,
        num_successful,
        num_failed,
        last_error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plate::{EdgeType, TapType};
    use pf_core::units::{kg_m3, m, pa_s};

    fn reference_plate() -> PlateParameters {
        PlateParameters::new(
            m(0.1),
            m(0.05),
            pa(8_000.0),
            kg_m3(1_000.0),
            pa_s(0.001),
            100_000.0,
            EdgeType::Sharp,
            TapType::Corner,
        )
    }

    #[test]
    fn linear_points_exact_endpoints() {
        let sweep = PressureSweep::new(8.0, 80_000.0, 50);
        let points = sweep.points();
        assert_eq!(points.len(), 50);
        assert_eq!(points[0], 8.0);
        assert_eq!(points[49], 80_000.0);
    }

    #[test]
    fn single_point_sweep() {
        let sweep = PressureSweep::new(100.0, 200.0, 1);
        assert_eq!(sweep.points(), vec![100.0]);
    }

    #[test]
    fn around_uses_reference_span() {
        let sweep = PressureSweep::around(pa(8_000.0));
        assert_eq!(sweep.start_pa, 8.0);
        assert_eq!(sweep.end_pa, 80_000.0);
        assert_eq!(sweep.num_points, DEFAULT_SWEEP_POINTS);
    }

    #[test]
    fn sweep_all_samples_succeed() {
        let plate = reference_plate();
        let curve = sweep_flow_curve(&plate, &PressureSweep::around(plate.differential_pressure));
        assert_eq!(curve.num_successful, 50);
        assert_eq!(curve.num_failed, 0);
        assert!(curve.last_error.is_none());
        assert_eq!(curve.points().len(), 50);
    }

    #[test]
    fn sweep_keeps_failed_samples_as_gaps() {
        let plate = reference_plate();
        // Span crossing zero: negative driving pressures fail, the rest draw.
        let sweep = PressureSweep::new(-1_000.0, 1_000.0, 5);
        let curve = sweep_flow_curve(&plate, &sweep);
        assert_eq!(curve.num_failed, 2);
        assert_eq!(curve.num_successful, 3);
        assert!(matches!(
            curve.last_error,
            Some(MeterError::NegativeRadicand { .. })
        ));
        assert_eq!(curve.points().len(), 3);
    }
}
