//! End-to-end scenarios for the orifice-plate calculator.
//!
//! Reference values were hand-computed from the correlation with
//! β = 0.5, Re = 1e5, ρ = 1000 kg/m³.

use pf_core::numeric::strictly_increasing;
use pf_core::units::{kg_m3, m, pa, pa_s};
use pf_meter::{
    sweep_flow_curve, EdgeType, PlateParameters, PressureSweep, TapType,
};
use proptest::prelude::*;

fn water_plate(edge: EdgeType, tap: TapType) -> PlateParameters {
    PlateParameters::new(
        m(0.1),
        m(0.05),
        pa(5_000.0),
        kg_m3(1_000.0),
        pa_s(0.001),
        100_000.0,
        edge,
        tap,
    )
}

fn assert_close(actual: f64, expected: f64, rel_tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * expected.abs(),
        "expected {expected}, got {actual} (diff {diff})"
    );
}

#[test]
fn scenario_sharp_corner_water() {
    let plate = water_plate(EdgeType::Sharp, TapType::Corner);

    assert_eq!(plate.diameter_ratio().unwrap(), 0.5);

    let taps = plate.tap_locations();
    assert_eq!(taps.upstream.value, 0.0);
    assert_eq!(taps.downstream.value, 0.0);

    // Base term only: 0.5959 + 0.0312·0.5^2.1 − 0.1840·0.5^8 + 0.0029·0.5^2.5·10^0.75
    let cd = plate.discharge_coefficient().unwrap();
    assert_close(cd, 0.6053417637257676, 1e-9);

    // q = Cd · sqrt(2·5000·1000) · π·0.025²
    let q = plate.flow_rate(pa(5_000.0)).unwrap();
    assert_close(q.value, 3.758638239191455, 1e-6);
}

#[test]
fn scenario_pipe_taps_shift_coefficient() {
    let corner = water_plate(EdgeType::Sharp, TapType::Corner);
    let piped = water_plate(EdgeType::Sharp, TapType::Pipe);

    let taps = piped.tap_locations();
    assert_eq!(taps.upstream.value, 0.25);
    assert_eq!(taps.downstream.value, 0.8);

    // With L1 = 2.5 and L2 = 8 the added terms are
    // 0.0900·2.5·(β⁴/(1−β⁴)) − 0.0337·8·β³ = 0.015 − 0.0337 = −0.0187
    let delta =
        piped.discharge_coefficient().unwrap() - corner.discharge_coefficient().unwrap();
    assert!((delta - (-0.0187)).abs() < 1e-12);

    let q = piped.flow_rate(pa(5_000.0)).unwrap();
    assert_close(q.value, 3.642527738834963, 1e-6);
}

#[test]
fn scenario_round_edge_correction() {
    let sharp = water_plate(EdgeType::Sharp, TapType::Corner);
    let round = water_plate(EdgeType::Round, TapType::Corner);

    // Cd(Round) − Cd(Sharp) = 0.0005·(1.5·0.5/0.5)² = 0.001125
    let delta =
        round.discharge_coefficient().unwrap() - sharp.discharge_coefficient().unwrap();
    assert!((delta - 0.001125).abs() < 1e-12);
}

#[test]
fn sweep_flow_rates_increase_with_pressure() {
    // Cd is independent of the driving pressure, so q ∝ sqrt(dp).
    let mut plate = water_plate(EdgeType::Sharp, TapType::Corner);
    plate.differential_pressure = pa(8_000.0);

    let sweep = PressureSweep::around(plate.differential_pressure);
    assert_eq!(sweep.num_points, 50);
    assert_eq!(sweep.start_pa, 8.0);
    assert_eq!(sweep.end_pa, 80_000.0);

    let curve = sweep_flow_curve(&plate, &sweep);
    assert_eq!(curve.num_failed, 0);

    let rates = curve.successful_flow_rates();
    assert_eq!(rates.len(), 50);
    assert!(strictly_increasing(&rates));
}

proptest! {
    #[test]
    fn orifice_area_monotone_in_diameter(d in 0.0f64..10.0, step in 1e-3f64..1.0) {
        let mut small = water_plate(EdgeType::Sharp, TapType::Corner);
        let mut large = small.clone();
        small.orifice_diameter = m(d);
        large.orifice_diameter = m(d + step);
        prop_assert!(small.orifice_area().value < large.orifice_area().value);
    }

    #[test]
    fn tap_locations_pure_in_inputs(d in 1e-3f64..10.0, tap_idx in 0usize..4) {
        let mut plate = water_plate(EdgeType::Sharp, TapType::Corner);
        plate.pipe_diameter = m(d);
        plate.tap_type = TapType::ALL[tap_idx];
        // Repeated derivation with unchanged inputs yields identical locations.
        prop_assert_eq!(plate.tap_locations(), plate.tap_locations());
    }

    #[test]
    fn flow_rate_rejects_negative_pressure(dp in -1e6f64..-1.0) {
        let plate = water_plate(EdgeType::Sharp, TapType::Corner);
        prop_assert!(
            matches!(
                plate.flow_rate(pa(dp)),
                Err(pf_meter::MeterError::NegativeRadicand { .. })
            ),
            "expected NegativeRadicand error for dp = {}",
            dp
        );
    }
}
