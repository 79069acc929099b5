// End-to-end backstripping of the sample column and of hand-built columns

use approx::assert_abs_diff_eq;
use backstrip_rust::assert_deviation;
use backstrip_rust::column_input::ColumnInput;
use backstrip_rust::horizons::horizon_depths;
use backstrip_rust::rock::RockProperties;
use backstrip_rust::{
    BackstripError, BurialSequence, DepositionEvent, Layer, PhysicalConstants, PorosityModel,
    SolverSettings, SubsidenceSolver, compute_subsidence,
};
use more_asserts::{assert_gt, assert_le, assert_lt};

const SAMPLE_SUBSIDENCE_PRESENT_FIRST: [f64; 10] = [
    2407.2466412565454,
    2336.875603450984,
    2329.015431323133,
    2079.7151641407104,
    1377.547254248802,
    676.1781772319971,
    714.8788720239381,
    568.4680992406345,
    322.10999256691275,
    191.85843288457176,
];

#[test]
fn sample_column_shape() {
    let input = ColumnInput::sample();
    let sequence = input.prepare_sequence().unwrap();
    let result = compute_subsidence(&sequence, &input.constants).unwrap();

    assert_eq!(result.len(), 10);
    assert_eq!(result.thickness_evolution.len(), 10);
    assert_eq!(result.thickness_evolution[0].len(), 10);
    assert_eq!(result.thickness_evolution[9].len(), 1);
    for (i, column) in result.thickness_evolution.iter().enumerate() {
        assert_eq!(column.len(), 10 - i);
    }
    assert_eq!(result.ages, vec![0.0, 45.0, 55.0, 80.0, 100.0, 125.0, 145.0, 160.0, 210.0, 245.0]);
}

#[test]
fn sample_column_subsidence_values() {
    let input = ColumnInput::sample();
    let sequence = input.prepare_sequence().unwrap();
    let result = compute_subsidence(&sequence, &input.constants).unwrap();

    for (actual, expected) in result.subsidence.iter().zip(SAMPLE_SUBSIDENCE_PRESENT_FIRST) {
        assert_abs_diff_eq!(*actual, expected, epsilon = 1e-3);
    }
    assert_abs_diff_eq!(result.present().unwrap(), 2407.2466, epsilon = 1e-3);
    assert_abs_diff_eq!(result.oldest().unwrap(), 191.8584, epsilon = 1e-3);
}

#[test]
fn present_column_matches_measured_thicknesses() {
    let input = ColumnInput::sample();
    let sequence = input.prepare_sequence().unwrap();
    let result = compute_subsidence(&sequence, &input.constants).unwrap();

    // shallowest (youngest) first
    let measured: Vec<f64> = input.thicknesses.iter().rev().copied().collect();
    for (actual, expected) in result.thickness_evolution[0].iter().zip(&measured) {
        assert_abs_diff_eq!(*actual, *expected, epsilon = 1e-3);
    }

    // the oldest layer alone at the surface has lost its overburden
    let oldest_alone = result.thickness_evolution[9][0];
    assert_deviation!(oldest_alone, 479.8489663941256, 0.001);
    assert_gt!(oldest_alone, 400.0);
}

#[test]
fn stripping_never_thins_a_layer() {
    let input = ColumnInput::sample();
    let sequence = input.prepare_sequence().unwrap();
    let result = compute_subsidence(&sequence, &input.constants).unwrap();

    // the same layer sits at the end of every column that contains it; it
    // only gets shallower as younger layers are removed
    for i in 1..result.len() {
        let older_view = result.thickness_evolution[i].last().unwrap();
        let newer_view = result.thickness_evolution[i - 1].last().unwrap();
        assert_le!(*newer_view, *older_view + 1e-6);
    }
}

#[test]
fn debug_trace_does_not_change_results() {
    let input = ColumnInput::sample();
    let sequence = input.prepare_sequence().unwrap();
    let quiet = compute_subsidence(&sequence, &input.constants).unwrap();
    let traced = SubsidenceSolver::with_settings(SolverSettings {
        debug: true,
        ..SolverSettings::default()
    })
    .compute_subsidence(&sequence)
    .unwrap();
    assert_eq!(quiet, traced);
}

#[test]
fn single_event_basin() {
    let rock = RockProperties::new(0.5, 0.001, 2700.0).unwrap();
    let events = vec![DepositionEvent::new(10.0, 0.0, 0.0, Layer::new(100.0, rock).unwrap())];
    let mut sequence = BurialSequence::new(20.0, 0.0, 0.0, events).unwrap();
    sequence.reconstruct_burial_history().unwrap();

    let layer = &sequence.events()[0].layer;
    assert_eq!(layer.maximum_burial().unwrap(), 0.0);
    assert_abs_diff_eq!(layer.thickness_at_depth(0.0).unwrap(), 100.0, epsilon = 1e-6);

    let c = PhysicalConstants::default();
    let result = compute_subsidence(&sequence, &c).unwrap();
    assert_eq!(result.len(), 1);
    let grain = layer.decompacted_thickness().unwrap();
    let deflection = 1700.0 * grain / 2300.0;
    assert_abs_diff_eq!(result.subsidence[0], 100.0 - deflection, epsilon = 1e-4);
}

#[derive(Clone)]
struct Sealed;

impl PorosityModel for Sealed {
    fn porosity(&self, _rock: &RockProperties, _depth: f64) -> f64 {
        0.0
    }
}

#[test]
fn custom_porosity_model_plugs_in() {
    let input = ColumnInput::sample();
    let sequence = input.prepare_sequence_with(Sealed).unwrap();
    let result = compute_subsidence(&sequence, &input.constants).unwrap();

    let measured: Vec<f64> = input.thicknesses.iter().rev().copied().collect();
    for (i, column) in result.thickness_evolution.iter().enumerate() {
        assert_eq!(column.as_slice(), &measured[i..]);
    }

    // sealed rock keeps the column thin, so less room for subsidence
    let athy = compute_subsidence(&input.prepare_sequence().unwrap(), &input.constants).unwrap();
    assert_lt!(result.oldest().unwrap(), athy.oldest().unwrap());
}

#[test]
fn newton_cap_aborts_whole_column() {
    let input = ColumnInput::sample();
    let sequence = input.prepare_sequence().unwrap();
    let mut settings = SolverSettings::default();
    settings.newton.max_iterations = 1;
    let outcome = SubsidenceSolver::with_settings(settings).compute_subsidence(&sequence);
    assert!(matches!(outcome, Err(BackstripError::NonConvergence { .. })));
}

#[test]
fn horizons_follow_result() {
    let input = ColumnInput::sample();
    let sequence = input.prepare_sequence().unwrap();
    let result = compute_subsidence(&sequence, &input.constants).unwrap();
    let slices = horizon_depths(&input, &result).unwrap();

    assert_eq!(slices.len(), 10);
    assert_eq!(slices[0].age, 245.0);
    assert_eq!(slices[0].depths.len(), 2);
    assert_eq!(slices[9].age, 0.0);
    assert_eq!(slices[9].depths.len(), 11);
    // present sea floor: 300 m of water over a -20 m basement datum, 10 m eustatic fall
    assert_abs_diff_eq!(
        slices[9].sea_floor().unwrap(),
        300.0 - (-20.0) - (0.0 - 10.0),
        epsilon = 1e-12
    );
    for slice in &slices {
        for pair in slice.depths.windows(2) {
            assert_lt!(pair[0], pair[1]);
        }
    }
}

#[test]
fn json_column_round_trip_through_solver() {
    let json_str = serde_json::to_string(&ColumnInput::sample()).unwrap();
    let input = ColumnInput::from_json_str(&json_str).unwrap();
    let result = compute_subsidence(&input.prepare_sequence().unwrap(), &input.constants).unwrap();
    assert_abs_diff_eq!(
        result.present().unwrap(),
        SAMPLE_SUBSIDENCE_PRESENT_FIRST[0],
        epsilon = 1e-3
    );
}
