use approx::assert_relative_eq;
use tmst_phase::prelude::*;

const TOL: f64 = 1e-9;

#[test]
fn scenario_unit_temperature() {
    let n = bose_einstein(1.0, 1.0);
    assert_relative_eq!(n, 1.0 / (std::f64::consts::E - 1.0), epsilon = 1e-12);
    assert_relative_eq!(n, 0.58198, epsilon = 1e-5);
    let r_c = 0.5 * (2.0 * n + 1.0).ln();
    assert_relative_eq!(critical_squeezing(n), r_c, epsilon = 1e-12);
}

#[test]
fn scenario_zero_temperature() {
    let n = bose_einstein(0.0, 1.0);
    assert_eq!(n, 0.0);
    assert_eq!(critical_squeezing(n), 0.0);
}

#[test]
fn scenario_squeezed_vacuum() {
    assert_relative_eq!(symplectic_eigenvalue(1.0, 0.0), 0.06767, epsilon = 1e-5);
    let e = log_negativity(1.0, 0.0);
    assert!(e > 0.0);
    assert_relative_eq!(e, 2.8854, epsilon = 1e-4);
}

#[test]
fn scenario_unsqueezed_vacuum() {
    assert_eq!(log_negativity(0.0, 0.0), 0.0);
}

#[test]
fn threshold_theorem_on_dense_sweep() {
    // Dense (T, r) sweep including T = 0 and temperatures past the plotted window
    for i in 0..=120 {
        let t = i as f64 * 0.05;
        let n = bose_einstein(t, OMEGA);
        let rc = critical_squeezing(n);
        for j in 0..=200 {
            let r = j as f64 * 0.015;
            let e = log_negativity(r, n);
            assert!(e >= 0.0);
            if r <= rc {
                assert!(e <= TOL, "E_N({}, T={}) = {} below r_c = {}", r, t, e, rc);
            } else if r > rc + TOL {
                assert!(e > 0.0, "E_N({}, T={}) = 0 above r_c = {}", r, t, rc);
            }
        }
    }
}

#[test]
fn threshold_theorem_right_at_the_boundary() {
    for &t in &[0.1, 0.5, 1.0, 2.5, 4.0] {
        let n = bose_einstein(t, OMEGA);
        let rc = critical_squeezing(n);
        assert!(log_negativity(rc, n) <= TOL);
        assert!(log_negativity(rc - 1e-6, n) == 0.0);
        assert!(log_negativity(rc + 1e-6, n) > 0.0);
    }
}

#[test]
fn full_pipeline_shapes_and_invariants() {
    let n = 100;
    let config = DiagramConfig::default().with_resolution(n);
    let diagram = PhaseDiagram::compute(&config);

    assert_eq!(diagram.mesh.temperature.len(), n * n);
    assert_eq!(diagram.mesh.squeezing.len(), n * n);
    assert_eq!(diagram.threshold.len(), n);
    assert_eq!(diagram.threshold.len(), diagram.temperatures().len());

    assert!(diagram.occupation.iter().all(|v| v.is_finite() && v >= 0.0));
    assert!(diagram.entanglement.iter().all(|v| v >= 0.0));
    assert!(diagram.threshold.iter().all(|&v| v >= 0.0));

    let report = verify_grid(&diagram, THEOREM_TOLERANCE);
    assert!(report.is_consistent(), "{:?}", report);
}

#[test]
fn threshold_curve_rises_with_temperature() {
    let diagram = PhaseDiagram::compute(&DiagramConfig::default().with_resolution(50));
    for w in diagram.threshold.windows(2) {
        assert!(w[1] >= w[0]);
    }
}

#[test]
fn regimes_match_annotation_positions() {
    // The labels sit inside the regime they name
    let style = PlotStyle::default();
    let n_noise = bose_einstein(style.annotations[0].x, OMEGA);
    let n_ent = bose_einstein(style.annotations[1].x, OMEGA);
    assert_eq!(
        Regime::classify(style.annotations[0].y, n_noise),
        Regime::NoiseDominated
    );
    assert_eq!(
        Regime::classify(style.annotations[1].y, n_ent),
        Regime::EntanglementDominant
    );
}

#[test]
fn render_failure_surfaces_as_error() {
    let mut config = DiagramConfig::default()
        .with_resolution(10)
        .with_output("/definitely/missing/dir/out.png");
    config.style.dpi = 20;
    let diagram = PhaseDiagram::compute(&config);
    match render(&diagram, &config.style, &config.output) {
        Err(DiagramError::Render(_)) => {}
        other => panic!("expected a render error, got {:?}", other),
    }
}
