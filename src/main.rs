//! Phase diagram generator: entanglement dominance in TMST.

use env_logger::Env;
use log::info;

use tmst_phase::config::DiagramConfig;
use tmst_phase::entanglement::{critical_temperature, Regime};
use tmst_phase::phase::PhaseDiagram;
use tmst_phase::render;
use tmst_phase::thermal::bose_einstein;
use tmst_phase::verify::{self, THEOREM_TOLERANCE};
use tmst_phase::DiagramError;

const RANDOM_SAMPLES: usize = 100_000;
const RANDOM_SEED: u64 = 42;

fn main() -> Result<(), DiagramError> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = DiagramConfig::default();
    println!("Simulating TMST entanglement phase diagram...");

    info!(
        "grid: T ∈ [{}, {}] × r ∈ [{}, {}], {}×{} samples, ω = {}",
        config.t_min,
        config.t_max,
        config.r_min,
        config.r_max,
        config.t_samples,
        config.r_samples,
        config.omega
    );
    let diagram = PhaseDiagram::compute(&config);

    // ═══════════════════════════════════════
    // Threshold theorem
    // ═══════════════════════════════════════
    let grid_report = verify::verify_grid(&diagram, THEOREM_TOLERANCE)
        .into_result()?;
    let random_report =
        verify::verify_random(&config, RANDOM_SAMPLES, RANDOM_SEED, THEOREM_TOLERANCE)
            .into_result()?;
    info!(
        "threshold theorem holds on {} grid points and {} random samples",
        grid_report.checked, random_report.checked
    );

    println!();
    println!(
        "  {:>8}  {:>12}  {:>10}  {:>24}",
        "T", "n̄(T)", "r_c(T)", "Regime at r = 1"
    );
    println!("  {:─>8}  {:─>12}  {:─>10}  {:─>24}", "", "", "", "");
    for &t in &[0.01, 0.25, 0.5, 1.0, 2.0, 3.0] {
        let n_bar = bose_einstein(t, config.omega);
        println!(
            "  {:>8.2}  {:>12.4e}  {:>10.4}  {:>24}",
            t,
            n_bar,
            diagram.threshold_at(t),
            Regime::classify(1.0, n_bar).headline()
        );
    }
    println!();
    let max_e = diagram.max_entanglement();
    let fraction = diagram.entangled_fraction() * 100.0;
    println!("  Max E_N:             {:.4} ebits", max_e);
    println!("  Entangled fraction:  {:.1}%", fraction);
    println!(
        "  T_c at r = {:.1}:      {:.4}  (highest temperature still entangled)",
        config.r_max,
        critical_temperature(config.r_max, config.omega)
    );
    println!();

    render::render(&diagram, &config.style, &config.output)?;
    println!(
        "Simulation complete. '{}' generated.",
        config.output.display()
    );

    if config.show {
        render::show_image(&config.output);
    }
    Ok(())
}
