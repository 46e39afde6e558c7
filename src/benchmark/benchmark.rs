use std::time::Instant;

use crate::error::Result;
use crate::simulation::body::BodyRecord;
use crate::simulation::engine::Engine;
use crate::simulation::params::Parameters;
use crate::simulation::solar_system::SolarSystem;
use crate::simulation::units::KM_PER_AU;
use crate::simulation::vector::NVec3;

/// Helper to build a manual system of size `n`
pub fn make_system(n: usize, workers: Option<usize>) -> Result<SolarSystem> {
    let parameters = Parameters {
        dt: 1.0,
        target_fps: 30.0,
        ..Parameters::default()
    };
    let mut system = SolarSystem::new(parameters, Engine { parallel: false, workers })?;

    for i in 0..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let x = NVec3::new(
            (i_f * 0.37).sin() * 5.0 * KM_PER_AU + i_f,
            (i_f * 0.13).cos() * 5.0 * KM_PER_AU,
            (i_f * 0.07).sin() * 0.1 * KM_PER_AU,
        );
        system.add_body(BodyRecord::planet(format!("body-{i}"), 1.0e24, 1000.0, x, NVec3::zeros()))?;
    }
    Ok(system)
}

/// Time sequential vs parallel ticks for a range of n
pub fn bench_tick() -> Result<()> {
    let ns = [50, 100, 200, 400, 800];
    let steps = 5;

    for n in ns {
        let mut seq = make_system(n, None)?;
        let mut par = make_system(n, None)?;

        // Warm up, first tick recomputes everything
        seq.tick(1.0, 30.0, false)?;
        par.tick(1.0, 30.0, true)?;

        let t0 = Instant::now();
        for _ in 0..steps {
            seq.invalidate_cache();
            seq.tick(1.0, 30.0, false)?;
        }
        let seq_per_step = t0.elapsed().as_secs_f64() / steps as f64;

        let t1 = Instant::now();
        for _ in 0..steps {
            par.invalidate_cache();
            par.tick(1.0, 30.0, true)?;
        }
        let par_per_step = t1.elapsed().as_secs_f64() / steps as f64;

        println!(
            "N = {n:4}, pairs = {:6}, sequential = {:8.6} s, parallel = {:8.6} s",
            seq.cache().len(),
            seq_per_step,
            par_per_step
        );
    }
    Ok(())
}

/// Time ticks that reuse cached forces against ticks that recompute every pair
/// Paste output directly into a spreadsheet to graph
pub fn bench_cache_reuse() -> Result<()> {
    println!("N,fresh_ms,cached_ms,recompute_ratio");

    let steps = 30;
    for n in (100..=800).step_by(100) {
        let mut fresh = make_system(n, None)?;
        let mut cached = make_system(n, None)?;

        let t0 = Instant::now();
        for _ in 0..steps {
            fresh.invalidate_cache();
            fresh.tick(0.1, 30.0, false)?;
        }
        let ms_fresh = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        let mut recomputed = 0;
        let mut pairs = 0;
        let t1 = Instant::now();
        for _ in 0..steps {
            let stats = cached.tick(0.1, 30.0, false)?;
            recomputed += stats.recomputed;
            pairs += stats.pairs;
        }
        let ms_cached = t1.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6},{:.6},{:.4}", n, ms_fresh, ms_cached, recomputed as f64 / pairs.max(1) as f64);
    }
    Ok(())
}
