use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;

use dyetank::config::{self, Config};
use dyetank::solver::diagnostics::{divergence_l2, kinetic_energy, min_value, total_mass};
use dyetank::{Brush, DensitySink, DensitySnapshot, FluidState, JsonLinesSink, PointerSource, ScriptedPointer, SimResult};

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_CONFIG_PATH));
    let cfg = config::load(&path);

    let mut sim = FluidState::new(cfg.simulation.size, cfg.simulation.solver_params())
        .context("building simulation")?;
    let mut brush = cfg.brush.brush();
    let mut pointer = ScriptedPointer::new(sim.size(), cfg.brush.press_frames, cfg.brush.release_frames);
    let mut sink = open_sink(&cfg)?;
    let mut snap = DensitySnapshot::new_empty(sim.size());

    // Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || r.store(false, Ordering::SeqCst)).context("setting Ctrl+C handler")?;

    log::info!(
        "running {} steps on a {n}x{n} grid",
        cfg.run.steps,
        n = sim.size()
    );
    let started = Instant::now();

    while running.load(Ordering::SeqCst) && sim.steps() < cfg.run.steps {
        let pressed = advance_frame(&mut sim, &mut brush, &mut pointer).context("applying brush")?;

        if let Some(sink) = sink.as_mut() {
            sim.snapshot_into(&mut snap);
            sink.present(sim.steps(), &snap).context("writing snapshot")?;
        }

        if cfg.run.report_every > 0 && sim.steps() % cfg.run.report_every == 0 {
            report(&sim, pressed);
        }
    }

    if let Some(sink) = sink.as_mut() {
        sink.finish().context("flushing snapshots")?;
    }

    let elapsed = started.elapsed();
    log::info!(
        "done: {} steps in {:.2?} ({:.1} steps/s), final mass {:.3}",
        sim.steps(),
        elapsed,
        sim.steps() as f64 / elapsed.as_secs_f64().max(1e-9),
        total_mass(sim.density().as_slice(), sim.size())
    );
    Ok(())
}

/// One frame of input and simulation. Returns the button state the brush saw.
fn advance_frame(sim: &mut FluidState, brush: &mut Brush, pointer: &mut ScriptedPointer) -> SimResult<bool> {
    let pressed = pointer.pointer_pressed();
    brush.apply(&*pointer, sim)?;
    sim.step();
    pointer.advance();
    Ok(pressed)
}

fn open_sink(cfg: &Config) -> anyhow::Result<Option<Box<dyn DensitySink>>> {
    let Some(path) = cfg.run.snapshot_path.as_deref() else {
        return Ok(None);
    };
    let file = File::create(path).with_context(|| format!("creating {path}"))?;
    log::info!("writing density frames to {path}");
    Ok(Some(Box::new(JsonLinesSink::new(BufWriter::new(file)))))
}

fn report(sim: &FluidState, pressed: bool) {
    let n = sim.size();
    let density = sim.density().as_slice();
    let (vx, vy) = (sim.velocity_x().as_slice(), sim.velocity_y().as_slice());
    let min = min_value(density, n);
    log::info!(
        "step {:>6}  mass {:>10.3}  ke {:.3e}  div {:.3e}  brush {}",
        sim.steps(),
        total_mass(density, n),
        kinetic_energy(vx, vy, n),
        divergence_l2(vx, vy, n),
        if pressed { "down" } else { "up" }
    );
    if min < 0.0 {
        log::warn!("density undershoot at step {}: min {min:.3e}", sim.steps());
    }
}
