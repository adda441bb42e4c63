// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Headless driver for the gravity sandbox
//!
//! Runs a preset scene for a fixed number of ticks and logs momentum, energy
//! and the strongest probe glyph in place of drawing a frame.
//!
//! ```text
//! RUST_LOG=info cargo run --example headless --features serde -- --preset triangle --steps 600
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use gravity_field::diagnostics::{total_energy, total_momentum};
use gravity_field::field::ProbeGrid;
use gravity_field::scene::{Preset, Scene, Viewport};
use gravity_field::{Simulation, SimulationConfig};
use log::info;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(about = "Run the gravity sandbox without a window")]
struct Args {
    /// Initial conditions: "pair" or "triangle"
    #[arg(long, default_value = "pair")]
    preset: Preset,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 600)]
    steps: u64,

    /// JSON file with physical constants; defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Probe grid columns
    #[arg(long, default_value_t = 10)]
    cols: usize,

    /// Probe grid rows
    #[arg(long, default_value_t = 10)]
    rows: usize,

    /// Log a frame summary every N ticks
    #[arg(long, default_value_t = 60)]
    log_every: u64,

    /// Sleep to hold 60 ticks per second of wall time
    #[arg(long)]
    pace: bool,
}

const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / 60);

fn load_config(path: Option<&PathBuf>) -> Result<SimulationConfig> {
    let Some(path) = path else {
        return Ok(SimulationConfig::default());
    };
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let config: SimulationConfig = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = load_config(args.config.as_ref())?;
    let mut sim = Simulation::new(config)?;
    let mut scene = Scene::from_preset(Viewport::default(), ProbeGrid::new(args.cols, args.rows), args.preset)?;

    let initial_momentum = total_momentum(scene.bodies());
    let initial_energy = total_energy(scene.bodies(), sim.field());
    info!(
        "Running {:?} for {} ticks: momentum ({:.6}, {:.6}), energy {:.3}",
        args.preset, args.steps, initial_momentum.x, initial_momentum.y, initial_energy
    );

    let mut total_contacts = 0;
    let log_every = args.log_every.max(1);

    for _ in 0..args.steps {
        let frame_start = Instant::now();
        let report = sim.step_scene(&mut scene);
        total_contacts += report.contacts;

        if report.tick % log_every == 0 {
            let snapshot = scene.snapshot();
            let momentum = total_momentum(snapshot.bodies);
            let energy = total_energy(snapshot.bodies, sim.field());
            match snapshot.strongest_glyph() {
                Some((position, glyph)) => info!(
                    "t={:.1} momentum=({:.3e}, {:.3e}) energy={:.3} contacts={} strongest probe ({:.0}, {:.0}) |F|={:.4} angle={:.2}",
                    sim.elapsed_time(),
                    momentum.x,
                    momentum.y,
                    energy,
                    total_contacts,
                    position.x,
                    position.y,
                    glyph.magnitude,
                    glyph.angle
                ),
                None => info!(
                    "t={:.1} momentum=({:.3e}, {:.3e}) energy={:.3} contacts={}",
                    sim.elapsed_time(),
                    momentum.x,
                    momentum.y,
                    energy,
                    total_contacts
                ),
            }
        }

        if args.pace {
            if let Some(remaining) = FRAME_DURATION.checked_sub(frame_start.elapsed()) {
                thread::sleep(remaining);
            }
        }
    }

    let final_energy = total_energy(scene.bodies(), sim.field());
    let drift = (final_energy - initial_energy) / initial_energy.abs().max(f64::EPSILON);
    info!(
        "Done after {} ticks ({:.1} time units): {} contacts, relative energy drift {:.3e}",
        sim.ticks(),
        sim.elapsed_time(),
        total_contacts,
        drift
    );

    Ok(())
}
