use boundlife::Simulation;
use std::{
    fs,
    io::{self, Write},
    path::Path,
    time::{Duration, Instant},
};

const REPORT_INTERVAL: Duration = Duration::from_millis(500);

/// One committed generation, as written to the CSV
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StepRecord {
    generation: u64,
    micros: u128,
    alive: usize,
}

/// Generation rate and population of a [`Simulation`]
///
/// With CSV output enabled every committed step is also kept, timed from the
/// step before it.
pub struct Stats {
    last_report: Instant,
    gens_at_report: u64,
    last_step: Instant,
    steps: Option<Vec<StepRecord>>,
}
impl Stats {
    pub fn new(sim: &Simulation, csv: bool) -> Self {
        let now = Instant::now();
        Self {
            last_report: now,
            gens_at_report: sim.generation(),
            last_step: now,
            steps: csv.then(Vec::new),
        }
    }

    /// Notes the generation `sim` just committed
    pub fn record(&mut self, sim: &Simulation) {
        let now = Instant::now();
        let micros = now.duration_since(self.last_step).as_micros();
        self.last_step = now;

        if let Some(steps) = &mut self.steps {
            steps.push(StepRecord {
                generation: sim.generation(),
                micros,
                alive: sim.alive_count(),
            });
        }
    }

    /// A report line, once per [`REPORT_INTERVAL`]
    pub fn report(&mut self, sim: &Simulation) -> Option<String> {
        self.report_at(sim, Instant::now())
    }

    fn report_at(&mut self, sim: &Simulation, now: Instant) -> Option<String> {
        let elapsed = now.saturating_duration_since(self.last_report);
        if elapsed < REPORT_INTERVAL {
            return None;
        }
        // a paused simulation simply reports no progress
        let gens = sim.generation() - self.gens_at_report;
        self.last_report = now;
        self.gens_at_report = sim.generation();

        Some(line(sim, gens as f64 / elapsed.as_secs_f64()))
    }

    pub fn write_csv<W: Write>(&self, mut out: W) -> io::Result<()> {
        out.write_all(b"gen,delta_t,alive\n")?;
        for step in self.steps.iter().flatten() {
            writeln!(out, "{},{},{}", step.generation, step.micros, step.alive)?;
        }
        out.flush()
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        if self.steps.is_none() {
            return Err(io::Error::other(
                "statistics were not recorded for csv output",
            ));
        }
        let file = fs::File::create(path)?;
        self.write_csv(io::BufWriter::new(file))
    }
}

fn line(sim: &Simulation, gens_per_sec: f64) -> String {
    format!(
        "{:.02}gen/s gen:{}, alive:{}",
        gens_per_sec,
        sim.generation(),
        sim.alive_count()
    )
}
