use std::{thread, time::Duration};

use anyhow::{Context, Result};
use boundlife::Simulation;
use log::{LevelFilter, debug, info};
use simple_logger::SimpleLogger;

mod console;
mod options;
mod stats;

/// How long a paused loop without a tick interval waits between polls
const PAUSED_POLL: Duration = Duration::from_millis(16);

fn init_logging(args: &options::Args) -> Result<()> {
    let level = match args.log_level()? {
        Some(level) => level,
        // log lines would tear the rendered frame, so console mode is opt-in
        None if args.console() => return Ok(()),
        None => LevelFilter::Info,
    };
    SimpleLogger::new()
        .with_level(level)
        .init()
        .context("initialize logger")
}

fn main() -> Result<()> {
    let Some(args) = options::Args::from_env()? else {
        return Ok(());
    };
    init_logging(&args)?;

    let config = args.sim_config()?;
    let generations = args.generations()?;
    let mut sim = Simulation::new(config).context("invalid simulation configuration")?;
    info!(
        "grid {}x{}, rule {}, {} alive",
        sim.width(),
        sim.height(),
        sim.engine().rulestring().as_deref().unwrap_or("custom"),
        sim.alive_count()
    );

    // setup the console and reporting metrics
    let mut console = if args.console() {
        Some(console::ConsoleRender::new().context("enter console mode")?)
    } else {
        None
    };
    let mut stats = stats::Stats::new(&sim, args.stats_file().is_some());
    let sleep = Some(sim.tick()).filter(|tick| !tick.is_zero());
    let mut paused = false;

    'generations: while sim.generation() < generations {
        // handle input and render if in console mode
        if let Some(ref mut console) = console {
            while let Some(cmd) = console.poll_events()? {
                match cmd {
                    console::ConsoleCommand::Exit => break 'generations,
                    console::ConsoleCommand::TogglePause => paused = !paused,
                    console::ConsoleCommand::Paint(pos) => match sim.set_alive(pos.x, pos.y) {
                        Ok(()) => console.mark_drawn(pos, sim.generation()),
                        Err(err) => debug!("ignored click: {err}"),
                    },
                    console::ConsoleCommand::Handled => {}
                }
            }
            console.render(&sim, paused)?;
        }

        // report metrics every 500ms
        if let Some(report) = stats.report(&sim) {
            if let Some(ref mut console) = console {
                console.set_report(report);
            } else {
                println!("{}", report);
            }
        }

        // compute the next generation, pausing is simply not stepping
        if !paused {
            sim.step().context("advance generation")?;
            stats.record(&sim);
        }
        match sleep {
            Some(time) => thread::sleep(time),
            None if paused => thread::sleep(PAUSED_POLL),
            None => {}
        }
    }
    std::mem::drop(console);

    info!(
        "stopped after {} generations, {} alive",
        sim.generation(),
        sim.alive_count()
    );
    if let Some(file_name) = args.stats_file() {
        stats
            .save(&file_name)
            .with_context(|| format!("write stats to {file_name}"))?;
    }

    Ok(())
}
