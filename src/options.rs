use std::{str::FromStr, sync::OnceLock, time::Duration};

use anyhow::{Context, Result, anyhow, bail};
use boundlife::{Pos2, SimConfig, Variant, parse_rulestring, sim::DEFAULT_SEED};
use log::LevelFilter;
use regex::Regex;

const DEFAULT_SLEEP_MILLIS: u64 = 300;
const DEFAULT_RULE: &str = "B3/S23";

pub struct Args {
    matches: getopts::Matches,
}

impl Args {
    /// Parses command line arguments, returning [`None`] if help was requested
    fn new<T: AsRef<str>>(args: &[T]) -> Result<Option<Self>> {
        let mut opts = getopts::Options::new();
        opts.optflag("", "help", "print this help menu");
        opts.optflag("c", "console", "run in interactive console mode");
        opts.optopt("w", "width", "set grid width", "WIDTH");
        opts.optopt("h", "height", "set grid height", "HEIGHT");
        opts.optopt("r", "rule", "transition table as B<digits>/S<digits>", "RULE");
        opts.optopt("f", "fill", "seed fill: random, alternating, all, empty", "TYPE");
        opts.optopt("", "seed", "cells set alive at start", "\"X,Y X,Y ...\"");
        opts.optopt(
            "s",
            "sleep",
            "the tick interval between generations, 0 to disable",
            "MILLIS",
        );
        opts.optopt("g", "gens", "max number of generations", "COUNT");
        opts.optopt("", "stats", "write stats csv to file", "FILE");
        opts.optopt("", "log", "log level (off, error, warn, info, debug, trace)", "LEVEL");

        let matches = opts
            .parse(args.iter().map(T::as_ref))
            .context("invalid arguments")?;
        if matches.opt_present("help") {
            println!("{}", opts.usage("usage: boundlife [options]"));
            Ok(None)
        } else {
            Ok(Some(Self { matches }))
        }
    }
    pub fn from_env() -> Result<Option<Self>> {
        let env = std::env::args().collect::<Vec<_>>();
        Self::new(&env[1..])
    }

    fn opt_parse<T>(&self, name: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        self.matches
            .opt_get(name)
            .with_context(|| format!("invalid value for --{name}"))
    }

    pub fn console(&self) -> bool {
        self.matches.opt_present("console")
    }

    pub fn generations(&self) -> Result<u64> {
        Ok(self.opt_parse("gens")?.unwrap_or(u64::MAX)) // kinda hacky way of saying "infinity"
    }
    pub fn sleep(&self) -> Result<Option<Duration>> {
        let millis = self.opt_parse("sleep")?.unwrap_or(DEFAULT_SLEEP_MILLIS);
        Ok((millis > 0).then(|| Duration::from_millis(millis)))
    }

    pub fn grid_size(&self) -> Result<(i32, i32)> {
        let defaults = SimConfig::default();
        Ok((
            self.opt_parse("width")?.unwrap_or(defaults.width),
            self.opt_parse("height")?.unwrap_or(defaults.height),
        ))
    }

    pub fn variants(&self) -> Result<Vec<Variant>> {
        let rule = self.matches.opt_str("rule");
        let rule = rule.as_deref().unwrap_or(DEFAULT_RULE);
        parse_rulestring(rule).with_context(|| format!("invalid --rule {rule:?}"))
    }

    pub fn fill_mode(&self) -> Result<Option<FillMode>> {
        match self.matches.opt_str("fill") {
            Some(mode) => FillMode::new(&mode)
                .map(Some)
                .ok_or_else(|| anyhow!("unknown fill mode {mode:?}")),
            None => Ok(None),
        }
    }

    /// The alive cells at start: `--seed`, then `--fill`, then the default pattern
    pub fn seed(&self, w: i32, h: i32) -> Result<Vec<Pos2>> {
        if let Some(seed) = self.matches.opt_str("seed") {
            return parse_seed(&seed);
        }
        match self.fill_mode()? {
            Some(mode) => Ok(mode.create_alive(w, h)),
            None => Ok(DEFAULT_SEED.to_vec()),
        }
    }

    pub fn sim_config(&self) -> Result<SimConfig> {
        let (width, height) = self.grid_size()?;
        Ok(SimConfig {
            width,
            height,
            tick: self.sleep()?.unwrap_or_default(),
            seed: self.seed(width, height)?,
            variants: self.variants()?,
        })
    }

    pub fn stats_file(&self) -> Option<String> {
        self.matches.opt_str("stats")
    }

    pub fn log_level(&self) -> Result<Option<LevelFilter>> {
        self.opt_parse("log")
    }
}

/// Returns the singleton regex matching one `x,y` seed coordinate
fn seed_regex() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    CELL.get_or_init(|| Regex::new(r"^(-?[0-9]+),(-?[0-9]+)$").expect("valid seed regex"))
}

/// Parses `x,y` pairs separated by whitespace or `;`
fn parse_seed(seed: &str) -> Result<Vec<Pos2>> {
    let mut alive = Vec::new();
    for token in seed.split(|c: char| c.is_whitespace() || c == ';') {
        if token.is_empty() {
            continue;
        }
        let Some(captures) = seed_regex().captures(token) else {
            bail!("invalid seed coordinate {token:?}, expected X,Y");
        };
        let (_, [x, y]) = captures.extract();
        alive.push(Pos2::new(
            x.parse().with_context(|| format!("seed x out of range in {token:?}"))?,
            y.parse().with_context(|| format!("seed y out of range in {token:?}"))?,
        ));
    }
    Ok(alive)
}

pub enum FillMode {
    Random,
    Alternating,
    All,
    Empty,
}
impl FillMode {
    fn new<S: AsRef<str>>(s: S) -> Option<Self> {
        match s.as_ref() {
            "random" => Some(Self::Random),
            "alternating" => Some(Self::Alternating),
            "all" => Some(Self::All),
            "empty" => Some(Self::Empty),
            _ => None,
        }
    }

    fn reserve_size(&self, w: i32, h: i32) -> usize {
        let total = w.max(0) as usize * h.max(0) as usize;
        match self {
            Self::Random | Self::Alternating => total.div_ceil(2),
            Self::All => total,
            Self::Empty => 0,
        }
    }
    fn fill_cell<R: rand::Rng>(&self, cell: Pos2, rng: &mut R) -> bool {
        match self {
            Self::Random => rng.random_bool(0.5),
            Self::Alternating => (cell.x + cell.y) % 2 == 0,
            Self::All => true,
            Self::Empty => false,
        }
    }
    pub fn create_alive(self, w: i32, h: i32) -> Vec<Pos2> {
        let mut alive = Vec::new();
        let reserve_size = self.reserve_size(w, h);
        if reserve_size == 0 {
            // reserve_size indicates this will produce no alive cells
            return alive;
        }

        let mut rng = rand::rng();
        alive.reserve(reserve_size);
        for y in 0..h {
            for x in 0..w {
                let cell = Pos2::new(x, y);
                if self.fill_cell(cell, &mut rng) {
                    alive.push(cell);
                }
            }
        }
        alive
    }
}
