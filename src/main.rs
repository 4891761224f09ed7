mod cli;

use egyptian_clocks::error::Result;
use egyptian_clocks::render::Renderer;
use egyptian_clocks::terminal::{terminal_dimensions, TerminalHost};
use egyptian_clocks::ticker::{LocalClock, Ticker, WallClock, DEFAULT_LAYOUT};
use log::warn;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::{process::exit, time::Duration};
use structopt::StructOpt;

use crate::cli::CliOptions;

/// Used for `--once` when stdout is not a terminal.
const FALLBACK_DIMENSIONS: (usize, usize) = (160, 40);

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(path) = log_file {
        builder.target(env_logger::Target::Pipe(Box::new(File::create(path)?)));
    }
    builder.init();
    Ok(())
}

fn run(opt: CliOptions) -> Result<()> {
    init_logging(opt.log_file.as_deref())?;

    let mut rng = match opt.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let alphabet = opt.glyphs.alphabet();
    let clock = LocalClock;
    let mut ticker =
        Ticker::from_palette(DEFAULT_LAYOUT, opt.size, &alphabet, &mut rng, &clock.now())?
            .with_interval(Duration::from_millis(opt.tick.max(1)));
    let renderer = Renderer::new(opt.glyphs.columns());

    if opt.once {
        ticker.tick(&clock.now())?;
        let (width, height) = terminal_dimensions().unwrap_or_else(|_| {
            warn!("unable to get term size, using {:?}", FALLBACK_DIMENSIONS);
            FALLBACK_DIMENSIONS
        });
        let mut stdout = io::stdout();
        ticker.frame(&renderer, width, height).write_to(&mut stdout)?;
        writeln!(stdout)?;
        return Ok(());
    }

    let mut host = TerminalHost::new()?;
    ticker.run(&mut host, &clock, &renderer)
}

fn main() {
    let opt = CliOptions::from_args();
    if let Err(error) = run(opt) {
        eprintln!("\n  {}\n", error);
        exit(1)
    }
}
