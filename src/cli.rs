use egyptian_clocks::markers::GlyphSet;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "Egyptian Clocks",
    about = "\nTen 24-hour analog clocks with shuffled Egyptian hour markers.\nPress q, Esc or Ctrl-C to quit."
)]
pub struct CliOptions {
    /// How often should the clocks be redrawn in millisecond.
    #[structopt(short, long, default_value = "1000")]
    pub tick: u64,

    /// Logical size of each clock face in pixels.
    #[structopt(short, long, default_value = "300", parse(try_from_str = parse_size))]
    pub size: u32,

    /// Hour marker glyphs, "egyptian" or "latin".
    /// Use "latin" when the terminal font has no Egyptian hieroglyphs.
    #[structopt(short, long, default_value = "egyptian")]
    pub glyphs: GlyphSet,

    /// Seed for shuffling the hour markers. Random when omitted.
    #[structopt(long)]
    pub seed: Option<u64>,

    /// Print a single frame and exit.
    #[structopt(long)]
    pub once: bool,

    /// Write logs to this file. Filter them with RUST_LOG.
    #[structopt(long, parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

fn parse_size(value: &str) -> Result<u32, String> {
    match value.parse::<u32>() {
        Ok(0) => Err("size must be greater than zero".to_string()),
        Ok(size) => Ok(size),
        Err(error) => Err(error.to_string()),
    }
}
