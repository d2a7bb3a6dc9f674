use clap::builder::styling::{AnsiColor, Color};
use clap::builder::styling::{Style, Styles};
use clap::{ColorChoice, Parser, Subcommand};

use crate::helper::run_helper::SamplingStrategy;

pub const BANNER: &str = "\x1b[0;91m██████  ██    ██ ███    ██ ██     ██  █████  ████████  ██████ ██   ██\x1b[0m\n\
                      \x1b[0;93m██   ██ ██    ██ ████   ██ ██     ██ ██   ██    ██    ██      ██   ██\x1b[0m\n\
                      \x1b[0;92m██████  ██    ██ ██ ██  ██ ██  █  ██ ███████    ██    ██      ███████\x1b[0m\n\
                      \x1b[0;96m██   ██ ██    ██ ██  ██ ██ ██ ███ ██ ██   ██    ██    ██      ██   ██\x1b[0m\n\
                      \x1b[0;95m██   ██  ██████  ██   ████  ███ ███  ██   ██    ██     ██████ ██   ██\x1b[0m\n";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "runwatch",
    version = env!("CARGO_PKG_VERSION"),
    about = BANNER,
    color = ColorChoice::Always,
    styles = get_styles(),
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Summarize read counts, read lengths, reference matches and coverage of every sample
    #[command(alias = "s")]
    Summary {
        /// Per-sample run data JSON (.json or .json.gz)
        #[arg(short, long)]
        data: String,

        /// Run config JSON with the reference panel
        #[arg(short, long)]
        config: String,

        /// Directory to write run_summary.json/.csv into
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Bin the coverage depth of one sample into a classified strip
    #[command(alias = "c")]
    Coverage {
        /// Per-sample run data JSON (.json or .json.gz)
        #[arg(short, long)]
        data: String,

        /// Run config JSON with the reference panel and depth thresholds
        #[arg(short, long)]
        config: String,

        /// Sample name
        #[arg(short, long)]
        sample: String,

        /// Display width in pixels
        #[arg(short, long, default_value_t = 300)]
        width: u32,

        /// How a column picks its depth: point, max or mean
        #[arg(long, default_value = "point")]
        strategy: SamplingStrategy,

        /// Directory to write the bins JSON and PNG strip into
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Re-summarize every time the run data file changes, press Enter to stop
    #[command(alias = "w")]
    Watch {
        /// Per-sample run data JSON (.json or .json.gz)
        #[arg(short, long)]
        data: String,

        /// Run config JSON with the reference panel
        #[arg(short, long)]
        config: String,

        /// Directory to write run_summary.json/.csv into
        #[arg(short, long)]
        output: String,

        /// Polling interval in seconds
        #[arg(short, long, default_value_t = 5)]
        interval: u64,

        /// Stop after this many polls
        #[arg(long)]
        max_polls: Option<usize>,
    },
}

pub fn get_styles() -> Styles {
    Styles::styled()
        .usage(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Yellow))),
        )
        .header(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Yellow))),
        )
        .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
        .invalid(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
        .error(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
        .valid(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::White))))
}
