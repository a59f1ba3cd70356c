use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "aquasentinel")]
#[command(
    author,
    version,
    about = "Water-quality health-risk inference from humidity and temperature readings"
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = "aquasentinel.yaml")]
    pub config: PathBuf,

    /// Model artifacts file (overrides the config file)
    #[arg(short, long, global = true, env = "AQUASENTINEL_ARTIFACTS")]
    pub artifacts: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Full analysis of a single reading
    Analyze {
        #[command(flatten)]
        reading: ReadingArgs,

        /// Seed for the synthesized sample (overrides the config file)
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Analyze a JSON array of readings concurrently
    Batch {
        /// JSON file holding `[{"humidity": .., "temperature_celsius": ..}, ..]`
        #[arg(short, long)]
        input: PathBuf,

        /// Base seed; reading `i` uses `seed + i`
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Predict health risks for a water-quality sample
    Predict {
        /// JSON file mapping parameter names to values
        #[arg(long, conflicts_with = "reference", required_unless_present = "reference")]
        sample: Option<PathBuf>,

        /// Use the built-in reference sample
        #[arg(long)]
        reference: bool,
    },

    /// Synthesize a water-quality sample for a reading
    Synthesize {
        #[command(flatten)]
        reading: ReadingArgs,

        /// Seed for the synthesized sample (overrides the config file)
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Decode a predicted class into health-risk categories
    Decode {
        /// Predicted class (0-255)
        #[arg(allow_hyphen_values = true)]
        class: i64,
    },

    /// Threshold alert on a raw reading
    Alert {
        #[command(flatten)]
        reading: ReadingArgs,

        /// Temperature alert threshold in °C
        #[arg(long, env = "TEMP_HIGH_C")]
        temp_high_c: Option<f64>,

        /// Humidity alert threshold in percent
        #[arg(long, env = "HUMIDITY_HIGH_PCT")]
        humidity_high_pct: Option<f64>,
    },
}

/// A humidity/temperature pair from the command line
#[derive(Args, Debug, Clone, Copy)]
pub struct ReadingArgs {
    /// Relative humidity in percent
    #[arg(long)]
    pub humidity: f64,

    /// Temperature in °C
    #[arg(long, allow_hyphen_values = true)]
    pub temperature: f64,
}
