//! RPS Arena entry point
//!
//! Builds a run configuration from a JSON file and/or flags, runs it headless
//! and prints the outcome.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use rps_arena::consts::{DEFAULT_MAX_TICKS, HEADLESS_DT};
use rps_arena::{SimConfig, run_headless};

/// Rock/paper/scissors arena - headless runner
#[derive(Parser, Debug)]
#[command(name = "rps-arena")]
#[command(about = "Run a rock/paper/scissors arena until one kind is left")]
struct Args {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board width in cells
    #[arg(long)]
    width: Option<u32>,

    /// Board height in cells
    #[arg(long)]
    height: Option<u32>,

    /// Cell edge length in world units
    #[arg(long)]
    cell_size: Option<u32>,

    /// Number of creatures
    #[arg(long)]
    count: Option<u32>,

    /// Base creature speed (units per second)
    #[arg(long)]
    speed: Option<f32>,

    #[arg(long)]
    mass: Option<f32>,

    #[arg(long)]
    radius: Option<f32>,

    #[arg(long)]
    min_speed_mult: Option<f32>,

    #[arg(long)]
    max_speed_mult: Option<f32>,

    /// Multiplier applied to every tick's elapsed time
    #[arg(long)]
    tps_multiplier: Option<f32>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Remove losers instead of converting them
    #[arg(long)]
    no_convert: bool,

    /// Disable creature-creature bouncing
    #[arg(long)]
    no_bounce: bool,

    #[arg(long)]
    obstacle_count: Option<u32>,

    #[arg(long)]
    obstacle_avg_size: Option<f32>,

    /// Winners absorb the loser's mass
    #[arg(long)]
    grow_on_win: bool,

    /// Maximum ticks before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_TICKS)]
    max_ticks: u64,

    /// Seconds per tick
    #[arg(long, default_value_t = HEADLESS_DT)]
    dt: f32,

    /// Print the outcome as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    /// Layer the flags on top of `base`
    fn apply(&self, mut config: SimConfig) -> SimConfig {
        if let Some(v) = self.width {
            config.board_width = v;
        }
        if let Some(v) = self.height {
            config.board_height = v;
        }
        if let Some(v) = self.cell_size {
            config.cell_size = v;
        }
        if let Some(v) = self.count {
            config.creature_count = v;
        }
        if let Some(v) = self.speed {
            config.creature_speed = v;
        }
        if let Some(v) = self.mass {
            config.creature_mass = v;
        }
        if let Some(v) = self.radius {
            config.creature_radius = v;
        }
        if let Some(v) = self.min_speed_mult {
            config.min_speed_multiplier = v;
        }
        if let Some(v) = self.max_speed_mult {
            config.max_speed_multiplier = v;
        }
        if let Some(v) = self.tps_multiplier {
            config.tps_multiplier = v;
        }
        if let Some(v) = self.seed {
            config.random_seed = v;
        }
        if let Some(v) = self.obstacle_count {
            config.obstacle_count = v;
        }
        if let Some(v) = self.obstacle_avg_size {
            config.obstacle_avg_size = v;
        }
        if self.no_convert {
            config.convert_loser_to_winner = false;
        }
        if self.no_bounce {
            config.bounce_off_creatures = false;
        }
        if self.grow_on_win {
            config.grow_on_win = true;
        }
        config
    }

    fn build_config(&self) -> rps_arena::error::Result<SimConfig> {
        let base = match &self.config {
            Some(path) => SimConfig::read(path)?,
            None => SimConfig::default(),
        };
        let config = self.apply(base);
        config.validate()?;
        config.validate_timestep(self.dt)?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let config = match args.build_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    log::debug!("Running with {config:?}");

    let outcome = run_headless(&config, args.max_ticks, args.dt);
    if args.json {
        match serde_json::to_string_pretty(&outcome) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{}", outcome.summary());
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use rps_arena::ConfigError;

    #[test]
    fn test_flags_override_config_file_before_validation() {
        let path = std::env::temp_dir().join(format!("rps-arena-cli-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"creature_mass": 0.0, "creature_count": 5}"#).unwrap();
        let path_arg = path.to_string_lossy().into_owned();

        let fixed = Args::try_parse_from(["rps-arena", "--config", &path_arg, "--mass", "2"]).unwrap();
        let config = fixed.build_config().unwrap();
        assert_eq!(config.creature_mass, 2.0);
        assert_eq!(config.creature_count, 5);

        let unfixed = Args::try_parse_from(["rps-arena", "--config", &path_arg]).unwrap();
        assert!(matches!(unfixed.build_config(), Err(ConfigError::NonPositiveMass(_))));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_rejects_bad_dt() {
        for dt in ["NaN", "inf", "-1"] {
            let flag = format!("--dt={dt}");
            let args = Args::try_parse_from(["rps-arena", flag.as_str()]).unwrap();
            assert!(matches!(args.build_config(), Err(ConfigError::InvalidTimestep(_))), "dt {dt}");
        }
        let args = Args::try_parse_from(["rps-arena", "--dt", "0.5", "--no-convert"]).unwrap();
        let config = args.build_config().unwrap();
        assert!(!config.convert_loser_to_winner);
    }
}
