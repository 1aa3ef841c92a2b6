//! Command-line flags for the terminal demo.

use std::path::PathBuf;

use sortviz_core::{Algorithm, EngineConfig};

use crate::error::DemoError;

pub const USAGE: &str = "\
usage: sortviz-demo [options]

  -c, --config <file>      engine config (.ron, .toml or .json)
  -a, --algorithm <name>   bubble | selection | insertion | merge | quick
  -s, --seed <n>           seed for the generated array
  -i, --interval <ms>      delay between steps
  -n, --size <n>           number of bars
      --compares           also show compare steps
  -h, --help               print this message";

/// Parsed flags. Anything left unset falls back to the config file, then to
/// the engine defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemoArgs {
    pub config: Option<PathBuf>,
    pub algorithm: Option<Algorithm>,
    pub seed: Option<u64>,
    pub interval_ms: Option<u64>,
    pub size: Option<usize>,
    pub compares: bool,
    pub help: bool,
}

impl DemoArgs {
    /// Parse flags, excluding the program name.
    pub fn parse<I>(args: I) -> Result<Self, DemoError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-c" | "--config" => {
                    parsed.config = Some(PathBuf::from(value(&mut args, "--config")?));
                }
                "-a" | "--algorithm" => {
                    let raw = value(&mut args, "--algorithm")?;
                    let algorithm = raw.parse().map_err(|_| DemoError::InvalidValue {
                        flag: "--algorithm",
                        value: raw,
                    })?;
                    parsed.algorithm = Some(algorithm);
                }
                "-s" | "--seed" => parsed.seed = Some(number(&mut args, "--seed")?),
                "-i" | "--interval" => parsed.interval_ms = Some(number(&mut args, "--interval")?),
                "-n" | "--size" => parsed.size = Some(number(&mut args, "--size")?),
                "--compares" => parsed.compares = true,
                "-h" | "--help" => parsed.help = true,
                _ => return Err(DemoError::UnknownArgument { arg }),
            }
        }
        Ok(parsed)
    }

    /// Layer the command-line overrides onto `config`.
    pub fn apply(&self, config: &mut EngineConfig) {
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(ms) = self.interval_ms {
            config.step_interval_ms = ms;
        }
        if let Some(size) = self.size {
            config.array_size = size;
        }
        if self.compares {
            config.emit_compares = true;
        }
    }
}

fn value(args: &mut impl Iterator<Item = String>, flag: &'static str) -> Result<String, DemoError> {
    args.next().ok_or(DemoError::MissingValue { flag })
}

fn number<T: std::str::FromStr>(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<T, DemoError> {
    let raw = value(args, flag)?;
    raw.parse()
        .map_err(|_| DemoError::InvalidValue { flag, value: raw })
}
