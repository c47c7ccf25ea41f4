use std::{fmt::Display, num::NonZeroUsize, str::FromStr};

use crate::{error::ConfigError, source::Source};

/// Planner effort level.
pub const ENV_EFFORT: &str = "FFTBENCH_EFFORT";
/// Cap on `log2` of the total element count of any registered scenario.
pub const ENV_MAX_LOG_LEN: &str = "FFTBENCH_MAX_LOG_LEN";
/// Optional `u64` seed making buffer contents reproducible.
pub const ENV_SEED: &str = "FFTBENCH_SEED";
/// Worker thread count for multi-threaded builds.
pub const ENV_THREADS: &str = "OMP_NUM_THREADS";

pub const DEFAULT_MAX_LOG_LEN: u32 = 25;

/// How much time a library may spend choosing an algorithm at plan time.
///
/// Libraries without a notion of planner effort accept and ignore it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Effort {
    Estimate,
    #[default]
    Measure,
    Patient,
    Exhaustive,
}

impl FromStr for Effort {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "estimate" => Ok(Effort::Estimate),
            "measure" => Ok(Effort::Measure),
            "patient" => Ok(Effort::Patient),
            "exhaustive" => Ok(Effort::Exhaustive),
            _ => Err(ConfigError::InvalidEffort(s.to_string())),
        }
    }
}

impl Display for Effort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name: &str = match self {
            Effort::Estimate => "estimate",
            Effort::Measure => "measure",
            Effort::Patient => "patient",
            Effort::Exhaustive => "exhaustive",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Threading {
    #[default]
    Single,
    Multi(NonZeroUsize),
}

impl Threading {
    /// Thread count from the value of [`ENV_THREADS`], falling back to the
    /// number of logical CPUs when it is unset or empty.
    pub fn parse(value: Option<&str>) -> Result<Self, ConfigError> {
        let threads: usize = match value.map(str::trim).filter(|v| !v.is_empty()) {
            // OpenMP allows a comma-separated list per nesting level.
            Some(v) => {
                let outer: &str = v.split(',').next().unwrap_or(v).trim();
                parse_positive(ENV_THREADS, outer)?
            }
            None => num_cpus::get(),
        };
        Ok(NonZeroUsize::new(threads).map_or(Threading::Single, Threading::Multi))
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::parse(std::env::var(ENV_THREADS).ok().as_deref())
    }

    #[inline]
    pub fn threads(&self) -> usize {
        match self {
            Threading::Single => 1,
            Threading::Multi(n) => n.get(),
        }
    }

    #[inline]
    pub fn is_multi(&self) -> bool {
        matches!(self, Threading::Multi(_))
    }
}

/// Everything a backend consults while building a plan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlanConfig {
    pub effort: Effort,
    pub threading: Threading,
}

/// Run-wide settings of one benchmark binary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BenchConfig {
    pub plan: PlanConfig,
    pub max_log_len: u32,
    pub seed: Option<u64>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            plan: PlanConfig::default(),
            max_log_len: DEFAULT_MAX_LOG_LEN,
            seed: None,
        }
    }
}

impl BenchConfig {
    pub fn from_env(multi_threaded: bool) -> Result<Self, ConfigError> {
        Self::from_lookup(multi_threaded, |var| std::env::var(var).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(multi_threaded: bool, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let effort: Effort = match lookup(ENV_EFFORT) {
            Some(v) => v.parse()?,
            None => Effort::default(),
        };

        let threading: Threading = if multi_threaded {
            Threading::parse(lookup(ENV_THREADS).as_deref())?
        } else {
            Threading::Single
        };

        let max_log_len: u32 = match lookup(ENV_MAX_LOG_LEN) {
            Some(v) => u32::try_from(parse_positive(ENV_MAX_LOG_LEN, &v)?)
                .map_err(|_| ConfigError::InvalidInteger { var: ENV_MAX_LOG_LEN, value: v })?,
            None => DEFAULT_MAX_LOG_LEN,
        };

        let seed: Option<u64> = match lookup(ENV_SEED) {
            Some(v) => match v.trim().parse::<u64>() {
                Ok(seed) => Some(seed),
                Err(_) => return Err(ConfigError::InvalidInteger { var: ENV_SEED, value: v }),
            },
            None => None,
        };

        Ok(Self {
            plan: PlanConfig { effort, threading },
            max_log_len,
            seed,
        })
    }

    /// Root random source for a run.
    pub fn source(&self) -> Source {
        match self.seed {
            Some(seed) => Source::from_u64(seed),
            None => Source::from_entropy(),
        }
    }
}

fn parse_positive(var: &'static str, value: &str) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidInteger {
            var,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn defaults() {
        let cfg: BenchConfig = BenchConfig::from_lookup(false, lookup(&[])).unwrap();
        assert_eq!(cfg, BenchConfig::default());
        assert_eq!(cfg.plan.effort, Effort::Measure);
        assert_eq!(cfg.plan.threading, Threading::Single);
    }

    #[test]
    fn effort_parsing() {
        assert_eq!("ESTIMATE".parse::<Effort>().unwrap(), Effort::Estimate);
        assert_eq!(" patient ".parse::<Effort>().unwrap(), Effort::Patient);
        assert!(matches!("quick".parse::<Effort>(), Err(ConfigError::InvalidEffort(_))));
    }

    #[test]
    fn threads_follow_environment_only_when_multi_threaded() {
        let vars = [(ENV_THREADS, "6")];
        let single: BenchConfig = BenchConfig::from_lookup(false, lookup(&vars)).unwrap();
        assert_eq!(single.plan.threading.threads(), 1);

        let multi: BenchConfig = BenchConfig::from_lookup(true, lookup(&vars)).unwrap();
        assert_eq!(multi.plan.threading.threads(), 6);
        assert!(multi.plan.threading.is_multi());
    }

    #[test]
    fn threads_fall_back_to_cpu_count() {
        let threading: Threading = Threading::parse(None).unwrap();
        assert_eq!(threading.threads(), num_cpus::get());
        assert_eq!(Threading::parse(Some("4,2")).unwrap().threads(), 4);
        assert!(Threading::parse(Some("0")).is_err());
        assert!(Threading::parse(Some("many")).is_err());
    }

    #[test]
    fn seed_and_cap() {
        let cfg: BenchConfig =
            BenchConfig::from_lookup(false, lookup(&[(ENV_SEED, "42"), (ENV_MAX_LOG_LEN, "12")])).unwrap();
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.max_log_len, 12);
        assert!(BenchConfig::from_lookup(false, lookup(&[(ENV_SEED, "-1")])).is_err());
    }

    #[test]
    fn cap_beyond_u32_is_rejected() {
        for value in ["4294967297", "4294967296", "0"] {
            assert_eq!(
                BenchConfig::from_lookup(false, lookup(&[(ENV_MAX_LOG_LEN, value)])),
                Err(ConfigError::InvalidInteger {
                    var: ENV_MAX_LOG_LEN,
                    value: value.to_string()
                })
            );
        }
        let cfg: BenchConfig =
            BenchConfig::from_lookup(false, lookup(&[(ENV_MAX_LOG_LEN, "4294967295")])).unwrap();
        assert_eq!(cfg.max_log_len, u32::MAX);
    }
}
