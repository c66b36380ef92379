//! Run configuration assembled from the command line and the environment.
//!
//! | Source              | Setting                                  |
//! |---------------------|------------------------------------------|
//! | first argument      | operations script (required)             |
//! | `COUNTY_DATA`       | `.json` / `.csv` dataset (optional)      |
//! | `RUST_LOG`          | log verbosity, read by `env_logger`      |

use std::ffi::OsString;
use std::path::PathBuf;

use crate::error::ConfigError;

/// Environment variable naming a dataset file to use instead of the
/// built-in one.
pub const DATA_PATH_VAR: &str = "COUNTY_DATA";

/// Printed when the operations file argument is missing.
pub const USAGE: &str = "Usage: county-report <operations_file>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Script of operations to execute.
    pub operations_path: PathBuf,
    /// Dataset file; `None` selects the built-in dataset.
    pub data_path: Option<PathBuf>,
}

impl Config {
    /// Read the process arguments and [`DATA_PATH_VAR`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_parts(
            std::env::args_os().skip(1),
            std::env::var_os(DATA_PATH_VAR),
        )
    }

    /// Build a config from positional arguments (program name excluded) and
    /// the raw value of [`DATA_PATH_VAR`]. Extra arguments are ignored and an
    /// empty data path counts as unset.
    pub fn from_parts<I, A>(args: I, data_path: Option<OsString>) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        let operations_path = args
            .into_iter()
            .next()
            .map(|a| PathBuf::from(a.into()))
            .ok_or(ConfigError::MissingOperationsFile)?;

        let data_path = data_path.filter(|p| !p.is_empty()).map(PathBuf::from);

        Ok(Self {
            operations_path,
            data_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_argument_is_the_script() {
        let config = Config::from_parts(["ops.txt", "ignored"], None).unwrap();
        assert_eq!(config.operations_path, PathBuf::from("ops.txt"));
        assert_eq!(config.data_path, None);
    }

    #[test]
    fn missing_argument_is_an_error() {
        let args: [&str; 0] = [];
        assert_eq!(
            Config::from_parts(args, None),
            Err(ConfigError::MissingOperationsFile)
        );
    }

    #[test]
    fn data_path_from_environment_value() {
        let config =
            Config::from_parts(["ops.txt"], Some(OsString::from("counties.csv"))).unwrap();
        assert_eq!(config.data_path, Some(PathBuf::from("counties.csv")));

        let config = Config::from_parts(["ops.txt"], Some(OsString::new())).unwrap();
        assert_eq!(config.data_path, None);
    }
}
