//! Service configuration, parsed from `--flag value` command-line pairs.

use crate::counter::cache::MissingResourcePolicy;

use anyhow::{anyhow, Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_RESOURCE_ROOT: &str = "resources";
pub const DEFAULT_RESOURCE: &str = "data.txt";

pub const USAGE: &str = "Usage: word_counter [--bind <addr:port>] [--resources <dir>] \
[--default-resource <name>] [--missing-resource <empty|fail>]";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Address the HTTP server listens on.
    pub bind: SocketAddr,
    /// Directory resource identifiers are resolved against.
    pub resource_root: PathBuf,
    /// Resource queried when a request does not name one.
    pub default_resource: String,
    pub missing_resource: MissingResourcePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.parse().expect("default bind address is valid"),
            resource_root: PathBuf::from(DEFAULT_RESOURCE_ROOT),
            default_resource: DEFAULT_RESOURCE.to_string(),
            missing_resource: MissingResourcePolicy::default(),
        }
    }
}

impl Config {
    /// Parses arguments, excluding the program name.
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let args: Vec<String> = args.into_iter().collect();
        let mut config = Config::default();

        let mut i = 0;
        while i < args.len() {
            let flag = args[i].as_str();
            let value = args
                .get(i + 1)
                .ok_or_else(|| anyhow!("{} requires a value", flag))?;

            match flag {
                "--bind" => {
                    config.bind = value
                        .parse()
                        .with_context(|| format!("invalid --bind address '{}'", value))?;
                }
                "--resources" => {
                    config.resource_root = PathBuf::from(value);
                }
                "--default-resource" => {
                    if value.is_empty() {
                        return Err(anyhow!("--default-resource must not be empty"));
                    }
                    config.default_resource = value.clone();
                }
                "--missing-resource" => {
                    config.missing_resource = value.parse().map_err(|e: String| anyhow!(e))?;
                }
                _ => return Err(anyhow!("unknown argument '{}'", flag)),
            }
            i += 2;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults_without_arguments() {
        let config = Config::from_args(Vec::new()).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.default_resource, "data.txt");
        assert_eq!(config.missing_resource, MissingResourcePolicy::Empty);
        assert_eq!(config.bind.port(), 8080);
    }

    #[test]
    fn test_all_flags() {
        let config = Config::from_args(args(&[
            "--bind",
            "0.0.0.0:9000",
            "--resources",
            "/srv/texts",
            "--default-resource",
            "lorem.txt",
            "--missing-resource",
            "fail",
        ]))
        .unwrap();

        assert_eq!(config.bind, "0.0.0.0:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.resource_root, PathBuf::from("/srv/texts"));
        assert_eq!(config.default_resource, "lorem.txt");
        assert_eq!(config.missing_resource, MissingResourcePolicy::Fail);
    }

    #[test]
    fn test_missing_value_is_error() {
        let err = Config::from_args(args(&["--bind"])).unwrap_err();
        assert!(err.to_string().contains("requires a value"));
    }

    #[test]
    fn test_unknown_flag_is_error() {
        let err = Config::from_args(args(&["--verbose", "yes"])).unwrap_err();
        assert!(err.to_string().contains("unknown argument"));
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(Config::from_args(args(&["--bind", "not-an-address"])).is_err());
        assert!(Config::from_args(args(&["--missing-resource", "ignore"])).is_err());
        assert!(Config::from_args(args(&["--default-resource", ""])).is_err());
    }

    #[test]
    fn test_policy_is_case_insensitive() {
        let config = Config::from_args(args(&["--missing-resource", "FAIL"])).unwrap();
        assert_eq!(config.missing_resource, MissingResourcePolicy::Fail);
    }
}
