use config::{Config as ConfigBuilder, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::aggregate::AggregatorStrategy;
use crate::errors::{EnumerateError, EnumerateResult};
use crate::filters::DEFAULT_VCS_DIRS;

/// Configuration for enumeration and the picker.
///
/// # Configuration Locations
///
/// The configuration can be loaded from multiple locations, later ones
/// overriding earlier ones:
/// 1. Global `$HOME/.config/zfind/config.yaml`
/// 2. Local `.zfind.yaml` in the current directory
/// 3. Custom config file specified via `--config` flag
///
/// # Configuration Format
///
/// ```yaml
/// # Root directory to enumerate
/// root_path: "."
///
/// # How walker threads hand paths over (channel, lock, auto)
/// strategy: "auto"
///
/// # Bounded queue size for the channel strategy
/// channel_capacity: 1000
///
/// # Probe size at which `auto` switches from lock to channel
/// auto_threshold: 500
///
/// # Directories pruned with their whole subtree
/// vcs_dirs: [".git", ".hg", ".svn"]
///
/// follow_links: true
/// respect_gitignore: false
/// thread_count: 8
/// list_height: 24
///
/// # Log level (trace, debug, info, warn, error)
/// log_level: "warn"
/// log_file: "debug.log"
/// ```
///
/// Command-line arguments take precedence over config file values; see
/// `merge_with_cli`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZfindConfig {
    /// Root directory to enumerate
    #[serde(default = "default_root_path")]
    pub root_path: PathBuf,

    /// Aggregation strategy used while walking
    #[serde(default)]
    pub strategy: AggregatorStrategy,

    /// Capacity of the bounded queue used by the channel strategy
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,

    /// Number of entries the `auto` probe must reach to pick the channel strategy
    #[serde(default = "default_auto_threshold")]
    pub auto_threshold: usize,

    /// Directory names treated as version-control metadata
    #[serde(default = "default_vcs_dirs")]
    pub vcs_dirs: Vec<String>,

    /// Whether symbolic links are followed
    #[serde(default = "default_true")]
    pub follow_links: bool,

    /// Whether `.gitignore` rules hide files
    #[serde(default)]
    pub respect_gitignore: bool,

    /// Number of walker threads
    /// Defaults to number of CPU cores if not specified
    #[serde(default = "default_thread_count")]
    pub thread_count: NonZeroUsize,

    /// Number of rows shown by the picker
    #[serde(default = "default_list_height")]
    pub list_height: usize,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// File receiving log output; stderr when unset
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_root_path() -> PathBuf {
    PathBuf::from(".")
}

fn default_channel_capacity() -> usize {
    1000
}

fn default_auto_threshold() -> usize {
    500
}

fn default_vcs_dirs() -> Vec<String> {
    DEFAULT_VCS_DIRS.iter().map(|d| d.to_string()).collect()
}

fn default_true() -> bool {
    true
}

fn default_thread_count() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN)
}

fn default_list_height() -> usize {
    24
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for ZfindConfig {
    fn default() -> Self {
        Self {
            root_path: default_root_path(),
            strategy: AggregatorStrategy::default(),
            channel_capacity: default_channel_capacity(),
            auto_threshold: default_auto_threshold(),
            vcs_dirs: default_vcs_dirs(),
            follow_links: true,
            respect_gitignore: false,
            thread_count: default_thread_count(),
            list_height: default_list_height(),
            log_level: default_log_level(),
            log_file: None,
        }
    }
}

/// Values supplied on the command line; `None` leaves the file value alone
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub root_path: Option<PathBuf>,
    pub strategy: Option<AggregatorStrategy>,
    pub channel_capacity: Option<usize>,
    pub thread_count: Option<NonZeroUsize>,
    pub no_follow: bool,
    pub respect_gitignore: bool,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl ZfindConfig {
    /// Loads configuration from the default locations plus a specific file
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        let config_files = [
            dirs::config_dir().map(|p| p.join("zfind/config.yaml")),
            Some(PathBuf::from(".zfind.yaml")),
        ];

        for path in config_files.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        // An explicitly requested file must exist
        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder.build()?.try_deserialize()
    }

    /// Merges CLI arguments with configuration file values
    pub fn merge_with_cli(mut self, cli: CliOverrides) -> Self {
        if let Some(root) = cli.root_path {
            self.root_path = root;
        }
        if let Some(strategy) = cli.strategy {
            self.strategy = strategy;
        }
        if let Some(capacity) = cli.channel_capacity {
            self.channel_capacity = capacity;
        }
        if let Some(threads) = cli.thread_count {
            self.thread_count = threads;
        }
        if cli.no_follow {
            self.follow_links = false;
        }
        if cli.respect_gitignore {
            self.respect_gitignore = true;
        }
        if let Some(level) = cli.log_level {
            self.log_level = level;
        }
        if cli.log_file.is_some() {
            self.log_file = cli.log_file;
        }
        self
    }

    /// Rejects values that would make enumeration or the picker unusable
    pub fn validate(&self) -> EnumerateResult<()> {
        if self.channel_capacity == 0 {
            return Err(EnumerateError::config_error(
                "channel_capacity must be greater than zero",
            ));
        }
        if self.list_height == 0 {
            return Err(EnumerateError::config_error(
                "list_height must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Renders the configuration in the same YAML format it is loaded from
    pub fn to_yaml(&self) -> EnumerateResult<String> {
        serde_yaml::to_string(self).map_err(|e| {
            EnumerateError::config_error(format!("Failed to serialize configuration: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_load_config_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.yaml");
        let config_content = r#"
            root_path: "src"
            strategy: "lock"
            channel_capacity: 64
            auto_threshold: 2000
            vcs_dirs: [".git", "_darcs"]
            follow_links: false
            respect_gitignore: true
            thread_count: 4
            list_height: 10
            log_level: "debug"
            log_file: "zfind.log"
        "#;

        let mut file = File::create(&config_path).unwrap();
        file.write_all(config_content.as_bytes()).unwrap();

        let config = ZfindConfig::load_from(Some(&config_path)).unwrap();
        assert_eq!(config.root_path, PathBuf::from("src"));
        assert_eq!(config.strategy, AggregatorStrategy::Lock);
        assert_eq!(config.channel_capacity, 64);
        assert_eq!(config.auto_threshold, 2000);
        assert_eq!(config.vcs_dirs, vec![".git", "_darcs"]);
        assert!(!config.follow_links);
        assert!(config.respect_gitignore);
        assert_eq!(config.thread_count, NonZeroUsize::new(4).unwrap());
        assert_eq!(config.list_height, 10);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_file, Some(PathBuf::from("zfind.log")));
    }

    #[test]
    fn test_default_values() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.yaml");
        let mut file = File::create(&config_path).unwrap();
        file.write_all(b"root_path: \".\"\n").unwrap();

        let config = ZfindConfig::load_from(Some(&config_path)).unwrap();
        assert_eq!(config.root_path, PathBuf::from("."));
        assert_eq!(config.strategy, AggregatorStrategy::Auto);
        assert_eq!(config.channel_capacity, 1000);
        assert_eq!(config.auto_threshold, 500);
        assert_eq!(config.vcs_dirs, vec![".git", ".hg", ".svn"]);
        assert!(config.follow_links);
        assert!(!config.respect_gitignore);
        assert_eq!(
            config.thread_count,
            NonZeroUsize::new(num_cpus::get()).unwrap()
        );
        assert_eq!(config.list_height, 24);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn test_merge_with_cli() {
        let file_config = ZfindConfig {
            root_path: PathBuf::from("src"),
            strategy: AggregatorStrategy::Lock,
            channel_capacity: 64,
            log_file: Some(PathBuf::from("file.log")),
            ..ZfindConfig::default()
        };

        let merged = file_config.clone().merge_with_cli(CliOverrides {
            root_path: Some(PathBuf::from("tests")),
            strategy: Some(AggregatorStrategy::Channel),
            thread_count: Some(NonZeroUsize::new(2).unwrap()),
            no_follow: true,
            log_level: Some("trace".to_string()),
            ..CliOverrides::default()
        });

        assert_eq!(merged.root_path, PathBuf::from("tests")); // CLI value
        assert_eq!(merged.strategy, AggregatorStrategy::Channel); // CLI value
        assert_eq!(merged.channel_capacity, 64); // File value (CLI None)
        assert_eq!(merged.thread_count, NonZeroUsize::new(2).unwrap());
        assert!(!merged.follow_links);
        assert!(!merged.respect_gitignore);
        assert_eq!(merged.log_level, "trace");
        assert_eq!(merged.log_file, Some(PathBuf::from("file.log")));

        // Empty overrides leave everything untouched
        let untouched = file_config.clone().merge_with_cli(CliOverrides::default());
        assert_eq!(untouched, file_config);
    }

    #[test]
    fn test_validate() {
        assert!(ZfindConfig::default().validate().is_ok());

        let config = ZfindConfig {
            channel_capacity: 0,
            ..ZfindConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(EnumerateError::ConfigError(_))
        ));

        let config = ZfindConfig {
            list_height: 0,
            ..ZfindConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_config() {
        let config_content = r#"
            strategy: "sometimes"
            thread_count: "invalid"
        "#;

        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.yaml");
        let mut file = File::create(&config_path).unwrap();
        file.write_all(config_content.as_bytes()).unwrap();

        let result = ZfindConfig::load_from(Some(&config_path));
        assert!(result.is_err(), "Expected error loading invalid config");
    }

    #[test]
    fn test_yaml_can_be_loaded_back() {
        let config = ZfindConfig {
            strategy: AggregatorStrategy::Channel,
            channel_capacity: 42,
            vcs_dirs: vec![".git".to_string()],
            log_file: Some(PathBuf::from("zfind.log")),
            ..ZfindConfig::default()
        };
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("strategy: channel"));

        let dir = tempdir().unwrap();
        let config_path = dir.path().join("saved.yaml");
        std::fs::write(&config_path, yaml).unwrap();
        assert_eq!(ZfindConfig::load_from(Some(&config_path)).unwrap(), config);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ZfindConfig::load_from(Some(Path::new("nonexistent.yaml")));
        assert!(result.is_err());
    }
}
