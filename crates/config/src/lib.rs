//! Configuration for arm5.
//!
//! Values are layered, each source overriding the one before it:
//!
//! 1. Built-in defaults,
//! 2. a TOML file (by default `config.toml` in the platform configuration
//!    directory),
//! 3. environment variables prefixed with `ARM5_`, with `__` separating
//!    nested keys (e.g. `ARM5_INTEGRITY__ON_ERROR=warn`).
//!
//! ```toml
//! [integrity]
//! algorithm = "sha256"
//! on_error = "raise"
//! hash_on_write = true
//! ```

pub mod error;

use arm5_hashio::{Algorithm, HashOpener, OnError};
use directories::ProjectDirs;
use exn::{OptionExt, ResultExt};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ErrorKind, Result};

/// Prefix of the environment variables read by [`Config::figment`].
pub const ENV_PREFIX: &str = "ARM5_";
/// Name of the configuration file inside the configuration directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub integrity: IntegrityConfig,
}

/// How generated files are checked and re-hashed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct IntegrityConfig {
    /// Digest algorithm, also the digest file extension.
    pub algorithm: Algorithm,
    /// What to do with files that were modified since they were generated.
    pub on_error: OnError,
    /// Whether to store a fresh digest after every write.
    pub hash_on_write: bool,
}
impl Default for IntegrityConfig {
    fn default() -> Self {
        let opener = HashOpener::default();
        Self {
            algorithm: opener.get_algorithm(),
            on_error: opener.get_on_error(),
            hash_on_write: opener.get_hash_on_write(),
        }
    }
}
impl IntegrityConfig {
    /// An opener that behaves as configured.
    pub fn opener(&self) -> HashOpener {
        HashOpener::new().algorithm(self.algorithm).on_error(self.on_error).hash_on_write(self.hash_on_write)
    }
}

impl Config {
    /// Default location of the configuration file.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "arm5").ok_or_raise(|| ErrorKind::NoConfigDir)?;
        Ok(dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// All configuration sources, layered: defaults, the TOML file at `path`
    /// (skipped if it doesn't exist), then the environment.
    pub fn figment(path: impl AsRef<Path>) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Extract and validate a configuration from `figment`.
    pub fn from_figment(figment: &Figment) -> Result<Self> {
        figment.extract().or_raise(|| ErrorKind::Invalid)
    }

    /// Load the configuration from `path`, or from [`default_path`](Self::default_path).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()?,
        };
        let config = Self::from_figment(&Self::figment(&path))?;
        tracing::debug!(
            path = %path.display(),
            algorithm = %config.integrity.algorithm,
            on_error = %config.integrity.on_error,
            hash_on_write = config.integrity.hash_on_write,
            "Loaded configuration"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn from_toml(contents: &str) -> Result<Config> {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, contents).unwrap();
        Config::from_figment(&Figment::from(Serialized::defaults(Config::default())).merge(Toml::file(&path)))
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.integrity.algorithm, Algorithm::Sha256);
        assert_eq!(config.integrity.on_error, OnError::Raise);
        assert!(config.integrity.hash_on_write);
        assert_eq!(config.integrity.opener(), HashOpener::new());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = Config::from_figment(
            &Figment::from(Serialized::defaults(Config::default())).merge(Toml::file(temp_dir.path().join("nope.toml"))),
        )
        .unwrap();
        assert_eq!(config, Config::default());
    }

    #[rstest]
    #[case("[integrity]\nalgorithm = \"blake3\"\n", Algorithm::Blake3, OnError::Raise, true)]
    #[case("[integrity]\non_error = \"warn\"\nhash_on_write = false\n", Algorithm::Sha256, OnError::Warn, false)]
    #[case("[integrity]\nalgorithm = \"SHA512\"\non_error = \"ignore\"\n", Algorithm::Sha512, OnError::Ignore, true)]
    #[case("[integrity]\non_error = \"Warn\"\n", Algorithm::Sha256, OnError::Warn, true)]
    fn test_from_toml(
        #[case] contents: &str,
        #[case] algorithm: Algorithm,
        #[case] on_error: OnError,
        #[case] hash_on_write: bool,
    ) {
        let config = from_toml(contents).unwrap();
        assert_eq!(config.integrity, IntegrityConfig { algorithm, on_error, hash_on_write });
        let opener = config.integrity.opener();
        assert_eq!(opener.get_algorithm(), algorithm);
        assert_eq!(opener.get_on_error(), on_error);
        assert_eq!(opener.get_hash_on_write(), hash_on_write);
    }

    #[rstest]
    #[case("[integrity]\nalgorithm = \"md5\"\n")]
    #[case("[integrity]\non_error = \"explode\"\n")]
    #[case("[integrity]\nhash_on_write = \"sometimes\"\n")]
    fn test_invalid_toml(#[case] contents: &str) {
        let err = from_toml(contents).unwrap_err();
        assert_eq!(*err, ErrorKind::Invalid);
    }

    #[test]
    fn test_load_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE_NAME, "[integrity]\nalgorithm = \"sha384\"\non_error = \"warn\"\n")?;
            let config = Config::load(Some(Path::new(CONFIG_FILE_NAME))).unwrap();
            assert_eq!(
                config.integrity,
                IntegrityConfig { algorithm: Algorithm::Sha384, on_error: OnError::Warn, hash_on_write: true }
            );
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE_NAME, "[integrity]\nalgorithm = \"sha384\"\non_error = \"raise\"\n")?;
            jail.set_env("ARM5_INTEGRITY__ON_ERROR", "warn");
            jail.set_env("ARM5_INTEGRITY__HASH_ON_WRITE", "false");
            let config = Config::load(Some(Path::new(CONFIG_FILE_NAME))).unwrap();
            assert_eq!(
                config.integrity,
                IntegrityConfig { algorithm: Algorithm::Sha384, on_error: OnError::Warn, hash_on_write: false }
            );
            Ok(())
        });
    }

    #[test]
    fn test_env_without_file() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("ARM5_INTEGRITY__ALGORITHM", "BLAKE3");
            let config = Config::load(Some(Path::new("missing.toml"))).unwrap();
            assert_eq!(config.integrity.algorithm, Algorithm::Blake3);
            assert_eq!(config.integrity.on_error, OnError::Raise);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_env() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("ARM5_INTEGRITY__ON_ERROR", "explode");
            let err = Config::load(Some(Path::new("missing.toml"))).unwrap_err();
            assert_eq!(*err, ErrorKind::Invalid);
            Ok(())
        });
    }
}
