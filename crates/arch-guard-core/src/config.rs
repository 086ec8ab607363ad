//! Configuration model: DTO deserialization and validated domain type.

use crate::pattern::{compile_pattern, CompileError, DollarMode, Pattern, PatternGroup, PatternList, PatternMap};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Default value for [`Configuration::god`] when the config omits `god`
/// and `no_god` is not set.
const DEFAULT_GOD_PACKAGE: &str = "main";

/// Default value for [`Configuration::size`] when the config omits `size`
/// or sets it to zero.
const DEFAULT_SIZE: u32 = 2048;

/// Raw, unvalidated configuration as deserialized from TOML.
///
/// Field names match the configuration file's keys exactly; see
/// [`Configuration::parse`] for how this is turned into compiled patterns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigDto {
    /// `allowOnlyIn` table: package-pattern to the only packages it may
    /// import, restricting even otherwise-permitted role-based imports.
    #[serde(default, rename = "allowOnlyIn")]
    pub allow_only_in: BTreeMap<String, Vec<String>>,
    /// `allowAdditionally` table: package-pattern to packages it may import
    /// on top of its role's normal permissions.
    #[serde(default, rename = "allowAdditionally")]
    pub allow_additionally: BTreeMap<String, Vec<String>>,
    /// `tool` list: patterns identifying tool packages.
    #[serde(default)]
    pub tool: Vec<String>,
    /// `db` list: patterns identifying database packages.
    #[serde(default)]
    pub db: Vec<String>,
    /// `god` list: patterns identifying god packages.
    #[serde(default)]
    pub god: Vec<String>,
    /// `size` maximum package size in non-comment source bytes (0 = use
    /// the default).
    #[serde(default)]
    pub size: u32,
    /// `noGod` suppresses the `god = ["main"]` default when true.
    #[serde(default, rename = "noGod")]
    pub no_god: bool,
}

/// Errors returned while validating a [`ConfigDto`] into a [`Configuration`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A pattern in one of the simple lists (`tool`, `db`, `god`) failed
    /// to compile.
    #[error("invalid pattern in `{key}` list: {source}")]
    InvalidListPattern {
        /// The configuration key the offending pattern came from.
        key: &'static str,
        /// The underlying compile error.
        #[source]
        source: CompileError,
    },
    /// A key pattern in `allowOnlyIn`/`allowAdditionally` failed to compile.
    #[error("invalid key pattern `{pattern}` in `{key}` map: {source}")]
    InvalidMapKeyPattern {
        /// The configuration key the offending pattern came from.
        key: &'static str,
        /// The offending key pattern text.
        pattern: String,
        /// The underlying compile error.
        #[source]
        source: CompileError,
    },
    /// A value pattern in `allowOnlyIn`/`allowAdditionally` failed to
    /// compile (typically a `$N` index out of range for its key).
    #[error("invalid value pattern for key `{pattern}` in `{key}` map: {source}")]
    InvalidMapValuePattern {
        /// The configuration key the offending pattern came from.
        key: &'static str,
        /// The key pattern this value list is paired with.
        pattern: String,
        /// The underlying compile error.
        #[source]
        source: CompileError,
    },
    /// Reading the config file from disk failed.
    #[error("unable to read configuration file {path}: {source}")]
    Io {
        /// The path that could not be read.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Parsing the file contents as TOML failed.
    #[error("unable to parse configuration as TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// The validated, compiled configuration used to drive the dependency
/// checker.
#[derive(Debug, Clone)]
pub struct Configuration {
    /// Restricts matching packages to importing only what's listed, in
    /// addition to (not instead of) role-based permissions being withheld
    /// for anything not listed. See spec for precedence over role checks.
    pub allow_only_in: PatternMap,
    /// Grants matching packages additional import permissions on top of
    /// their role's normal allowance.
    pub allow_additionally: PatternMap,
    /// Patterns identifying tool packages.
    pub tool: PatternList,
    /// Patterns identifying database packages.
    pub db: PatternList,
    /// Patterns identifying god packages.
    pub god: PatternList,
    /// Maximum package size in non-comment source bytes.
    pub size: u32,
    /// Suppresses the `god = ["main"]` default.
    pub no_god: bool,
}

impl Configuration {
    /// Validates and compiles a [`ConfigDto`] into a [`Configuration`],
    /// applying the `god` and `size` defaults documented on
    /// [`DEFAULT_GOD_PACKAGE`] and [`DEFAULT_SIZE`].
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any pattern in the DTO fails to
    /// compile.
    pub fn parse(mut dto: ConfigDto) -> Result<Self, ConfigError> {
        if !dto.no_god && dto.god.is_empty() {
            dto.god = vec![DEFAULT_GOD_PACKAGE.to_string()];
        }
        if dto.size == 0 {
            dto.size = DEFAULT_SIZE;
        }

        let tool = PatternList::from_simple(&dto.tool).map_err(|source| ConfigError::InvalidListPattern {
            key: "tool",
            source,
        })?;
        let db = PatternList::from_simple(&dto.db).map_err(|source| ConfigError::InvalidListPattern {
            key: "db",
            source,
        })?;
        let god = PatternList::from_simple(&dto.god).map_err(|source| ConfigError::InvalidListPattern {
            key: "god",
            source,
        })?;

        let allow_only_in = compile_pattern_map(&dto.allow_only_in, "allowOnlyIn")?;
        let allow_additionally = compile_pattern_map(&dto.allow_additionally, "allowAdditionally")?;

        Ok(Self {
            allow_only_in,
            allow_additionally,
            tool,
            db,
            god,
            size: dto.size,
            no_god: dto.no_god,
        })
    }

    /// Parses a configuration from TOML source text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] on malformed TOML, or a pattern
    /// compile error as in [`Self::parse`].
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        let dto: ConfigDto = toml::from_str(src)?;
        Self::parse(dto)
    }

    /// Loads and parses a configuration from a TOML file on disk.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or any
    /// error from [`Self::from_toml_str`] otherwise.
    pub fn from_toml_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Builds the default configuration (no restrictions, `god = ["main"]`,
    /// `size = 2048`), equivalent to parsing an empty TOML document.
    ///
    /// # Panics
    ///
    /// Never panics: the default DTO always compiles.
    #[must_use]
    pub fn default_config() -> Self {
        #[allow(clippy::unwrap_used)]
        Self::parse(ConfigDto::default()).unwrap()
    }
}

fn compile_pattern_map(
    raw: &BTreeMap<String, Vec<String>>,
    key: &'static str,
) -> Result<PatternMap, ConfigError> {
    let mut map = PatternMap::new();
    for (k, values) in raw {
        let (left, key_captures) =
            compile_pattern(k, DollarMode::KeyStars).map_err(|source| ConfigError::InvalidMapKeyPattern {
                key,
                pattern: k.clone(),
                source,
            })?;

        let mut right_patterns: Vec<Pattern> = Vec::with_capacity(values.len());
        for v in values {
            let (p, _) = compile_pattern(v, DollarMode::ValueDigits { key_captures }).map_err(|source| {
                ConfigError::InvalidMapValuePattern {
                    key,
                    pattern: k.clone(),
                    source,
                }
            })?;
            right_patterns.push(p);
        }

        map.insert(
            k.clone(),
            PatternGroup {
                left,
                right: PatternList::from_compiled(right_patterns),
            },
        );
    }
    Ok(map)
}
