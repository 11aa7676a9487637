//! Ambient settings for the CLI: logging and the input size limit.
//!
//! Nothing here changes how numbers are summed. Sources are merged with
//! figment, later ones winning:
//!
//! 1. `~/.config/strcalc/config.<ext>`
//! 2. `.strcalc.<ext>` then `strcalc.<ext>`, from the nearest directory at or
//!    above the working directory that has either (never above a `.git` root)
//! 3. the file passed with `--config`
//! 4. `STRCALC_*` environment variables
//!
//! `<ext>` is `toml`, `yaml`, `yml` or `json`.

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

const APP_NAME: &str = "strcalc";
const ENV_PREFIX: &str = "STRCALC_";
const EXTENSIONS: [&str; 4] = ["toml", "yaml", "yml", "json"];
const REPO_MARKER: &str = ".git";

/// Settings read from config files and the environment.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Level used when neither `RUST_LOG` nor `-q`/`-v` decide.
    pub log_level: LogLevel,
    /// Directory for the JSONL log file. No file is written when unset.
    pub log_dir: Option<Utf8PathBuf>,
    /// Largest accepted input; defaults to
    /// [`DEFAULT_MAX_INPUT_BYTES`](crate::DEFAULT_MAX_INPUT_BYTES).
    pub max_input_bytes: Option<usize>,
    /// Accept input of any size, ignoring `max_input_bytes`.
    pub disable_input_limit: bool,
}

impl Config {
    /// The input limit to enforce, or `None` when disabled.
    pub fn input_limit(&self) -> Option<usize> {
        (!self.disable_input_limit)
            .then(|| self.max_input_bytes.unwrap_or(crate::DEFAULT_MAX_INPUT_BYTES))
    }
}

/// Default log verbosity.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Debug events, including resolved delimiters.
    Debug,
    /// Informational events.
    #[default]
    Info,
    /// Warnings and errors.
    Warn,
    /// Errors only.
    Error,
}

impl LogLevel {
    /// Lowercase name, usable as an `EnvFilter` directive.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Config files that were merged, in merge order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// Every file merged; the last one has the final say.
    pub files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// The file that was merged last, if any.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.files.last().map(Utf8PathBuf::as_path)
    }
}

/// Collects config sources for [`ConfigLoader::load`].
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    user_dir: Option<Utf8PathBuf>,
    search_from: Option<Utf8PathBuf>,
    explicit: Option<Utf8PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// A loader that reads the platform user config directory.
    pub fn new() -> Self {
        Self {
            user_dir: user_config_dir(),
            search_from: None,
            explicit: None,
        }
    }

    /// Skip the user config directory.
    pub fn without_user_config(mut self) -> Self {
        self.user_dir = None;
        self
    }

    /// Look for project config at `dir` and its ancestors.
    pub fn search_from(mut self, dir: impl AsRef<Utf8Path>) -> Self {
        self.search_from = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Merge `path` after discovered files, as `--config` does.
    pub fn explicit(mut self, path: impl AsRef<Utf8Path>) -> Self {
        self.explicit = Some(path.as_ref().to_path_buf());
        self
    }

    /// Merge every source over the defaults.
    #[tracing::instrument(skip(self), fields(search_from = ?self.search_from))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        let mut files = Vec::new();
        if let Some(found) = self.user_dir.as_deref().and_then(user_file) {
            files.push(found);
        }
        if let Some(ref start) = self.search_from {
            files.extend(project_files(start));
        }
        files.extend(self.explicit);

        let figment = files
            .iter()
            .fold(Figment::from(Serialized::defaults(Config::default())), merge_file)
            .merge(Env::prefixed(ENV_PREFIX).lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        tracing::debug!(
            files = files.len(),
            log_level = config.log_level.as_str(),
            "configuration loaded"
        );
        Ok((config, ConfigSources { files }))
    }
}

fn user_config_dir() -> Option<Utf8PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", APP_NAME)?;
    Utf8PathBuf::from_path_buf(dirs.config_dir().to_path_buf()).ok()
}

fn user_file(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("config.{ext}")))
        .find(|path| path.is_file())
}

/// Config files in the nearest directory holding any, dotfiles first.
fn project_files(start: &Utf8Path) -> Vec<Utf8PathBuf> {
    for dir in start.ancestors() {
        let found: Vec<Utf8PathBuf> = [format!(".{APP_NAME}"), APP_NAME.to_string()]
            .iter()
            .flat_map(|stem| EXTENSIONS.map(|ext| dir.join(format!("{stem}.{ext}"))))
            .filter(|path| path.is_file())
            .collect();
        if !found.is_empty() {
            return found;
        }
        if dir.join(REPO_MARKER).exists() {
            break;
        }
    }
    Vec::new()
}

fn merge_file(figment: Figment, path: &Utf8PathBuf) -> Figment {
    match path.extension() {
        Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_str())),
        Some("json") => figment.merge(Json::file_exact(path.as_str())),
        _ => figment.merge(Toml::file_exact(path.as_str())),
    }
}
