use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::constants::{canvas, icons::{MAX_PADDING, MAX_SIZE}, paths};
use crate::icon_spec::IconSpec;

/// Icon manifest. Every field is optional in YAML, missing ones fall back to the
/// built-in table.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default = "default_background")]
    pub background: [u8; 4],
    #[serde(default = "IconSpec::defaults")]
    pub icons: Vec<IconSpec>,
}

fn default_source() -> String {
    paths::SOURCE_SVG.to_string()
}

fn default_background() -> [u8; 4] {
    canvas::BACKGROUND
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source: default_source(),
            background: default_background(),
            icons: IconSpec::defaults(),
        }
    }
}

impl Config {
    /// Asset directory used when `--public-dir` isn't given: `../public` next to this tool
    pub fn default_public_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join(paths::PUBLIC_DIR)
    }

    /// Load a manifest, or the built-in defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Config::default(),
        };

        config.validate()?;

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.source.is_empty() {
            bail!("source cannot be empty");
        }
        if self.source.contains(['/', '\\']) {
            bail!("source '{}' must be a file name inside the public directory", self.source);
        }

        if self.icons.is_empty() {
            bail!("at least one icon must be configured");
        }

        let mut seen = HashSet::new();
        for icon in &self.icons {
            if icon.name.is_empty() {
                bail!("icon name cannot be empty");
            }
            if icon.name.contains(['/', '\\']) {
                bail!("icon name '{}' must be a plain file name", icon.name);
            }
            if !seen.insert(icon.name.as_str()) {
                bail!("icon name '{}' is listed more than once", icon.name);
            }

            if icon.size == 0 {
                bail!("icon '{}': size must be greater than 0", icon.name);
            }
            if icon.size > MAX_SIZE {
                bail!("icon '{}': size must be <= {}", icon.name, MAX_SIZE);
            }

            if !icon.padding.is_finite() || icon.padding < 0.0 {
                bail!("icon '{}': padding must be >= 0.0", icon.name);
            }
            if icon.padding >= MAX_PADDING {
                bail!("icon '{}': padding must be < {}", icon.name, MAX_PADDING);
            }

            if icon.inner_size() == 0 {
                bail!(
                    "icon '{}': padding {} leaves no room for artwork at {}px",
                    icon.name,
                    icon.padding,
                    icon.size
                );
            }
        }

        Ok(())
    }

    /// Write this manifest as YAML, refusing to replace an existing file
    pub fn save_new(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)
            .context("Failed to serialize config")?;

        let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                bail!("Config file already exists: {}", path.display());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to create config file {}", path.display()));
            }
        };

        file.write_all(yaml.as_bytes())
            .with_context(|| format!("Failed to write config file {}", path.display()))?;

        Ok(())
    }
}
