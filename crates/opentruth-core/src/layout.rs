//! Agent layout: the local resources a healthy agent is expected to have.
//!
//! `AgentLayout` pairs a root directory with a `LayoutConfig` read from TOML.
//! Every configured path is resolved against the root, so the same config
//! works wherever the agent's working tree lives.
//!
//! Example `opentruth.toml`:
//!
//! ```toml
//! [primary]
//! name = "has_soul"
//! path = "SOUL.md"
//! presence = "exists"
//!
//! [[advisory]]
//! name = "has_truth_dir"
//! path = ".truth"
//! presence = "directory"
//!
//! [ledger]
//! dir = "history/proofs"
//! file = "self_verification.jsonl"
//! ```
//!
//! A file that omits a section keeps that section's defaults. A file that
//! lists any `[[advisory]]` entries replaces the default advisory list;
//! without them, `has_proofs_dir` follows whatever `[ledger] dir` is set to.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use opentruth_contracts::error::{OpenTruthError, OpenTruthResult};

/// Name of the layout file picked up from the root when no explicit path is
/// given.
pub const DEFAULT_CONFIG_FILE: &str = "opentruth.toml";

/// How a resource counts as present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Presence {
    /// Anything at the path: file, directory, or a symlink to either.
    #[default]
    Exists,
    File,
    Directory,
}

impl Presence {
    /// Probe `path`. Never fails: an unreadable or missing path is absent.
    pub fn probe(self, path: &Path) -> bool {
        match self {
            Self::Exists => path.exists(),
            Self::File => path.is_file(),
            Self::Directory => path.is_dir(),
        }
    }
}

/// A named resource the self-check probes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Check name as it appears in the proof's `details` (e.g. `has_soul`).
    pub name: String,
    /// Path relative to the layout root (absolute paths are used as-is).
    pub path: PathBuf,
    #[serde(default)]
    pub presence: Presence,
}

impl Resource {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, presence: Presence) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            presence,
        }
    }
}

/// Where proofs are appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerLocation {
    pub dir: PathBuf,
    pub file: String,
}

impl Default for LedgerLocation {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("history/proofs"),
            file: "self_verification.jsonl".to_string(),
        }
    }
}

/// The deserialized contents of a layout file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// The one resource whose presence decides the verdict.
    pub primary: Resource,
    /// Resources whose absence is recorded but tolerated.
    ///
    /// `None` means the built-in list, derived from `ledger`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisory: Option<Vec<Resource>>,
    pub ledger: LedgerLocation,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            primary: Resource::new("has_soul", "SOUL.md", Presence::Exists),
            advisory: None,
            ledger: LedgerLocation::default(),
        }
    }
}

impl LayoutConfig {
    /// The advisory resources to probe: the configured list, or the goals
    /// directory plus the ledger directory.
    pub fn advisory_resources(&self) -> Vec<Resource> {
        match &self.advisory {
            Some(list) => list.clone(),
            None => vec![
                Resource::new("has_truth_dir", ".truth", Presence::Directory),
                Resource::new("has_proofs_dir", self.ledger.dir.clone(), Presence::Directory),
            ],
        }
    }

    /// Reject configs whose check names would collide in `details`.
    fn validate(&self, advisory: &[Resource]) -> OpenTruthResult<()> {
        let mut seen = HashSet::new();
        for resource in std::iter::once(&self.primary).chain(advisory) {
            if resource.name.trim().is_empty() {
                return Err(OpenTruthError::ConfigError {
                    reason: format!(
                        "resource at '{}' has an empty check name",
                        resource.path.display()
                    ),
                });
            }
            if !seen.insert(resource.name.as_str()) {
                return Err(OpenTruthError::ConfigError {
                    reason: format!("duplicate check name '{}'", resource.name),
                });
            }
        }

        if self.ledger.file.trim().is_empty() {
            return Err(OpenTruthError::ConfigError {
                reason: "ledger file name must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

/// A `LayoutConfig` anchored at a root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentLayout {
    root: PathBuf,
    config: LayoutConfig,
    advisory: Vec<Resource>,
}

impl AgentLayout {
    /// The default layout rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let config = LayoutConfig::default();
        Self {
            root: root.into(),
            advisory: config.advisory_resources(),
            config,
        }
    }

    /// Anchor an already-built config at `root`.
    pub fn with_config(root: impl Into<PathBuf>, config: LayoutConfig) -> OpenTruthResult<Self> {
        let advisory = config.advisory_resources();
        config.validate(&advisory)?;
        Ok(Self {
            root: root.into(),
            config,
            advisory,
        })
    }

    /// Parse `s` as a TOML layout file.
    ///
    /// Returns `ConfigError` if the TOML is malformed, has unknown sections,
    /// or repeats a check name.
    pub fn from_toml_str(root: impl Into<PathBuf>, s: &str) -> OpenTruthResult<Self> {
        let config: LayoutConfig = toml::from_str(s).map_err(|e| OpenTruthError::ConfigError {
            reason: format!("failed to parse layout TOML: {}", e),
        })?;
        Self::with_config(root, config)
    }

    /// Read and parse the layout file at `path`.
    pub fn from_file(root: impl Into<PathBuf>, path: &Path) -> OpenTruthResult<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| OpenTruthError::ConfigError {
                reason: format!("failed to read layout file '{}': {}", path.display(), e),
            })?;
        Self::from_toml_str(root, &contents)
    }

    /// Resolve the layout for `root`.
    ///
    /// An explicit `config` path must exist. Without one, `opentruth.toml`
    /// in the root is used if present, and the defaults otherwise.
    pub fn load(root: &Path, config: Option<&Path>) -> OpenTruthResult<Self> {
        if let Some(path) = config {
            debug!(path = %path.display(), "loading explicit layout file");
            return Self::from_file(root, path);
        }

        let implicit = root.join(DEFAULT_CONFIG_FILE);
        if implicit.is_file() {
            debug!(path = %implicit.display(), "loading layout file from root");
            Self::from_file(root, &implicit)
        } else {
            debug!(root = %root.display(), "no layout file, using defaults");
            Ok(Self::new(root))
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn primary(&self) -> &Resource {
        &self.config.primary
    }

    pub fn advisory(&self) -> &[Resource] {
        &self.advisory
    }

    /// `path` joined onto the root.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }

    /// The directory proofs are appended under.
    pub fn proofs_dir(&self) -> PathBuf {
        self.resolve(&self.config.ledger.dir)
    }

    /// The JSON Lines file proofs are appended to.
    pub fn proof_file(&self) -> PathBuf {
        self.proofs_dir().join(&self.config.ledger.file)
    }
}
