//! Language server configuration.
//!
//! A [`LanguageServerConfiguration`] is created once and shared as an
//! `Arc` by every consumer. Reloading a file or resetting to defaults
//! mutates it in place, so existing handles observe the new values, and
//! subscribers are told about it through [`ConfigurationEvent`]s.
//!
//! ## File format
//!
//! ```json
//! {
//!   "language": "en",
//!   "diagnostics": { "computeTrigger": "onType", "mode": "only" },
//!   "codeLens": { "parameters": {} },
//!   "documentLink": { "showDiagnosticDescription": true },
//!   "traceLog": "trace.log",
//!   "configurationRoot": "src/cf"
//! }
//! ```
//!
//! Keys are camelCase, enum values are matched case-insensitively and
//! missing keys take their defaults. Keys the schema does not know are
//! handled according to the handle's [`SchemaDriftPolicy`].

mod error;
mod events;
mod options;
mod root;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashSet;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, warn};

pub use error::{ConfigurationError, ConfigurationResult};
pub use events::{ConfigurationEvent, ConfigurationObserver};
pub use options::{
    CodeLensOptions, ComputeTrigger, DiagnosticsMode, DiagnosticsOptions, DocumentLinkOptions,
    Language, LspFeature, SkipSupport,
};
pub use root::configuration_root;

use events::Observers;

/// File name looked up in a project root when no file is given explicitly.
pub const DEFAULT_CONFIGURATION_FILE: &str = ".bsl-language-server.json";

/// What to do with keys in a configuration file that the schema does not know.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SchemaDriftPolicy {
    /// Drop them silently.
    Ignore,
    /// Drop them and log a warning naming each key.
    #[default]
    Warn,
    /// Reject the whole file; the previous values stay in effect.
    Fail,
}

/// Values read from a configuration file.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ConfigurationData {
    language: Language,
    diagnostics: DiagnosticsOptions,
    code_lens: CodeLensOptions,
    document_link: DocumentLinkOptions,
    trace_log: Option<PathBuf>,
    configuration_root: Option<PathBuf>,
}

impl ConfigurationData {
    const KEYS: &'static [&'static str] = &[
        "$schema",
        "language",
        "diagnostics",
        "codeLens",
        "documentLink",
        "traceLog",
        "configurationRoot",
    ];

    /// Copy every value from `other`, section by section.
    fn merge_from(&mut self, other: ConfigurationData) {
        self.language = other.language;
        self.diagnostics.merge_from(other.diagnostics);
        self.code_lens.merge_from(other.code_lens);
        self.document_link.merge_from(other.document_link);
        self.trace_log = other.trace_log;
        self.configuration_root = other.configuration_root;
    }
}

#[derive(Debug)]
struct ConfigurationState {
    data: ConfigurationData,
    configuration_file: PathBuf,
    lsp_features: FxHashSet<LspFeature>,
}

impl Default for ConfigurationState {
    fn default() -> Self {
        Self {
            data: ConfigurationData::default(),
            configuration_file: PathBuf::from(DEFAULT_CONFIGURATION_FILE),
            lsp_features: FxHashSet::default(),
        }
    }
}

/// Shared, mutable language server settings.
pub struct LanguageServerConfiguration {
    state: RwLock<ConfigurationState>,
    observers: Observers,
    drift_policy: SchemaDriftPolicy,
}

impl LanguageServerConfiguration {
    /// A handle holding default values and the default drift policy.
    pub fn new() -> Arc<Self> {
        Self::with_drift_policy(SchemaDriftPolicy::default())
    }

    pub fn with_drift_policy(drift_policy: SchemaDriftPolicy) -> Arc<Self> {
        Arc::new(Self {
            state: RwLock::new(ConfigurationState::default()),
            observers: Observers::default(),
            drift_policy,
        })
    }

    // ------------------------------------------------------------------
    // Getters
    // ------------------------------------------------------------------

    pub fn language(&self) -> Language {
        self.state.read().data.language
    }

    pub fn diagnostics(&self) -> DiagnosticsOptions {
        self.state.read().data.diagnostics.clone()
    }

    pub fn code_lens(&self) -> CodeLensOptions {
        self.state.read().data.code_lens.clone()
    }

    pub fn document_link(&self) -> DocumentLinkOptions {
        self.state.read().data.document_link.clone()
    }

    pub fn trace_log(&self) -> Option<PathBuf> {
        self.state.read().data.trace_log.clone()
    }

    /// Explicit configuration root, if one was configured.
    pub fn configuration_root(&self) -> Option<PathBuf> {
        self.state.read().data.configuration_root.clone()
    }

    /// File the current values were last loaded from.
    pub fn configuration_file(&self) -> PathBuf {
        self.state.read().configuration_file.clone()
    }

    pub fn drift_policy(&self) -> SchemaDriftPolicy {
        self.drift_policy
    }

    // ------------------------------------------------------------------
    // Setters (no notification)
    // ------------------------------------------------------------------

    pub fn set_language(&self, language: Language) {
        self.state.write().data.language = language;
    }

    pub fn set_trace_log(&self, trace_log: Option<PathBuf>) {
        self.state.write().data.trace_log = trace_log;
    }

    pub fn set_configuration_root(&self, root: Option<PathBuf>) {
        self.state.write().data.configuration_root = root;
    }

    // ------------------------------------------------------------------
    // Runtime features
    // ------------------------------------------------------------------

    /// Mark a server capability as enabled by the client.
    pub fn add_lsp_feature(&self, feature: LspFeature) {
        self.state.write().lsp_features.insert(feature);
    }

    pub fn is_lsp_feature(&self, feature: LspFeature) -> bool {
        self.state.read().lsp_features.contains(&feature)
    }

    // ------------------------------------------------------------------
    // Observers
    // ------------------------------------------------------------------

    /// Call `observer` for every subsequent event.
    pub fn subscribe<F>(&self, observer: F)
    where
        F: Fn(&ConfigurationEvent<'_>) + Send + Sync + 'static,
    {
        self.observers.subscribe(Arc::new(observer));
    }

    pub fn subscribe_observer(&self, observer: Arc<dyn ConfigurationObserver>) {
        self.observers.subscribe(observer);
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    // ------------------------------------------------------------------
    // Reload
    // ------------------------------------------------------------------

    /// Reload values from `path`.
    ///
    /// A missing file leaves everything untouched. A file that cannot be
    /// read or parsed is logged and leaves everything untouched. Otherwise
    /// `configuration_file` becomes `path`, [`ConfigurationEvent::FileChanged`]
    /// fires, the values are merged in and [`ConfigurationEvent::Changed`] fires.
    pub fn update(&self, path: &Path) {
        if !path.exists() {
            debug!(path = %path.display(), "configuration file does not exist");
            return;
        }

        let data = match self.load(path) {
            Ok(data) => data,
            Err(err) => {
                error!(error = %err, "can't deserialize configuration file");
                return;
            }
        };

        self.state.write().configuration_file = path.to_path_buf();
        self.observers.emit(ConfigurationEvent::FileChanged(path));

        self.state.write().data.merge_from(data);
        self.observers.emit(ConfigurationEvent::Changed(self));
    }

    /// Restore default values in place.
    ///
    /// `configuration_file` keeps its value and runtime features are
    /// cleared. Both events fire, file first.
    pub fn reset(&self) {
        let configuration_file = {
            let mut state = self.state.write();
            state.data.merge_from(ConfigurationData::default());
            state.lsp_features.clear();
            state.configuration_file.clone()
        };

        self.observers
            .emit(ConfigurationEvent::FileChanged(&configuration_file));
        self.observers.emit(ConfigurationEvent::Changed(self));
    }

    /// Read and validate a file without touching the current state.
    fn load(&self, path: &Path) -> ConfigurationResult<ConfigurationData> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let json_error = |source| ConfigurationError::Json {
            path: path.to_path_buf(),
            source,
        };

        let value: Value = serde_json::from_str(&text).map_err(json_error)?;

        let unknown = unknown_keys(&value);
        if !unknown.is_empty() {
            match self.drift_policy {
                SchemaDriftPolicy::Ignore => {}
                SchemaDriftPolicy::Warn => {
                    for key in &unknown {
                        warn!(path = %path.display(), key, "unknown configuration key ignored");
                    }
                }
                SchemaDriftPolicy::Fail => {
                    return Err(ConfigurationError::SchemaDrift {
                        path: path.to_path_buf(),
                        keys: unknown,
                    });
                }
            }
        }

        serde_json::from_value(value).map_err(json_error)
    }
}

impl fmt::Debug for LanguageServerConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageServerConfiguration")
            .field("state", &*self.state.read())
            .field("drift_policy", &self.drift_policy)
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Dotted paths of object keys the schema does not declare.
///
/// Free-form `parameters` maps are not inspected. The result is sorted.
fn unknown_keys(value: &Value) -> Vec<String> {
    let Value::Object(root) = value else {
        return Vec::new();
    };

    let mut unknown = Vec::new();
    for (key, child) in root {
        if !ConfigurationData::KEYS.contains(&key.as_str()) {
            unknown.push(key.clone());
            continue;
        }

        let section_keys = match key.as_str() {
            "diagnostics" => DiagnosticsOptions::KEYS,
            "codeLens" => CodeLensOptions::KEYS,
            "documentLink" => DocumentLinkOptions::KEYS,
            _ => continue,
        };
        if let Value::Object(section) = child {
            unknown.extend(
                section
                    .keys()
                    .filter(|nested| !section_keys.contains(&nested.as_str()))
                    .map(|nested| format!("{key}.{nested}")),
            );
        }
    }
    unknown.sort();
    unknown
}
