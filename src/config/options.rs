//! Configuration sections and their value types.
//!
//! Enum values are read case-insensitively: `"onType"`, `"ONTYPE"` and
//! `"ontype"` all select [`ComputeTrigger::OnType`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Declares a unit enum whose serde form is a case-insensitive string.
macro_rules! case_insensitive_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Canonical spelling used in configuration files.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $text ),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($text) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(format!("unknown {} value `{}`", stringify!($name), s))
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let text = String::deserialize(deserializer)?;
                text.parse().map_err(serde::de::Error::custom)
            }
        }

        impl Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

case_insensitive_enum! {
    /// Language of diagnostics messages and other server output.
    pub enum Language {
        Russian => "ru",
        English => "en",
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::Russian
    }
}

case_insensitive_enum! {
    /// When diagnostics are recomputed.
    pub enum ComputeTrigger {
        OnType => "onType",
        OnSave => "onSave",
        Never => "never",
    }
}

impl Default for ComputeTrigger {
    fn default() -> Self {
        ComputeTrigger::OnSave
    }
}

case_insensitive_enum! {
    /// Whether modules under vendor support are analysed.
    pub enum SkipSupport {
        WithSupport => "withSupport",
        WithSupportLocked => "withSupportLocked",
        Never => "never",
    }
}

impl Default for SkipSupport {
    fn default() -> Self {
        SkipSupport::Never
    }
}

case_insensitive_enum! {
    /// Which diagnostics are enabled.
    pub enum DiagnosticsMode {
        Off => "off",
        On => "on",
        All => "all",
        Only => "only",
        Except => "except",
    }
}

impl Default for DiagnosticsMode {
    fn default() -> Self {
        DiagnosticsMode::On
    }
}

case_insensitive_enum! {
    /// Server capabilities a client has enabled at runtime.
    pub enum LspFeature {
        Definition => "definition",
        Diagnostics => "diagnostics",
        CodeLens => "codeLens",
        DocumentLink => "documentLink",
        Hover => "hover",
    }
}

/// `diagnostics` section.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiagnosticsOptions {
    pub compute_trigger: ComputeTrigger,
    pub skip_support: SkipSupport,
    pub mode: DiagnosticsMode,
    pub ordinary_app_support: bool,
    /// Per-diagnostic settings, keyed by diagnostic code
    pub parameters: BTreeMap<String, serde_json::Value>,
}

impl Default for DiagnosticsOptions {
    fn default() -> Self {
        Self {
            compute_trigger: ComputeTrigger::default(),
            skip_support: SkipSupport::default(),
            mode: DiagnosticsMode::default(),
            ordinary_app_support: true,
            parameters: BTreeMap::new(),
        }
    }
}

impl DiagnosticsOptions {
    pub(crate) const KEYS: &'static [&'static str] = &[
        "computeTrigger",
        "skipSupport",
        "mode",
        "ordinaryAppSupport",
        "parameters",
    ];

    pub(crate) fn merge_from(&mut self, other: DiagnosticsOptions) {
        self.compute_trigger = other.compute_trigger;
        self.skip_support = other.skip_support;
        self.mode = other.mode;
        self.ordinary_app_support = other.ordinary_app_support;
        self.parameters = other.parameters;
    }
}

/// `codeLens` section.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CodeLensOptions {
    /// Per-lens settings, keyed by lens id
    pub parameters: BTreeMap<String, serde_json::Value>,
}

impl CodeLensOptions {
    pub(crate) const KEYS: &'static [&'static str] = &["parameters"];

    pub(crate) fn merge_from(&mut self, other: CodeLensOptions) {
        self.parameters = other.parameters;
    }
}

/// `documentLink` section.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentLinkOptions {
    pub show_diagnostic_description: bool,
}

impl DocumentLinkOptions {
    pub(crate) const KEYS: &'static [&'static str] = &["showDiagnosticDescription"];

    pub(crate) fn merge_from(&mut self, other: DocumentLinkOptions) {
        self.show_diagnostic_description = other.show_diagnostic_description;
    }
}
