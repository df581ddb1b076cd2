//! Render targets and target predicates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A target language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Go,
    Java,
}

/// A target operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    Linux,
    Darwin,
    Windows,
    Js,
}

/// A target architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    Amd64,
    Arm64,
    Wasm,
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lang::Go => f.write_str("go"),
            Lang::Java => f.write_str("java"),
        }
    }
}

/// The tuple a module is rendered for, or a predicate over such tuples.
///
/// As a predicate, every `None` field is a wildcard: a target holding only
/// a language matches any active target with that language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Target {
    pub lang: Option<Lang>,
    pub os: Option<Os>,
    pub arch: Option<Arch>,
    pub min_version: Option<String>,
    pub max_version: Option<String>,
    pub framework: Option<String>,
}

impl Target {
    /// A target with only the language set.
    pub fn lang(lang: Lang) -> Self {
        Self {
            lang: Some(lang),
            ..Self::default()
        }
    }

    pub fn with_os(mut self, os: Os) -> Self {
        self.os = Some(os);
        self
    }

    pub fn with_arch(mut self, arch: Arch) -> Self {
        self.arch = Some(arch);
        self
    }

    /// Set the language version bounds.
    pub fn with_versions(mut self, min: impl Into<String>, max: impl Into<String>) -> Self {
        self.min_version = Some(min.into());
        self.max_version = Some(max.into());
        self
    }

    pub fn with_framework(mut self, framework: impl Into<String>) -> Self {
        self.framework = Some(framework.into());
        self
    }

    /// True if every field set on this predicate equals the same field of
    /// `active`.
    pub fn matches(&self, active: &Target) -> bool {
        fn field<T: PartialEq>(want: &Option<T>, have: &Option<T>) -> bool {
            want.is_none() || want == have
        }

        field(&self.lang, &active.lang)
            && field(&self.os, &active.os)
            && field(&self.arch, &active.arch)
            && field(&self.min_version, &active.min_version)
            && field(&self.max_version, &active.max_version)
            && field(&self.framework, &active.framework)
    }
}
