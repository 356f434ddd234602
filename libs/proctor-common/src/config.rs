use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::types::Language;

/// How one language is executed inside the sandbox.
///
/// Commands are constant argv vectors resolved against the guest working
/// directory; the judge never interpolates request data into them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageProfile {
    pub language: Language,
    pub image: String,
    /// File name the synthesized program is written to inside the job
    /// workspace.
    pub source_file: String,
    /// Compile or syntax-check phase; skipped when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compile_command: Option<Vec<String>>,
    pub run_command: Vec<String>,
    pub memory_limit_mb: u32,
    pub cpu_limit: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct LanguagesFile {
    languages: Vec<LanguageProfile>,
}

/// Per-language sandbox profiles, loaded from `config/languages.json`
/// with compiled-in defaults as fallback.
#[derive(Debug, Clone)]
pub struct LanguageSettings {
    profiles: HashMap<Language, LanguageProfile>,
}

impl LanguageSettings {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("language config not found at {}", path.display());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read language config {}", path.display()))?;
        let file: LanguagesFile = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse language config {}", path.display()))?;
        let profiles = file
            .languages
            .into_iter()
            .map(|profile| (profile.language, profile))
            .collect();
        Ok(Self { profiles })
    }

    /// Loads `config/languages.json` when present, otherwise the builtin
    /// profiles.
    pub fn load_default() -> Result<Self> {
        let path = Path::new("config/languages.json");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::builtin())
        }
    }

    pub fn builtin() -> Self {
        let profiles = builtin_profiles()
            .into_iter()
            .map(|profile| (profile.language, profile))
            .collect();
        Self { profiles }
    }

    pub fn profile(&self, language: Language) -> Option<&LanguageProfile> {
        self.profiles.get(&language)
    }

    /// Configured languages, in canonical order.
    pub fn languages(&self) -> Vec<Language> {
        Language::ALL
            .iter()
            .copied()
            .filter(|language| self.profiles.contains_key(language))
            .collect()
    }
}

fn shell(line: &str) -> Vec<String> {
    vec!["/bin/sh".into(), "-c".into(), line.into()]
}

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|p| p.to_string()).collect()
}

fn builtin_profiles() -> Vec<LanguageProfile> {
    vec![
        LanguageProfile {
            language: Language::Python,
            image: "python:3.11-alpine".into(),
            source_file: "main.py".into(),
            compile_command: Some(argv(&["python3", "-m", "py_compile", "main.py"])),
            run_command: shell("python3 main.py < input.txt"),
            memory_limit_mb: 256,
            cpu_limit: 0.5,
        },
        LanguageProfile {
            language: Language::JavaScript,
            image: "node:20-alpine".into(),
            source_file: "main.js".into(),
            compile_command: Some(argv(&["node", "--check", "main.js"])),
            run_command: shell("node main.js < input.txt"),
            memory_limit_mb: 256,
            cpu_limit: 0.5,
        },
        LanguageProfile {
            language: Language::Java,
            image: "eclipse-temurin:17-jdk".into(),
            source_file: "Main.java".into(),
            compile_command: Some(argv(&["javac", "Main.java"])),
            // JAVA_TOOL_OPTIONS banners on stderr pollute captured output
            run_command: shell("unset JAVA_TOOL_OPTIONS; java -cp . Main < input.txt"),
            memory_limit_mb: 512,
            cpu_limit: 1.0,
        },
        LanguageProfile {
            language: Language::Cpp,
            image: "gcc:13".into(),
            source_file: "main.cpp".into(),
            compile_command: Some(argv(&["g++", "-std=c++17", "-O2", "-o", "main", "main.cpp"])),
            run_command: shell("./main < input.txt"),
            memory_limit_mb: 512,
            cpu_limit: 1.0,
        },
    ]
}

/// Judge-wide settings sourced from the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgeConfig {
    /// Host directory under which per-job workspaces are created.
    pub workspace_root: PathBuf,
    pub run_timeout_ms: u64,
    pub compile_timeout_ms: u64,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            workspace_root: env::temp_dir().join("proctor-jobs"),
            run_timeout_ms: 5000,
            compile_timeout_ms: 20_000,
        }
    }
}

impl JudgeConfig {
    pub fn from_env() -> Self {
        let base = Self::default();
        Self {
            workspace_root: env::var("PROCTOR_WORKSPACE_ROOT")
                .map(PathBuf::from)
                .unwrap_or(base.workspace_root),
            run_timeout_ms: env_u64("PROCTOR_RUN_TIMEOUT_MS", base.run_timeout_ms),
            compile_timeout_ms: env_u64("PROCTOR_COMPILE_TIMEOUT_MS", base.compile_timeout_ms),
        }
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_every_language() {
        let settings = LanguageSettings::builtin();
        for language in Language::ALL {
            let profile = settings
                .profile(language)
                .unwrap_or_else(|| panic!("missing builtin profile for {language}"));
            assert!(!profile.image.is_empty());
            assert!(!profile.run_command.is_empty());
        }
        assert_eq!(settings.languages(), Language::ALL.to_vec());
    }

    #[test]
    fn commands_never_reference_host_paths() {
        let settings = LanguageSettings::builtin();
        for language in Language::ALL {
            let profile = settings.profile(language).unwrap();
            let mut parts = profile.run_command.clone();
            if let Some(compile) = &profile.compile_command {
                parts.extend(compile.clone());
            }
            for part in parts {
                assert!(
                    !part.contains("/tmp") && !part.contains("/home"),
                    "{language}: command references a host path: {part}"
                );
            }
        }
    }

    #[test]
    fn profiles_round_trip_through_json() {
        let settings = LanguageSettings::builtin();
        let file = LanguagesFile {
            languages: Language::ALL
                .iter()
                .map(|l| settings.profile(*l).unwrap().clone())
                .collect(),
        };
        let raw = serde_json::to_string_pretty(&file).unwrap();
        let parsed: LanguagesFile = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.languages.len(), 4);
    }

    #[test]
    fn judge_config_defaults() {
        let config = JudgeConfig::default();
        assert_eq!(config.run_timeout_ms, 5000);
        assert!(config.compile_timeout_ms > config.run_timeout_ms);
    }
}
