use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use proctor_common::config::{JudgeConfig, LanguageSettings};
use proctor_common::types::{ExecutionRequest, Language, ProblemCategory, TestCase};
use proctor_judge::{DockerSandbox, Judge, StaticRegistry};
use serde_json::Value;

pub async fn run(
    language: &str,
    source: &Path,
    title: &str,
    entry: &str,
    tests: Option<&Path>,
    custom: Option<&str>,
    conceptual: bool,
    as_json: bool,
) -> Result<()> {
    let language = language
        .parse::<Language>()
        .map_err(anyhow::Error::msg)?;
    let source_code = std::fs::read_to_string(source)
        .with_context(|| format!("failed to read source file {}", source.display()))?;

    let test_cases: Vec<TestCase> = match tests {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read test file {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse test file {}", path.display()))?
        }
        None => vec![],
    };

    let custom_input: Option<Vec<Value>> = match custom {
        Some(raw) => Some(serde_json::from_str(raw).context("failed to parse custom input")?),
        None => None,
    };

    let category = if conceptual {
        ProblemCategory::Conceptual
    } else {
        ProblemCategory::Executable
    };

    let request = ExecutionRequest {
        language,
        source_code,
        problem_title: title.to_string(),
        entry_point: entry.to_string(),
        category,
        test_cases,
        custom_input,
    };

    let config = JudgeConfig::from_env();
    let languages = LanguageSettings::load_default()?;
    let registry = StaticRegistry::load_default()?;
    let sandbox = Arc::new(DockerSandbox::connect(config, languages)?);
    let judge = Judge::new(sandbox, Arc::new(registry));

    let report = judge.execute(&request).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for line in &report.logs {
            println!("{line}");
        }
        println!();
        println!("Verdict: {}", report.status);
        if let Some(analysis) = &report.analysis {
            println!(
                "Complexity: {} time, {} space",
                analysis.time, analysis.space
            );
        }
    }

    Ok(())
}

pub fn languages() -> Result<()> {
    let settings = LanguageSettings::load_default()?;
    println!(
        "{:<12} {:<24} {:>10} {:>6}",
        "LANGUAGE", "IMAGE", "MEMORY(MB)", "CPU"
    );
    for language in settings.languages() {
        if let Some(profile) = settings.profile(language) {
            println!(
                "{:<12} {:<24} {:>10} {:>6.1}",
                language.as_str(),
                profile.image,
                profile.memory_limit_mb,
                profile.cpu_limit
            );
        }
    }
    Ok(())
}
