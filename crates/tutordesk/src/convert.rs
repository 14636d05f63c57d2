// SPDX-FileCopyrightText: 2026 Tutordesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tutordesk convert` command implementation.

use std::path::PathBuf;

use tutordesk_config::model::ConverterConfig;
use tutordesk_core::TutordeskError;

/// Resolves converter paths: command-line flags win over `[converter]`.
pub(crate) fn resolve_paths(
    config: &ConverterConfig,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
) -> (PathBuf, PathBuf) {
    (
        input.unwrap_or_else(|| PathBuf::from(&config.input_path)),
        output.unwrap_or_else(|| PathBuf::from(&config.output_path)),
    )
}

/// Runs `tutordesk convert`.
pub async fn run_convert(
    config: &ConverterConfig,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<(), TutordeskError> {
    let (input, output) = resolve_paths(config, input, output);
    let count = tutordesk_knowledge::convert_file(&input, &output).await?;
    println!("Converted {count} documents into {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config_paths() {
        let config = ConverterConfig::default();
        let (input, output) = resolve_paths(&config, Some("a.json".into()), None);
        assert_eq!(input, PathBuf::from("a.json"));
        assert_eq!(output, PathBuf::from(&config.output_path));
    }

    #[tokio::test]
    async fn converts_into_requested_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("years.json");
        let output = dir.path().join("docs.json");
        std::fs::write(
            &input,
            r#"[{"year": 8, "core_subjects": [{"subject": "Maths", "focus": "fractions"}]}]"#,
        )
        .unwrap();

        run_convert(&ConverterConfig::default(), Some(input), Some(output.clone()))
            .await
            .unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(
            written["documents"][0]["text"],
            "Year 8 Maths focuses on fractions."
        );
    }

    #[tokio::test]
    async fn missing_input_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_convert(
            &ConverterConfig::default(),
            Some(dir.path().join("nope.json")),
            Some(dir.path().join("out.json")),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("failed to read"), "got: {err}");
    }
}
