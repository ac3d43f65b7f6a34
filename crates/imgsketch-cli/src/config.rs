//! Sketch parameter resolution for the command line.
//!
//! Precedence, highest first: command-line flags, a `--params` JSON file,
//! then the environment (`IMGSKETCH_KERNEL_SIZE`, `IMGSKETCH_SIGMA`),
//! then the built-in defaults.

use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use imgsketch_core::SketchParams;
use serde::Deserialize;

/// Environment variable holding the `tracing` filter directive.
pub const LOG_ENV: &str = "IMGSKETCH_LOG";
/// Default log filter when `IMGSKETCH_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";

const KERNEL_SIZE_ENV: &str = "IMGSKETCH_KERNEL_SIZE";
const SIGMA_ENV: &str = "IMGSKETCH_SIGMA";

/// Partial parameters: only the fields that are present override.
///
/// Used for command-line flags and for the `--params` file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamOverrides {
    pub kernel_size: Option<usize>,
    pub sigma: Option<f64>,
    pub rotate_turns: Option<i32>,
}

/// Resolve the parameters for a run from the process environment.
pub fn resolve_params(file: Option<&Path>, flags: ParamOverrides) -> Result<SketchParams> {
    resolve_params_with(|name| std::env::var(name).ok(), file, flags)
}

fn resolve_params_with(
    env: impl Fn(&str) -> Option<String>,
    file: Option<&Path>,
    flags: ParamOverrides,
) -> Result<SketchParams> {
    let mut params = env_params(env);
    if let Some(path) = file {
        params = apply_overrides(params, load_params(path)?);
    }
    Ok(apply_overrides(params, flags))
}

/// Read a JSON parameter file. Absent fields are left as `None`.
pub fn load_params(path: &Path) -> Result<ParamOverrides> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("could not read parameter file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("invalid parameter file {}", path.display()))
}

fn env_params(env: impl Fn(&str) -> Option<String>) -> SketchParams {
    let mut params = SketchParams::default();
    if let Some(kernel_size) = env_value(&env, KERNEL_SIZE_ENV) {
        params.blur.kernel_size = kernel_size;
    }
    if let Some(sigma) = env_value(&env, SIGMA_ENV) {
        params.blur.sigma = sigma;
    }
    params
}

fn env_value<T: FromStr>(env: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    let raw = env(name)?;
    let parsed = raw.parse().ok();
    if parsed.is_none() {
        tracing::warn!("ignoring {name}={raw:?}: not a valid value");
    }
    parsed
}

fn apply_overrides(mut params: SketchParams, overrides: ParamOverrides) -> SketchParams {
    if let Some(kernel_size) = overrides.kernel_size {
        params.blur.kernel_size = kernel_size;
    }
    if let Some(sigma) = overrides.sigma {
        params.blur.sigma = sigma;
    }
    if let Some(turns) = overrides.rotate_turns {
        params.rotate_turns = turns;
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_only_given_fields() {
        let params = apply_overrides(
            SketchParams::default(),
            ParamOverrides {
                sigma: Some(3.0),
                ..Default::default()
            },
        );
        assert_eq!(params.blur.kernel_size, 21);
        assert_eq!(params.blur.sigma, 3.0);
        assert_eq!(params.rotate_turns, 0);
    }

    fn write_params(name: &str, json: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("imgsketch-{name}-{}.json", std::process::id()));
        std::fs::write(&path, json).unwrap();
        path
    }

    fn fake_env(vars: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |name| {
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn test_params_file_then_flags() {
        let path = write_params("full", r#"{"kernel_size": 9, "sigma": 4.0, "rotate_turns": 1}"#);

        let params = resolve_params_with(
            fake_env(&[]),
            Some(&path),
            ParamOverrides {
                kernel_size: Some(5),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(params.blur.kernel_size, 5);
        assert_eq!(params.blur.sigma, 4.0);
        assert_eq!(params.rotate_turns, 1);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_partial_params_file_falls_back_to_env() {
        let path = write_params("partial", r#"{"kernel_size": 9}"#);

        let params = resolve_params_with(
            fake_env(&[(SIGMA_ENV, "4.0"), (KERNEL_SIZE_ENV, "15")]),
            Some(&path),
            ParamOverrides::default(),
        )
        .unwrap();
        // File beats env for kernel_size; env fills the missing sigma.
        assert_eq!(params.blur.kernel_size, 9);
        assert_eq!(params.blur.sigma, 4.0);
        assert_eq!(params.rotate_turns, 0);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_env_only_and_invalid_env_value() {
        let params = resolve_params_with(
            fake_env(&[(KERNEL_SIZE_ENV, "seven"), (SIGMA_ENV, "2.5")]),
            None,
            ParamOverrides::default(),
        )
        .unwrap();
        assert_eq!(params.blur.kernel_size, 21);
        assert_eq!(params.blur.sigma, 2.5);
    }

    #[test]
    fn test_params_file_rejects_unknown_fields() {
        let path = write_params("unknown", r#"{"kernel": 9}"#);
        assert!(load_params(&path).is_err());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_params_file_is_an_error() {
        let path = std::env::temp_dir().join("imgsketch-no-such-params.json");
        assert!(load_params(&path).is_err());
    }
}
