use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::error::{Error, Result};

/// Read access to environment variables.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// The current process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<E: EnvSource + ?Sized> EnvSource for &E {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}

#[derive(Debug, Clone, Default)]
pub struct InputOptions {
    pub required: bool,
    pub default: Option<String>,
}

impl InputOptions {
    pub fn required() -> Self {
        Self {
            required: true,
            default: None,
        }
    }

    pub fn with_default<D: Into<String>>(default: D) -> Self {
        Self {
            required: false,
            default: Some(default.into()),
        }
    }
}

/// `release-version` -> `INPUT_RELEASE_VERSION`
pub fn input_env_name(name: &str) -> String {
    let mut out = String::from("INPUT_");
    for c in name.chars() {
        match c {
            '-' => out.push('_'),
            c => out.extend(c.to_uppercase()),
        }
    }
    out
}

/// Look up an action input. An empty value counts as unset; a set value is
/// returned trimmed, so whitespace-only input yields `Some("")`.
pub fn get_input<E: EnvSource + ?Sized>(
    env: &E,
    name: &str,
    opts: &InputOptions,
) -> Result<Option<String>> {
    let key = input_env_name(name);
    let value = env.var(&key).filter(|v| !v.is_empty());

    match value {
        Some(v) => Ok(Some(v.trim().to_string())),
        None if opts.required => Err(Error::InputRequired(name.to_string())),
        None => {
            debug!(input = name, env = %key, "input not set, using default");
            Ok(opts.default.clone())
        }
    }
}

pub fn get_state<E: EnvSource + ?Sized>(env: &E, name: &str) -> String {
    env.var(&format!("STATE_{name}")).unwrap_or_default()
}

pub fn is_debug<E: EnvSource + ?Sized>(env: &E) -> bool {
    env.var("RUNNER_DEBUG").as_deref() == Some("1")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn input_names() {
        assert_eq!(input_env_name("arch"), "INPUT_ARCH");
        assert_eq!(input_env_name("source-dir"), "INPUT_SOURCE_DIR");
        assert_eq!(input_env_name("my input"), "INPUT_MY INPUT");
    }

    #[test]
    fn input_is_trimmed() {
        let e = env(&[("INPUT_RELEASE", "  4.5.0.19 \n")]);
        let got = get_input(&e, "release", &InputOptions::default()).unwrap();
        assert_eq!(got.as_deref(), Some("4.5.0.19"));
    }

    #[test]
    fn empty_input_uses_default() {
        let e = env(&[("INPUT_ARCH", "")]);
        let got = get_input(&e, "arch", &InputOptions::with_default("armv7hl")).unwrap();
        assert_eq!(got.as_deref(), Some("armv7hl"));
        let got = get_input(&e, "image", &InputOptions::default()).unwrap();
        assert_eq!(got, None);
    }

    #[test]
    fn whitespace_input_is_set_but_blank() {
        let e = env(&[("INPUT_ARCH", "   ")]);
        let got = get_input(&e, "arch", &InputOptions::with_default("armv7hl")).unwrap();
        assert_eq!(got.as_deref(), Some(""));
        let got = get_input(&e, "arch", &InputOptions::required()).unwrap();
        assert_eq!(got.as_deref(), Some(""));
    }

    #[test]
    fn missing_required_input_errors() {
        let e = env(&[]);
        let err = get_input(&e, "specfile", &InputOptions::required()).unwrap_err();
        assert!(matches!(err, Error::InputRequired(ref n) if n == "specfile"));
        assert_eq!(err.to_string(), "Input required and not supplied: specfile");
    }

    #[test]
    fn state_and_debug() {
        let e = env(&[("STATE_image", "sdk:latest"), ("RUNNER_DEBUG", "1")]);
        assert_eq!(get_state(&e, "image"), "sdk:latest");
        assert_eq!(get_state(&e, "missing"), "");
        assert!(is_debug(&e));
        assert!(!is_debug(&env(&[("RUNNER_DEBUG", "true")])));
    }
}
