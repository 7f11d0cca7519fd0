//! Where secrets that name an environment variable are looked up.

use std::collections::HashMap;

/// A source of environment variables.
pub trait Environment {
    /// The value of `variable`, or `None` if it is not set.
    fn read(&self, variable: &str) -> Option<String>;
}

/// The environment of the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn read(&self, variable: &str) -> Option<String> {
        std::env::var(variable).ok()
    }
}

/// A fixed set of variables, for tests and tooling.
#[derive(Debug, Clone, Default)]
pub struct FixedEnvironment(HashMap<String, String>);

impl Environment for FixedEnvironment {
    fn read(&self, variable: &str) -> Option<String> {
        self.0.get(variable).cloned()
    }
}

impl From<HashMap<String, String>> for FixedEnvironment {
    fn from(variables: HashMap<String, String>) -> Self {
        FixedEnvironment(variables)
    }
}

impl<const N: usize> From<[(&str, &str); N]> for FixedEnvironment {
    fn from(variables: [(&str, &str); N]) -> Self {
        FixedEnvironment(
            variables
                .into_iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        )
    }
}
