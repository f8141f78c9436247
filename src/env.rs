use std::env as stdenv;
use std::ffi::{OsStr, OsString};

/// Snapshot of the environment the interpreter was started with.
///
/// Variables keep the order in which the operating system listed them, so
/// `env` can echo them back unsorted. The same set is handed unchanged to
/// every child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: Vec<(OsString, OsString)>,
}

impl Environment {
    /// Capture the current process environment.
    pub fn new() -> Self {
        Self {
            vars: stdenv::vars_os().collect(),
        }
    }

    /// Build an environment from an explicit, ordered list of variables.
    pub fn from_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<OsString>,
        V: Into<OsString>,
    {
        Self {
            vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Get the value of a variable, if set.
    pub fn get_var(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        let key = key.as_ref();
        self.vars
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_os_str())
    }

    /// All variables in enumeration order.
    pub fn vars(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.vars.iter().map(|(k, v)| (k.as_os_str(), v.as_os_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_lookup() {
        let env = Environment::from_vars([("PATH", "/bin"), ("HOME", "/root")]);
        assert_eq!(env.get_var("HOME"), Some(OsStr::new("/root")));
        assert_eq!(env.get_var("SOME_RANDOM_ENV_VAR_12345"), None);
    }

    #[test]
    fn test_env_keeps_insertion_order() {
        let env = Environment::from_vars([("Z", "1"), ("A", "2"), ("M", "3")]);
        let keys: Vec<&OsStr> = env.vars().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Z", "A", "M"]);
    }

    #[test]
    fn test_env_reads_from_process_env() {
        let env = Environment::new();
        assert_eq!(env.vars().count(), stdenv::vars_os().count());
        assert_eq!(
            env.get_var("PATH").map(OsStr::to_owned),
            stdenv::var_os("PATH")
        );
    }
}
