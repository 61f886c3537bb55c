use std::collections::HashMap;

/// Environment key holding the default for [`MountOptions::wait_until_visible`](crate::MountOptions)
pub const WAIT_UNTIL_VISIBLE: &str = "CtStencilWaitUntilVisible";
/// Environment key holding the default for [`MountOptions::log`](crate::MountOptions)
pub const LOG: &str = "CtStencilLog";

/// Process variables with this prefix are copied into [`Env::from_process`]
pub const PROCESS_PREFIX: &str = "CT_ENV_";

/// String settings the harness exposes to mounted tests
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Env(HashMap<String, String>);

impl Env {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K: Into<String>, V: Into<String>>(pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        Self(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Collects `CT_ENV_<key>` process variables under `<key>`
    pub fn from_process() -> Self {
        Self::from_vars(std::env::vars())
    }

    fn from_vars(vars: impl Iterator<Item = (String, String)>) -> Self {
        Self(
            vars.filter_map(|(k, v)| k.strip_prefix(PROCESS_PREFIX).map(|k| (k.to_string(), v)))
                .filter(|(k, _)| !k.is_empty())
                .collect(),
        )
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// `true` for `true`, `1`, `yes` and `on` in any case; unset or anything
    /// else is `false`
    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key).map_or(false, |v| {
            matches!(
                v.trim().to_ascii_lowercase().as_str(),
                "true" | "1" | "yes" | "on"
            )
        })
    }
}

#[cfg(test)]
#[test]
fn test_get_bool() {
    let env = Env::from_pairs([(LOG, "TRUE"), (WAIT_UNTIL_VISIBLE, "0"), ("other", "yes")]);
    assert!(env.get_bool(LOG));
    assert!(!env.get_bool(WAIT_UNTIL_VISIBLE));
    assert!(env.get_bool("other"));
    assert!(!env.get_bool("missing"));
}

#[cfg(test)]
#[test]
fn test_from_vars() {
    let vars = vec![
        ("CT_ENV_CtStencilLog".to_string(), "true".to_string()),
        ("CT_ENV_".to_string(), "ignored".to_string()),
        ("PATH".to_string(), "/bin".to_string()),
    ];
    let env = Env::from_vars(vars.into_iter());
    assert_eq!(env, Env::from_pairs([(LOG, "true")]));
}
