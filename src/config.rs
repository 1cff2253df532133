use std::{
    collections::BTreeMap,
    fmt,
    path::{Path, PathBuf},
};

/// Key holding the directory where git keeps its sub-executables.
pub const GIT_LIBEXEC: &str = "GIT_LIBEXEC";
/// Key holding the absolute path of the repository's metadata directory.
pub const GIT_DIR: &str = "GIT_DIR";
/// Key holding the top-level working directory of the repository.
pub const GIT_TOPLEVEL: &str = "GIT_TOPLEVEL";
/// Key set to `true` when the environment checks should be skipped.
pub const PGL_OK: &str = "PGL_OK";

/// A single configuration value as coerced from git or the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl Value {
    /// Coerce a raw value: `true`/`false` become booleans, integers become
    /// integers, everything else is kept verbatim.
    #[must_use]
    pub fn coerce(raw: &str) -> Self {
        match raw {
            "true" => Self::Bool(true),
            "false" => Self::Bool(false),
            _ => raw
                .parse::<i64>()
                .map_or_else(|_| Self::Str(raw.to_string()), Self::Int),
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

/// Configuration gathered for a git subprogram.
///
/// Built once by [`crate::core::git::Bootstrapper`] and handed to the
/// subprogram's entry function by reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    values: BTreeMap<String, Value>,
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    #[must_use]
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_int)
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether the environment checks were waived through `PGL_OK`.
    #[must_use]
    pub fn skip_checks(&self) -> bool {
        self.contains(PGL_OK)
    }

    #[must_use]
    pub fn exec_path(&self) -> Option<&Path> {
        self.get_str(GIT_LIBEXEC).map(Path::new)
    }

    #[must_use]
    pub fn git_dir(&self) -> Option<&Path> {
        self.get_str(GIT_DIR).map(Path::new)
    }

    #[must_use]
    pub fn toplevel(&self) -> Option<&Path> {
        self.get_str(GIT_TOPLEVEL).map(Path::new)
    }

    /// Author identity extracted from `git var -l`, if git reported one.
    #[must_use]
    pub fn author(&self) -> Option<IdentityRef<'_>> {
        self.identity("GIT_AUTHOR")
    }

    /// Committer identity extracted from `git var -l`, if git reported one.
    #[must_use]
    pub fn committer(&self) -> Option<IdentityRef<'_>> {
        self.identity("GIT_COMMITTER")
    }

    fn identity(&self, role: &str) -> Option<IdentityRef<'_>> {
        let name = self.get_str(&format!("{role}_NAME"))?;
        let email = self.get_str(&format!("{role}_EMAIL"));
        Some(IdentityRef { name, email })
    }

    pub(crate) fn set_git_dir(&mut self, path: PathBuf) {
        self.insert(GIT_DIR, path.to_string_lossy().into_owned());
    }
}

/// Borrowed view of a name/email pair stored in a [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityRef<'a> {
    pub name: &'a str,
    pub email: Option<&'a str>,
}
