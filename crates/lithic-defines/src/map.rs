//! The define table and the definedness probe.

use std::collections::BTreeMap;

use crate::error::{DefineError, Result};

/// An ordered table of preprocessor symbols.
///
/// Each entry is either defined with no value (`None`) or defined with a
/// value (`Some`). Symbols absent from the table are undefined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefineMap {
    entries: BTreeMap<String, Option<String>>,
}

impl DefineMap {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of defined symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Define a symbol with no value, replacing any previous definition.
    pub fn define(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        check_name(&name)?;
        self.entries.insert(name, None);
        Ok(())
    }

    /// Define a symbol with a value, replacing any previous definition.
    pub fn define_value(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<()> {
        let name = name.into();
        check_name(&name)?;
        self.entries.insert(name, Some(value.into()));
        Ok(())
    }

    /// Remove a symbol. Returns whether it was previously defined.
    pub fn undef(&mut self, name: &str) -> bool {
        self.entries.remove(name).is_some()
    }

    /// Look up a symbol: `None` if undefined, `Some(None)` if defined with
    /// no value, `Some(Some(v))` if defined with a value.
    pub fn lookup(&self, name: &str) -> Option<Option<&str>> {
        self.entries.get(name).map(|v| v.as_deref())
    }

    /// Iterate entries in sorted name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Stringify a symbol after one expansion step.
    ///
    /// If the symbol is defined with a value, yields the value; defined
    /// with no value, yields the empty string; undefined, yields the
    /// symbol name itself. This is the substitution the probe compares
    /// against the unexpanded spelling.
    pub fn expand_and_stringify(&self, name: &str) -> String {
        match self.entries.get(name) {
            Some(Some(value)) => value.clone(),
            Some(None) => String::new(),
            None => name.to_string(),
        }
    }

    /// Whether a symbol is defined, with any value including none.
    ///
    /// Compares the expanded stringification against the literal name: they
    /// differ exactly when a definition substituted something. Known
    /// limitation, kept from the modeled behavior: a symbol defined to
    /// expand to its own name is indistinguishable from undefined and
    /// reports `false`.
    pub fn is_defined(&self, name: &str) -> bool {
        self.expand_and_stringify(name) != name
    }

    /// Parse a `-D` style flag body: `NAME` or `NAME=VALUE`.
    pub fn parse_flag(flag: &str) -> Result<(String, Option<String>)> {
        let flag = flag.strip_prefix("-D").unwrap_or(flag);
        if flag.is_empty() {
            return Err(DefineError::InvalidFlag {
                flag: flag.to_string(),
                detail: "empty flag".to_string(),
            });
        }
        let (name, value) = match flag.split_once('=') {
            Some((name, value)) => (name, Some(value.to_string())),
            None => (flag, None),
        };
        check_name(name)?;
        Ok((name.to_string(), value))
    }

    /// Parse and apply a `-D` style flag.
    pub fn apply_flag(&mut self, flag: &str) -> Result<()> {
        let (name, value) = Self::parse_flag(flag)?;
        self.entries.insert(name, value);
        Ok(())
    }
}

/// Validate a C identifier: `[A-Za-z_][A-Za-z0-9_]*`.
fn check_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(DefineError::InvalidName {
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_symbol_is_not_defined() {
        let map = DefineMap::new();
        assert!(!map.is_defined("FOO"));
        assert_eq!(map.expand_and_stringify("FOO"), "FOO");
    }

    #[test]
    fn empty_definition_is_defined() {
        let mut map = DefineMap::new();
        map.define("FOO").unwrap();
        assert!(map.is_defined("FOO"));
        assert_eq!(map.expand_and_stringify("FOO"), "");
        assert_eq!(map.lookup("FOO"), Some(None));
    }

    #[test]
    fn valued_definition_is_defined() {
        let mut map = DefineMap::new();
        map.define_value("FOO", "1").unwrap();
        assert!(map.is_defined("FOO"));
        assert_eq!(map.expand_and_stringify("FOO"), "1");
        assert_eq!(map.lookup("FOO"), Some(Some("1")));
    }

    #[test]
    fn self_referential_definition_reports_undefined() {
        // FOO expanding to FOO is indistinguishable from undefined.
        let mut map = DefineMap::new();
        map.define_value("FOO", "FOO").unwrap();
        assert!(!map.is_defined("FOO"));
    }

    #[test]
    fn probe_is_idempotent() {
        let mut map = DefineMap::new();
        map.define_value("BAR", "42").unwrap();
        assert_eq!(map.is_defined("BAR"), map.is_defined("BAR"));
        assert_eq!(map.is_defined("MISSING"), map.is_defined("MISSING"));
    }

    #[test]
    fn undef_removes() {
        let mut map = DefineMap::new();
        map.define("FOO").unwrap();
        assert!(map.undef("FOO"));
        assert!(!map.undef("FOO"));
        assert!(!map.is_defined("FOO"));
    }

    #[test]
    fn redefinition_replaces() {
        let mut map = DefineMap::new();
        map.define_value("FOO", "1").unwrap();
        map.define("FOO").unwrap();
        assert_eq!(map.lookup("FOO"), Some(None));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn parse_flag_forms() {
        assert_eq!(
            DefineMap::parse_flag("FOO").unwrap(),
            ("FOO".to_string(), None)
        );
        assert_eq!(
            DefineMap::parse_flag("FOO=1").unwrap(),
            ("FOO".to_string(), Some("1".to_string()))
        );
        assert_eq!(
            DefineMap::parse_flag("-DFOO=bar").unwrap(),
            ("FOO".to_string(), Some("bar".to_string()))
        );
        // Empty value is a valueless-looking but distinct form
        assert_eq!(
            DefineMap::parse_flag("FOO=").unwrap(),
            ("FOO".to_string(), Some(String::new()))
        );
    }

    #[test]
    fn parse_flag_rejects_bad_names() {
        assert!(DefineMap::parse_flag("").is_err());
        assert!(DefineMap::parse_flag("=1").is_err());
        assert!(DefineMap::parse_flag("1FOO").is_err());
        assert!(DefineMap::parse_flag("FO O").is_err());
    }

    #[test]
    fn define_rejects_bad_names() {
        let mut map = DefineMap::new();
        assert!(map.define("9BAD").is_err());
        assert!(map.define_value("", "x").is_err());
        assert!(map.define("_OK").is_ok());
    }

    #[test]
    fn iteration_is_sorted() {
        let mut map = DefineMap::new();
        map.define("ZETA").unwrap();
        map.define("ALPHA").unwrap();
        map.define_value("MID", "3").unwrap();
        let names: Vec<&str> = map.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["ALPHA", "MID", "ZETA"]);
    }
}
