//! The directive override map.

use super::DirectiveError;
use crate::coerce::format_float;
use crate::value::{self, Value};
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Directives maps configuration keys to raw, uncoerced string values.
///
/// Keys are unique; inserting an existing key replaces its value. Iteration
/// follows insertion order, which only matters for log output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Value")]
pub struct Directives {
    entries: IndexMap<String, String>,
}

impl Directives {
    pub fn new() -> Self {
        Directives {
            entries: IndexMap::new(),
        }
    }

    /// Sets `key` to the raw `value`, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Layers `other` on top of this set; its keys win.
    pub fn extend(&mut self, other: Directives) {
        self.entries.extend(other.entries);
    }

    /// Splits a `KEY=VALUE` pair at the first `=`.
    ///
    /// The key is trimmed and must not be empty. The value is kept verbatim,
    /// so it may be empty or contain further `=` signs.
    pub fn parse_pair(pair: &str) -> Result<(String, String), DirectiveError> {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| DirectiveError::invalid_pair(pair, "expected KEY=VALUE"))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(DirectiveError::invalid_pair(pair, "empty key"));
        }
        Ok((key.to_string(), value.to_string()))
    }

    /// Builds a directive set from `KEY=VALUE` pairs. Later pairs win.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Directives, DirectiveError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut directives = Directives::new();
        for pair in pairs {
            let (key, value) = Directives::parse_pair(pair.as_ref())?;
            directives.insert(key, value);
        }
        Ok(directives)
    }

    /// Parses a YAML or JSON mapping of directives.
    ///
    /// `origin` names the source in error messages.
    pub fn from_yaml_str(text: &str, origin: &str) -> Result<Directives, DirectiveError> {
        let parsed = value::from_yaml(text).map_err(|e| DirectiveError::parse(origin, e))?;
        Directives::try_from(parsed).map_err(|e| match e {
            DirectiveError::Parse { message, .. } => DirectiveError::parse(origin, message),
            other => other,
        })
    }

    /// Reads a directive file (YAML or JSON).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Directives, DirectiveError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| DirectiveError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Directives::from_yaml_str(&text, &path.display().to_string())
    }
}

impl TryFrom<Value> for Directives {
    type Error = DirectiveError;

    /// Accepts a mapping, null (no directives), or a string holding a JSON
    /// encoded mapping, which is how some inventories store hash attributes.
    fn try_from(v: Value) -> Result<Self, Self::Error> {
        match v {
            Value::Null => Ok(Directives::new()),
            Value::Map(m) => Ok(m
                .fields
                .into_iter()
                .map(|(key, value)| (key, raw_text(&value)))
                .collect()),
            Value::String(s) if s.trim().is_empty() => Ok(Directives::new()),
            Value::String(s) => match value::from_json(&s) {
                Ok(inner @ Value::Map(_)) => Directives::try_from(inner),
                _ => Err(DirectiveError::parse(
                    "directives",
                    "string value is not a JSON object",
                )),
            },
            other => Err(DirectiveError::parse(
                "directives",
                format!("expected a mapping, found {}", other.kind()),
            )),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Directives {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut directives = Directives::new();
        for (k, v) in iter {
            directives.insert(k, v);
        }
        directives
    }
}

/// Renders a typed value back to the raw text a user would have typed for it.
///
/// Scalars become their plain text; lists and maps become compact JSON, which
/// coercion reads back into the same structure. Infinite and NaN floats
/// render as `inf`, `-inf` and `NaN`, which coercion keeps as strings.
fn raw_text(v: &Value) -> String {
    match v {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::BigInt(digits) => digits.clone(),
        Value::Float(f) => format_float(*f),
        Value::String(s) => s.clone(),
        Value::List(_) | Value::Map(_) => value::to_json(v).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::coerce;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_pair() {
        assert_eq!(
            Directives::parse_pair("num_tokens=256").unwrap(),
            ("num_tokens".to_string(), "256".to_string())
        );
        assert_eq!(
            Directives::parse_pair(" key =a=b").unwrap(),
            ("key".to_string(), "a=b".to_string())
        );
        assert_eq!(
            Directives::parse_pair("empty=").unwrap(),
            ("empty".to_string(), String::new())
        );
    }

    #[test]
    fn test_parse_pair_rejects_malformed() {
        assert!(matches!(
            Directives::parse_pair("no-separator"),
            Err(DirectiveError::InvalidPair { .. })
        ));
        assert!(matches!(
            Directives::parse_pair("  =value"),
            Err(DirectiveError::InvalidPair { .. })
        ));
    }

    #[test]
    fn test_from_pairs_later_wins() {
        let d = Directives::from_pairs(["a=1", "b=x", "a=2"]).unwrap();
        assert_eq!(d.len(), 2);
        assert_eq!(d.get("a"), Some("2"));
        assert_eq!(d.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_from_yaml_str_scalars() {
        let d = Directives::from_yaml_str(
            "cluster_name: Test Cluster\nnum_tokens: 256\nratio: 0.5\nauto_bootstrap: false\n",
            "inline",
        )
        .unwrap();

        assert_eq!(d.get("cluster_name"), Some("Test Cluster"));
        assert_eq!(d.get("num_tokens"), Some("256"));
        assert_eq!(d.get("ratio"), Some("0.5"));
        assert_eq!(d.get("auto_bootstrap"), Some("false"));
    }

    #[test]
    fn test_from_yaml_str_nested_round_trips_through_coerce() {
        let d = Directives::from_yaml_str(
            "seed_provider:\n  - class_name: SimpleSeedProvider\n    seeds: 10.0.0.1\n",
            "inline",
        )
        .unwrap();

        let raw = d.get("seed_provider").unwrap();
        let original = value::from_yaml(
            "- class_name: SimpleSeedProvider\n  seeds: 10.0.0.1\n",
        )
        .unwrap();
        assert_eq!(coerce(raw), original);
    }

    #[test]
    fn test_from_yaml_str_wide_and_special_numbers() {
        let d = Directives::from_yaml_str(
            "initial_token: 85070591730234615865843651857942052864\nceiling: .inf\n",
            "inline",
        )
        .unwrap();

        let token = d.get("initial_token").unwrap();
        assert_eq!(token, "85070591730234615865843651857942052864");
        assert_eq!(coerce(token), Value::BigInt(token.to_string()));

        assert_eq!(d.get("ceiling"), Some("inf"));
        assert_eq!(coerce("inf"), Value::String("inf".into()));
    }

    #[test]
    fn test_from_yaml_str_json_encoded_string() {
        let d = Directives::try_from(Value::String(r#"{"a": "1", "b": "x"}"#.into())).unwrap();
        assert_eq!(d.get("a"), Some("1"));
        assert_eq!(d.get("b"), Some("x"));
    }

    #[test]
    fn test_from_yaml_str_rejects_non_mapping() {
        let err = Directives::from_yaml_str("- a\n- b\n", "list.yaml").unwrap_err();
        assert!(err.to_string().starts_with("list.yaml:"), "{}", err);
        assert!(err.to_string().contains("list"), "{}", err);
    }

    #[test]
    fn test_empty_sources() {
        assert!(Directives::from_yaml_str("", "empty").unwrap().is_empty());
        assert!(Directives::try_from(Value::Null).unwrap().is_empty());
        assert!(Directives::try_from(Value::String(String::new())).unwrap().is_empty());
    }

    #[test]
    fn test_extend() {
        let mut base: Directives = [("a", "1"), ("b", "2")].into_iter().collect();
        let top: Directives = [("b", "20"), ("c", "3")].into_iter().collect();
        base.extend(top);

        assert_eq!(
            base.iter().collect::<Vec<_>>(),
            vec![("a", "1"), ("b", "20"), ("c", "3")]
        );
    }

    #[test]
    fn test_from_file_missing() {
        let err = Directives::from_file("/nonexistent/directives.yaml").unwrap_err();
        assert!(matches!(err, DirectiveError::Read { .. }));
    }
}
