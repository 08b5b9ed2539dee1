//! Per-field options and convert-all configuration.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reserved option key carrying the options of a container's element type
pub const INTERIOR_KEY: &str = "_interior";

/// Options passed to a field constructor.
///
/// Serialized as one flat object; the options for a contained element type
/// live under the reserved `_interior` key and never count as own options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldOptions {
    #[serde(rename = "_interior", default, skip_serializing_if = "Option::is_none")]
    interior: Option<Box<FieldOptions>>,
    #[serde(flatten)]
    values: BTreeMap<String, Value>,
}

impl FieldOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`FieldOptions::insert`]
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    #[must_use]
    pub fn with_interior(mut self, interior: FieldOptions) -> Self {
        self.interior = Some(Box::new(interior));
        self
    }

    /// Sets an own option.
    ///
    /// The `_interior` key replaces the interior options instead and `null`
    /// clears them. Any other value leaves the interior options untouched.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        if key == INTERIOR_KEY {
            match value {
                Value::Null => self.interior = None,
                value => match serde_json::from_value::<FieldOptions>(value) {
                    Ok(interior) => self.interior = Some(Box::new(interior)),
                    Err(err) => {
                        tracing::debug!(
                            %err,
                            "ignoring `_interior` value that is not an options object"
                        );
                    }
                },
            }
            return;
        }
        self.values.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn interior(&self) -> Option<&FieldOptions> {
        self.interior.as_deref()
    }

    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.interior.is_none()
    }

    /// Splits into own options and interior options (empty when absent).
    pub fn split(self) -> (BTreeMap<String, Value>, FieldOptions) {
        let interior = self.interior.map(|b| *b).unwrap_or_default();
        (self.values, interior)
    }

    /// Layers `self` over `baseline`: keys present in `self` win, interior
    /// options are merged with the same precedence.
    #[must_use]
    pub fn merged_over(&self, baseline: &FieldOptions) -> FieldOptions {
        let mut values = baseline.values.clone();
        values.extend(self.values.iter().map(|(k, v)| (k.clone(), v.clone())));

        let interior = match (&self.interior, &baseline.interior) {
            (Some(top), Some(base)) => Some(Box::new(top.merged_over(base))),
            (Some(only), None) | (None, Some(only)) => Some(only.clone()),
            (None, None) => None,
        };

        FieldOptions { interior, values }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for FieldOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = FieldOptions::new();
        for (key, value) in iter {
            options.insert(key, value);
        }
        options
    }
}

/// Per-attribute option overrides, keyed by attribute name
pub type FieldConfigs = HashMap<String, FieldOptions>;

/// Configuration for a whole-class conversion.
///
/// ```json
/// {
///   "fields": { "name": { "missing": "anonymous" } },
///   "ignore": ["password"]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertAllOptions {
    pub fields: FieldConfigs,
    pub ignore: HashSet<String>,
}

impl ConvertAllOptions {
    pub fn from_json(source: &str) -> serde_json::Result<Self> {
        serde_json::from_str(source)
    }

    #[must_use]
    pub fn field(mut self, name: impl Into<String>, options: FieldOptions) -> Self {
        self.fields.insert(name.into(), options);
        self
    }

    #[must_use]
    pub fn ignore(mut self, name: impl Into<String>) -> Self {
        self.ignore.insert(name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_interior_is_not_an_own_option() {
        let opts: FieldOptions = serde_json::from_value(json!({
            "default": 1,
            "_interior": { "as_string": true }
        }))
        .unwrap();

        assert_eq!(opts.get("default"), Some(&json!(1)));
        assert_eq!(opts.get(INTERIOR_KEY), None);
        assert_eq!(opts.interior().and_then(|i| i.get("as_string")), Some(&json!(true)));

        let (own, interior) = opts.split();
        assert_eq!(own.len(), 1);
        assert_eq!(interior.get("as_string"), Some(&json!(true)));
    }

    #[test]
    fn test_split_without_interior_is_empty() {
        let (own, interior) = FieldOptions::new().with("missing", "a").split();
        assert_eq!(own.get("missing"), Some(&json!("a")));
        assert!(interior.is_empty());
    }

    #[test]
    fn test_insert_routes_interior_key() {
        let mut opts = FieldOptions::new();
        opts.insert(INTERIOR_KEY, json!({ "as_string": true }));
        assert!(opts.values().is_empty());
        assert_eq!(opts.interior().unwrap().get("as_string"), Some(&json!(true)));
    }

    #[rstest]
    #[case(json!("yes"))]
    #[case(json!(true))]
    #[case(json!(3))]
    #[case(json!([1, 2]))]
    fn test_insert_keeps_interior_on_non_object(#[case] value: Value) {
        let mut opts = FieldOptions::new().with_interior(FieldOptions::new().with("as_string", true));
        opts.insert(INTERIOR_KEY, value);
        assert!(opts.values().is_empty());
        assert_eq!(opts.interior().unwrap().get("as_string"), Some(&json!(true)));
    }

    #[test]
    fn test_insert_null_clears_interior() {
        let mut opts = FieldOptions::new().with_interior(FieldOptions::new().with("as_string", true));
        opts.insert(INTERIOR_KEY, Value::Null);
        assert!(opts.interior().is_none());
    }

    #[test]
    fn test_from_iter_skips_bad_interior() {
        let opts: FieldOptions = [("_interior", json!({ "a": 1 })), ("_interior", json!("b"))]
            .into_iter()
            .collect();
        assert_eq!(opts.interior().unwrap().get("a"), Some(&json!(1)));
    }

    #[test]
    fn test_from_iter() {
        let opts: FieldOptions = [("default", json!("x")), ("_interior", json!({ "a": 1 }))]
            .into_iter()
            .collect();
        assert_eq!(opts.get("default"), Some(&json!("x")));
        assert_eq!(opts.interior().unwrap().get("a"), Some(&json!(1)));
    }

    #[test]
    fn test_merged_over_prefers_top() {
        let baseline = FieldOptions::new()
            .with("missing", "panda")
            .with("required", false)
            .with_interior(FieldOptions::new().with("as_string", false).with("places", 2));
        let top = FieldOptions::new()
            .with("missing", "a")
            .with_interior(FieldOptions::new().with("as_string", true));

        let merged = top.merged_over(&baseline);

        assert_eq!(merged.get("missing"), Some(&json!("a")));
        assert_eq!(merged.get("required"), Some(&json!(false)));
        let interior = merged.interior().unwrap();
        assert_eq!(interior.get("as_string"), Some(&json!(true)));
        assert_eq!(interior.get("places"), Some(&json!(2)));
    }

    #[test]
    fn test_serialize_flat() {
        let opts = FieldOptions::new()
            .with("default", "x")
            .with_interior(FieldOptions::new().with("as_string", true));
        assert_snapshot!(
            serde_json::to_string(&opts).unwrap(),
            @r#"{"_interior":{"as_string":true},"default":"x"}"#
        );
    }

    #[test]
    fn test_convert_all_options_from_json() {
        let opts = ConvertAllOptions::from_json(
            r#"{ "fields": { "name": { "missing": "a" } }, "ignore": ["id"] }"#,
        )
        .unwrap();
        assert_eq!(opts.fields["name"].get("missing"), Some(&json!("a")));
        assert!(opts.ignore.contains("id"));

        let empty = ConvertAllOptions::from_json("{}").unwrap();
        assert_eq!(empty, ConvertAllOptions::default());
    }
}
