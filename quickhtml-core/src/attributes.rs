//! Insertion-ordered attribute lists.

use std::fmt;

use indexmap::IndexMap;

use crate::{AttrValue, attribute_name};

/// Attributes of one element, kept in the order the caller supplied them.
///
/// Keys are stored as given and remapped through [`attribute_name`] only when
/// rendered. Inserting an existing key replaces its value in place.
///
/// ```
/// use quickhtml_core::Attributes;
///
/// let attrs = Attributes::new()
///     .with("role", "presentation")
///     .with("class_", "active");
/// assert_eq!(attrs.to_string(), "role='presentation' class='active'");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    entries: IndexMap<String, AttrValue>,
}

impl Attributes {
    /// Create an empty attribute list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute (consuming).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add an attribute.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> &mut Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Look up a value by the key it was inserted with.
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Renders `key=value` pairs separated by single spaces.
impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}={}", attribute_name(key), value)?;
        }
        Ok(())
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<AttrValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        attrs.extend(iter);
        attrs
    }
}

impl<K, V> Extend<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<AttrValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Attributes
where
    K: Into<String>,
    V: Into<AttrValue>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K, V> From<Vec<(K, V)>> for Attributes
where
    K: Into<String>,
    V: Into<AttrValue>,
{
    fn from(pairs: Vec<(K, V)>) -> Self {
        pairs.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_renders_nothing() {
        let attrs = Attributes::new();
        assert!(attrs.is_empty());
        assert_eq!(attrs.to_string(), "");
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let attrs = Attributes::from([("rel", "stylesheet"), ("href", "style.css")]);
        assert_eq!(attrs.to_string(), "rel='stylesheet' href='style.css'");

        let attrs = Attributes::from([("href", "style.css"), ("rel", "stylesheet")]);
        assert_eq!(attrs.to_string(), "href='style.css' rel='stylesheet'");
    }

    #[test]
    fn test_reserved_key_is_remapped_on_render() {
        let attrs = Attributes::new().with("class_", "container");
        assert_eq!(attrs.get("class_"), Some(&AttrValue::from("container")));
        assert_eq!(attrs.get("class"), None);
        assert_eq!(attrs.to_string(), "class='container'");
    }

    #[test]
    fn test_mixed_scalar_kinds() {
        let attrs = Attributes::new()
            .with("tabindex", 1)
            .with("hidden", false)
            .with("opacity", 0.5)
            .with("title", "x");
        assert_eq!(attrs.len(), 4);
        assert_eq!(
            attrs.to_string(),
            "tabindex=1 hidden=False opacity=0.5 title='x'"
        );
    }

    #[test]
    fn test_duplicate_key_replaces_in_place() {
        let mut attrs = Attributes::new().with("a", 1).with("b", 2);
        attrs.insert("a", 3);
        assert_eq!(attrs.to_string(), "a=3 b=2");
    }

    #[test]
    fn test_collect_from_vec() {
        let attrs: Attributes = vec![("id", "main")].into();
        let keys: Vec<_> = attrs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["id"]);
    }
}
