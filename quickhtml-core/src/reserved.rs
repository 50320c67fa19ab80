//! Reserved-word remap for attribute keys.
//!
//! Markup attributes such as `class` are keywords in many host languages, so
//! callers spell them with a trailing underscore. Tag names are never remapped.

/// Attribute keys that are rewritten before serialization.
pub const RESERVED_WORDS: &[(&str, &str)] = &[("class_", "class")];

/// Map an attribute key to the name written into markup.
///
/// ```
/// use quickhtml_core::attribute_name;
///
/// assert_eq!(attribute_name("class_"), "class");
/// assert_eq!(attribute_name("href"), "href");
/// ```
pub fn attribute_name(key: &str) -> &str {
    RESERVED_WORDS
        .iter()
        .find(|(alias, _)| *alias == key)
        .map_or(key, |&(_, name)| name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_is_remapped() {
        assert_eq!(attribute_name("class_"), "class");
    }

    #[test]
    fn test_other_keys_pass_through() {
        assert_eq!(attribute_name("class"), "class");
        assert_eq!(attribute_name("type_"), "type_");
        assert_eq!(attribute_name("data-id"), "data-id");
        assert_eq!(attribute_name("_class_"), "_class_");
        assert_eq!(attribute_name(""), "");
    }
}
