//! Prefill template decoding — recovers the base URL and entry parameters
//! from an example prefilled link.

use serde::{ser::SerializeMap, Serialize, Serializer};
use url::{form_urlencoded, Url};

use crate::form::models::FieldMapping;

/// Query keys the form system uses for prefill parameters.
pub const ENTRY_PREFIX: &str = "entry.";

/// `entry.*` key → first non-blank value, in the order the keys appear in the link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryMap {
    entries: Vec<(String, String)>,
}

impl EntryMap {
    /// Keeps the first value seen for a key.
    fn insert_first(&mut self, key: String, value: String) {
        if self.get(&key).is_none() {
            self.entries.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for EntryMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrefillTemplate {
    /// The link text before its query and fragment, unchanged.
    pub base_url: String,
    pub entries: EntryMap,
}

/// Splits a prefilled link into its base (scheme, host, path) and its
/// `entry.*` parameters.
///
/// A link without a query yields an empty entry map. Repeated keys keep only
/// their first non-blank value, so decoding a multi-select link and encoding
/// it again does not reproduce the original.
pub fn parse_prefill_template(url: &str) -> PrefillTemplate {
    let url = url.trim();
    let without_fragment = url.split('#').next().unwrap_or_default();
    let (base_url, query) = match without_fragment.split_once('?') {
        Some((base, query)) => (base, query),
        None => (without_fragment, ""),
    };

    // `Url` decodes absolute links; anything it rejects is decoded as a bare query.
    let pairs: Vec<(String, String)> = match Url::parse(url) {
        Ok(parsed) => parsed
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect(),
        Err(_) => form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect(),
    };

    let mut entries = EntryMap::default();
    for (key, value) in pairs {
        if key.starts_with(ENTRY_PREFIX) && !value.is_empty() {
            entries.insert_first(key, value);
        }
    }

    PrefillTemplate {
        base_url: base_url.to_string(),
        entries,
    }
}

/// Inverts an example link whose entries were prefilled with logical field
/// names (`entry.123=full_name`) into a field mapping. Only values naming one
/// of `known_fields` are used; the first entry in the link naming a field wins.
pub fn suggest_mapping(template: &PrefillTemplate, known_fields: &[&str]) -> FieldMapping {
    let mut mapping = FieldMapping::new();
    for (key, value) in template.entries.iter() {
        let candidate = value.trim().to_lowercase().replace([' ', '-'], "_");
        if let Some(field) = known_fields.iter().find(|f| **f == candidate) {
            if mapping.get(field).is_none() {
                mapping.insert(*field, key);
            }
        }
    }
    mapping
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::builder::build_prefilled_url;
    use crate::form::models::{FieldValue, FieldValues};

    const BASE: &str = "https://docs.google.com/forms/d/e/abc/viewform";

    #[test]
    fn test_parses_base_and_entries() {
        let t = parse_prefill_template(&format!(
            "{BASE}?usp=pp_url&entry.1=John+Doe&entry.2=john%40example.com#section"
        ));
        assert_eq!(t.base_url, BASE);
        assert_eq!(t.entries.len(), 2);
        assert_eq!(t.entries.get("entry.1").unwrap(), "John Doe");
        assert_eq!(t.entries.get("entry.2").unwrap(), "john@example.com");
        assert_eq!(t.entries.get("usp"), None);
    }

    #[test]
    fn test_no_query_yields_empty_map() {
        let t = parse_prefill_template(BASE);
        assert_eq!(t.base_url, BASE);
        assert!(t.entries.is_empty());
    }

    #[test]
    fn test_blank_values_are_dropped() {
        let t = parse_prefill_template(&format!("{BASE}?entry.1=&entry.2=x"));
        assert_eq!(t.entries.get("entry.1"), None);
        assert_eq!(t.entries.get("entry.2").unwrap(), "x");
    }

    #[test]
    fn test_relative_link_falls_back_to_split() {
        let t = parse_prefill_template("forms/viewform?entry.5=a+b#top");
        assert_eq!(t.base_url, "forms/viewform");
        assert_eq!(t.entries.get("entry.5").unwrap(), "a b");
    }

    #[test]
    fn test_build_then_parse_round_trip() {
        let mapping: FieldMapping = [("name", "entry.1")].into_iter().collect();
        let mut values = FieldValues::new();
        values.insert("name".into(), "John Doe".into());
        let url = build_prefilled_url(BASE, &mapping, &values, false);
        assert!(url.ends_with("?entry.1=John+Doe"));

        let t = parse_prefill_template(&url);
        assert_eq!(t.base_url, BASE);
        assert_eq!(t.entries.get("entry.1").unwrap(), "John Doe");
    }

    #[test]
    fn test_multiselect_decode_keeps_first_value_only() {
        let mapping: FieldMapping = [("proj", "entry.9")].into_iter().collect();
        let mut values = FieldValues::new();
        values.insert("proj".into(), vec!["Azure", "O365"].into());
        let url = build_prefilled_url(BASE, &mapping, &values, false);

        let t = parse_prefill_template(&url);
        assert_eq!(t.entries.get("entry.9").unwrap(), "Azure");

        // Re-encoding the decoded entries loses the second selection.
        let echo: FieldMapping = [("entry.9", "entry.9")].into_iter().collect();
        let decoded: FieldValues = t
            .entries
            .iter()
            .map(|(k, v)| (k.to_string(), FieldValue::from(v)))
            .collect();
        let rebuilt = build_prefilled_url(&t.base_url, &echo, &decoded, false);
        assert_ne!(rebuilt, url);
        assert!(!rebuilt.contains("O365"));
    }

    #[test]
    fn test_suggest_mapping_inverts_field_names() {
        let t = parse_prefill_template(&format!(
            "{BASE}?entry.11=full_name&entry.22=Email&entry.33=whatever&entry.44=full_name"
        ));
        let mapping = suggest_mapping(&t, &["full_name", "email", "phone"]);
        assert_eq!(mapping.get("full_name"), Some("entry.11"));
        assert_eq!(mapping.get("email"), Some("entry.22"));
        assert_eq!(mapping.get("phone"), None);
        assert_eq!(mapping.len(), 2);
    }

    #[test]
    fn test_host_only_base_is_not_normalized() {
        let t = parse_prefill_template("https://forms.example.com?entry.1=x");
        assert_eq!(t.base_url, "https://forms.example.com");
        assert_eq!(t.entries.get("entry.1"), Some("x"));
    }

    #[test]
    fn test_mixed_case_base_is_kept_verbatim() {
        let t = parse_prefill_template("https://Forms.Example.com/My Form/viewform?entry.1=x#top");
        assert_eq!(t.base_url, "https://Forms.Example.com/My Form/viewform");
    }

    #[test]
    fn test_host_only_round_trip_recovers_base() {
        let base = "https://forms.example.com";
        let mapping: FieldMapping = [("name", "entry.1")].into_iter().collect();
        let mut values = FieldValues::new();
        values.insert("name".into(), "Ann".into());
        let url = build_prefilled_url(base, &mapping, &values, false);
        assert_eq!(parse_prefill_template(&url).base_url, base);
    }

    #[test]
    fn test_entries_keep_link_order() {
        let t = parse_prefill_template(&format!("{BASE}?entry.9=a&entry.10=b&entry.2=c"));
        let keys: Vec<_> = t.entries.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["entry.9", "entry.10", "entry.2"]);
        assert_eq!(
            serde_json::to_string(&t.entries).unwrap(),
            r#"{"entry.9":"a","entry.10":"b","entry.2":"c"}"#
        );
    }

    #[test]
    fn test_suggest_mapping_prefers_earliest_entry_in_link() {
        let t = parse_prefill_template(&format!("{BASE}?entry.9=full_name&entry.10=full_name"));
        let mapping = suggest_mapping(&t, &["full_name"]);
        assert_eq!(mapping.get("full_name"), Some("entry.9"));
    }
}
