//! Prefilled link builder — serializes field values into form prefill parameters.

use url::form_urlencoded;

use crate::form::models::{FieldMapping, FieldValue, FieldValues};

/// Builds a prefilled form URL.
///
/// The mapping is the sole authority on what gets serialized: values without a
/// mapping entry are ignored, mapped fields without a value count as empty.
/// Every value is trimmed; empty values are skipped unless `keep_empty` is set.
/// List values emit one `param=value` pair per element, in list order.
///
/// Returns `base_url` unchanged when no pair is emitted.
pub fn build_prefilled_url(
    base_url: &str,
    mapping: &FieldMapping,
    values: &FieldValues,
    keep_empty: bool,
) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    let mut emitted = 0usize;

    let mut push = |param: &str, raw: &str| {
        let value = raw.trim();
        if !value.is_empty() || keep_empty {
            query.append_pair(param, value);
            emitted += 1;
        }
    };

    for (field, param) in mapping.iter() {
        match values.get(field) {
            Some(FieldValue::List(items)) => {
                for item in items {
                    push(param, item.as_str());
                }
            }
            Some(FieldValue::Scalar(value)) => push(param, value.as_str()),
            None => push(param, ""),
        }
    }

    if emitted == 0 {
        return base_url.to_string();
    }
    format!("{base_url}?{}", query.finish())
}
