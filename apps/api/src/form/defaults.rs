//! Deployment form configuration: the referral form's base URL, its text
//! field entries and its option (multi-select) entries.

use serde::Serialize;

use crate::form::models::FieldMapping;

pub const FORM_BASE_URL: &str = "https://docs.google.com/forms/d/e/1FAIpQLSfj7dsIMMWBUCSxss7KLGN-dPaANW5awtX44Er0lFmr3VorBg/viewform";

/// Candidate fields → entry IDs.
pub const FORM_FIELD_ENTRIES: &[(&str, &str)] = &[
    ("candidate_full_name", "entry.1048297419"),
    ("position_referred", "entry.2096764674"),
    ("candidate_team", "entry.1625861106"),
    ("candidate_email", "entry.1159734209"),
    ("candidate_phone", "entry.1029247077"),
    ("english_speaking_level", "entry.1577761297"),
    ("overall_assessment", "entry.1668207262"),
    ("cv_drive_link", "entry.366282983"),
];

pub const PROJECT_OPTIONS: &[&str] = &[
    "O365",
    "Azure",
    "Dynamics 365",
    "Windows Commercial",
    "Back office",
];

pub const SHIFT_OPTIONS: &[&str] = &[
    "Can work all assigned shifts (rotating morning, afternoon, and night shifts)",
    "Can only work fixed daytime shifts",
    "Can only work fixed night shifts",
];

pub const ONBOARD_OPTIONS: &[&str] = &[
    "ASAP after interview pass",
    "≤30 days from interview pass",
    ">30 days from interview pass",
];

/// A fixed-choice form question the recruiter preselects.
#[derive(Debug, Clone, Serialize)]
pub struct OptionEntry {
    pub field: &'static str,
    pub entry: &'static str,
    pub options: &'static [&'static str],
}

pub const FORM_OPTION_ENTRIES: &[OptionEntry] = &[
    OptionEntry {
        field: "project_referred",
        entry: "entry.1457734049",
        options: PROJECT_OPTIONS,
    },
    OptionEntry {
        field: "shift_schedule",
        entry: "entry.310100462",
        options: SHIFT_OPTIONS,
    },
    OptionEntry {
        field: "onboard_timeline",
        entry: "entry.1340860074",
        options: ONBOARD_OPTIONS,
    },
];

/// Text entries followed by option entries, in declared order.
pub fn default_mapping() -> FieldMapping {
    FORM_FIELD_ENTRIES
        .iter()
        .copied()
        .chain(FORM_OPTION_ENTRIES.iter().map(|o| (o.field, o.entry)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mapping_merges_text_and_option_entries() {
        let mapping = default_mapping();
        assert_eq!(
            mapping.len(),
            FORM_FIELD_ENTRIES.len() + FORM_OPTION_ENTRIES.len()
        );
        assert_eq!(mapping.get("candidate_full_name"), Some("entry.1048297419"));
        assert_eq!(mapping.get("project_referred"), Some("entry.1457734049"));
        assert_eq!(mapping.iter().next().map(|(f, _)| f), Some("candidate_full_name"));
    }

    #[test]
    fn test_entry_keys_are_unique() {
        let mapping = default_mapping();
        let mut params: Vec<_> = mapping.iter().map(|(_, p)| p).collect();
        params.sort();
        params.dedup();
        assert_eq!(params.len(), mapping.len());
    }
}
