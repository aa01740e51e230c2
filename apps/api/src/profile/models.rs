use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::form::{FieldValue, FieldValues};

/// Output shape of the extractor pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileSchema {
    /// Referral form: combined position, team, English level and assessment.
    #[default]
    Referral,
    /// Separate current title and company, no derived fields.
    Detailed,
}

const REFERRAL_FIELDS: &[&str] = &[
    "candidate_full_name",
    "candidate_email",
    "candidate_phone",
    "linkedin",
    "github",
    "position_referred",
    "candidate_team",
    "years_experience",
    "education_highest",
    "skills",
    "english_speaking_level",
    "overall_assessment",
];

const DETAILED_FIELDS: &[&str] = &[
    "full_name",
    "email",
    "phone",
    "linkedin",
    "github",
    "current_title",
    "current_company",
    "years_experience",
    "education_highest",
    "skills",
];

impl ProfileSchema {
    /// Field names emitted for this schema, in display order.
    pub fn field_names(self) -> &'static [&'static str] {
        match self {
            ProfileSchema::Referral => REFERRAL_FIELDS,
            ProfileSchema::Detailed => DETAILED_FIELDS,
        }
    }

    /// How many ranked skills the profile keeps.
    pub fn top_skills(self) -> usize {
        match self {
            ProfileSchema::Referral => 8,
            ProfileSchema::Detailed => 10,
        }
    }

    /// Whether the derived English level and assessment fields are produced.
    pub fn has_derived_fields(self) -> bool {
        matches!(self, ProfileSchema::Referral)
    }
}

impl FromStr for ProfileSchema {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "referral" => Ok(ProfileSchema::Referral),
            "detailed" => Ok(ProfileSchema::Detailed),
            other => Err(format!(
                "unknown profile schema '{other}' (expected 'referral' or 'detailed')"
            )),
        }
    }
}

/// Structured candidate attributes extracted from one document.
/// Unmatched attributes are empty strings, never absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateProfile {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github: String,
    pub current_title: String,
    pub current_company: String,
    pub years_experience: String,
    pub education_highest: String,
    pub skills: String,
    pub english_level: String,
    pub overall_assessment: String,
}

/// One schema field with a human-readable label, for editing before submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileField {
    pub name: String,
    pub label: String,
    pub value: String,
}

impl CandidateProfile {
    /// Looks up an attribute by any schema's field name.
    pub fn value_of(&self, field: &str) -> Option<&str> {
        let value = match field {
            "candidate_full_name" | "full_name" => &self.full_name,
            "candidate_email" | "email" => &self.email,
            "candidate_phone" | "phone" => &self.phone,
            "linkedin" => &self.linkedin,
            "github" => &self.github,
            "position_referred" | "current_title" => &self.current_title,
            "current_company" => &self.current_company,
            "years_experience" => &self.years_experience,
            "education_highest" => &self.education_highest,
            "skills" => &self.skills,
            "english_speaking_level" => &self.english_level,
            "overall_assessment" => &self.overall_assessment,
            // Filled in by the recruiter.
            "candidate_team" => return Some(""),
            _ => return None,
        };
        Some(value.as_str())
    }

    pub fn fields(&self, schema: ProfileSchema) -> Vec<ProfileField> {
        schema
            .field_names()
            .iter()
            .map(|name| ProfileField {
                name: name.to_string(),
                label: field_label(name),
                value: self.value_of(name).unwrap_or_default().to_string(),
            })
            .collect()
    }

    /// Scalar values keyed by the schema's field names, ready for the form builder.
    pub fn to_field_values(&self, schema: ProfileSchema) -> FieldValues {
        schema
            .field_names()
            .iter()
            .map(|name| {
                let value = self.value_of(name).unwrap_or_default();
                (name.to_string(), FieldValue::Scalar(value.to_string()))
            })
            .collect()
    }
}

/// `candidate_full_name` -> `Candidate Full Name`.
fn field_label(name: &str) -> String {
    name.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
