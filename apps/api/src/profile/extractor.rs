//! Profile extraction pipeline — runs every heuristic over one text blob.
//!
//! Each heuristic is independent and degrades to an empty string. The only
//! ordering dependency is the assessment, which is templated from the title,
//! years and skills results.

use tracing::debug;

use crate::profile::career::{
    build_overall_assessment, guess_education, guess_english_level, guess_title_company,
    guess_years_experience,
};
use crate::profile::contact::{find_email, find_phone, find_social_url, guess_name};
use crate::profile::models::{CandidateProfile, ProfileSchema};
use crate::profile::skills::rank_skills;

pub const DEFAULT_MAX_INPUT_BYTES: usize = 200_000;
pub const DEFAULT_NAME_SCAN_LINES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractorConfig {
    pub schema: ProfileSchema,
    /// Longer documents are cut at this size before matching.
    pub max_input_bytes: usize,
    /// Non-empty header lines searched for the candidate's name.
    pub name_scan_lines: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            schema: ProfileSchema::default(),
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            name_scan_lines: DEFAULT_NAME_SCAN_LINES,
        }
    }
}

impl ExtractorConfig {
    pub fn with_schema(self, schema: ProfileSchema) -> Self {
        Self { schema, ..self }
    }
}

/// Extracts a profile with the default configuration.
pub fn extract(text: &str) -> CandidateProfile {
    extract_profile(text, &ExtractorConfig::default())
}

pub fn extract_profile(text: &str, config: &ExtractorConfig) -> CandidateProfile {
    let text = truncate_at_char_boundary(text, config.max_input_bytes).replace("\r\n", "\n");
    let schema = config.schema;

    let (current_title, current_company) = guess_title_company(&text);
    let years_experience = guess_years_experience(&text);
    let skills = rank_skills(&text, schema.top_skills());

    let (english_level, overall_assessment) = if schema.has_derived_fields() {
        (
            guess_english_level(&text),
            build_overall_assessment(&current_title, &years_experience, &skills),
        )
    } else {
        (String::new(), String::new())
    };

    let profile = CandidateProfile {
        full_name: guess_name(&text, config.name_scan_lines),
        email: find_email(&text),
        phone: find_phone(&text),
        linkedin: find_social_url(&text, "linkedin.com"),
        github: find_social_url(&text, "github.com"),
        // The referral schema reads this as its combined position field.
        current_title,
        current_company: match schema {
            ProfileSchema::Detailed => current_company,
            ProfileSchema::Referral => String::new(),
        },
        years_experience,
        education_highest: guess_education(&text),
        skills,
        english_level,
        overall_assessment,
    };

    debug!(
        schema = ?schema,
        input_bytes = text.len(),
        matched = count_matched(&profile),
        "Extracted candidate profile"
    );
    profile
}

fn truncate_at_char_boundary(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

fn count_matched(profile: &CandidateProfile) -> usize {
    [
        &profile.full_name,
        &profile.email,
        &profile.phone,
        &profile.linkedin,
        &profile.github,
        &profile.current_title,
        &profile.current_company,
        &profile.years_experience,
        &profile.education_highest,
        &profile.skills,
        &profile.english_level,
        &profile.overall_assessment,
    ]
    .iter()
    .filter(|v| !v.is_empty())
    .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CV: &str = "
John Doe
Email: john.doe@example.com
Phone: +1 (555) 123-4567
LinkedIn: linkedin.com/in/johndoe
GitHub: github.com/johndoe
Senior Software Engineer at Acme Corp
8 years of experience
Education: Bachelor's in Physics, Master's in Computer Science
Skills: Python, SQL, AWS, Docker, React
Python Python
IELTS 7.5
";

    #[test]
    fn test_referral_profile_from_sample_cv() {
        let profile = extract(SAMPLE_CV);
        assert_eq!(profile.full_name, "John Doe");
        assert_eq!(profile.email, "john.doe@example.com");
        assert!(profile.phone.contains("555"));
        assert_eq!(profile.linkedin, "https://linkedin.com/in/johndoe");
        assert_eq!(profile.github, "https://github.com/johndoe");
        assert_eq!(profile.current_title, "Senior Software Engineer");
        assert_eq!(profile.current_company, "");
        assert_eq!(profile.years_experience, "8");
        assert_eq!(profile.education_highest, "Master's");
        assert!(profile.skills.starts_with("python, "));
        assert_eq!(profile.english_level, "IELTS 7.5");
        assert_eq!(
            profile.overall_assessment,
            format!(
                "Candidate aligns with role: Senior Software Engineer. Estimated 8 years of experience. Key skills: {}.",
                profile.skills
            )
        );
    }

    #[test]
    fn test_detailed_profile_splits_company_and_skips_derived() {
        let config = ExtractorConfig::default().with_schema(ProfileSchema::Detailed);
        let profile = extract_profile(SAMPLE_CV, &config);
        assert_eq!(profile.current_title, "Senior Software Engineer");
        assert_eq!(profile.current_company, "Acme Corp");
        assert_eq!(profile.english_level, "");
        assert_eq!(profile.overall_assessment, "");
    }

    #[test]
    fn test_python_ranks_above_sql() {
        let profile = extract("Python, python and PYTHON. Also SQL.");
        let skills: Vec<_> = profile.skills.split(", ").collect();
        let python = skills.iter().position(|s| *s == "python").unwrap();
        let sql = skills.iter().position(|s| *s == "sql").unwrap();
        assert!(python < sql);
    }

    #[test]
    fn test_empty_text_yields_all_empty_strings() {
        let profile = extract("");
        assert_eq!(profile, CandidateProfile::default());
        for schema in [ProfileSchema::Referral, ProfileSchema::Detailed] {
            for field in profile.fields(schema) {
                assert_eq!(field.value, "", "field {}", field.name);
            }
        }
    }

    #[test]
    fn test_garbage_input_never_panics() {
        let noise = "@@@ ((( 123 ))) \u{0}\u{feff} ...---... \n\n\t".repeat(50);
        let profile = extract(&noise);
        assert_eq!(profile.email, "");
        assert_eq!(profile.full_name, "");
    }

    #[test]
    fn test_crlf_input() {
        let text = "Jane Roe\r\nExperience\r\nQA Lead at Hooli\r\n";
        let config = ExtractorConfig::default().with_schema(ProfileSchema::Detailed);
        let profile = extract_profile(text, &config);
        assert_eq!(profile.full_name, "Jane Roe");
        assert_eq!(profile.current_title, "QA Lead");
        assert_eq!(profile.current_company, "Hooli");
    }

    #[test]
    fn test_year_span_fallback() {
        let profile = extract("Graduated 2015\nStill coding in 2023");
        assert_eq!(profile.years_experience, "8");
    }

    #[test]
    fn test_input_is_capped() {
        let config = ExtractorConfig {
            max_input_bytes: 16,
            ..ExtractorConfig::default()
        };
        let text = format!("{}contact: late@example.com", "x".repeat(32));
        assert_eq!(extract_profile(&text, &config).email, "");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_at_char_boundary("héllo", 2), "h");
        assert_eq!(truncate_at_char_boundary("abc", 10), "abc");
    }
}
