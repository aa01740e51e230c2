//! Career heuristics: current role, years of experience, education, English level,
//! and the templated assessment derived from them.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::profile::normalize_spaces;

const MAX_TITLE_CHARS: usize = 80;
const MAX_COMPANY_CHARS: usize = 80;
const MAX_EXPERIENCE_SPAN: i32 = 45;

static SECTION_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?im)^[ \t]*(?:work experience|professional experience|employment history|employment|experience)[ \t]*(?:[:\-][ \t]*([^\n]*))?$",
    )
    .expect("valid regex")
});

static INLINE_ROLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^[ \t]*([A-Z][A-Za-z0-9 /&,\-]{1,79})[ \t]+at[ \t]+([A-Z][A-Za-z0-9 /&,.\-]{1,79})[ \t]*$",
    )
    .expect("valid regex")
});

static YEARS_EXPLICIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})\+?\s*(?:years|yrs)\s+(?:of\s+)?experience").expect("valid regex")
});

static CALENDAR_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(19\d{2}|20\d{2})\b").expect("valid regex"));

/// Degree tiers, highest first. The first tier with any match wins; inside a
/// tier the patterns are tried in order.
static EDUCATION_TIERS: Lazy<Vec<Vec<Regex>>> = Lazy::new(|| {
    let tiers: &[&[&str]] = &[
        &[r"(?i)\bPh\.?D\b"],
        &[r"(?i)\bDoctor(?:ate)?\b"],
        &[
            r"(?i)\bMaster(?:['’]?s)?\b",
            r"(?i)\bM\.?Sc\b",
            r"(?i)\bMBA\b",
        ],
        &[
            r"(?i)\bBachelor(?:['’]?s)?\b",
            r"(?i)\bB\.?Sc\b",
            r"(?i)\bB\.?Eng\b",
        ],
        &[r"(?i)\bDiploma\b"],
    ];
    tiers
        .iter()
        .map(|tier| {
            tier.iter()
                .map(|p| Regex::new(p).expect("valid regex"))
                .collect()
        })
        .collect()
});

static ENGLISH_LEVEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)IELTS\s*\d(?:\.\d)?|TOEIC\s*\d+|English\s*:\s*[^\n]{1,40}")
        .expect("valid regex")
});

/// Current title and company, or empty strings.
///
/// An "Experience" section header takes precedence: its first line is split on
/// " at " (any case). Otherwise the first standalone `<Title> at <Company>` line
/// is used.
pub fn guess_title_company(text: &str) -> (String, String) {
    section_title_company(text)
        .or_else(|| inline_title_company(text))
        .unwrap_or_default()
}

fn section_title_company(text: &str) -> Option<(String, String)> {
    for caps in SECTION_HEADER.captures_iter(text) {
        let inline = caps
            .get(1)
            .map(|m| m.as_str().trim())
            .filter(|s| !s.is_empty());
        let segment = match inline {
            Some(segment) => Some(segment),
            None => caps.get(0).and_then(|header| {
                text[header.end()..]
                    .lines()
                    .map(str::trim)
                    .find(|line| !line.is_empty())
            }),
        };
        if let Some(pair) = segment.and_then(split_title_company) {
            return Some(pair);
        }
    }
    None
}

fn split_title_company(segment: &str) -> Option<(String, String)> {
    let segment = normalize_spaces(segment);
    // ASCII lowering keeps byte offsets aligned with `segment`.
    let lowered = segment.to_ascii_lowercase();
    let (title, company) = match lowered.find(" at ") {
        Some(idx) => (segment[..idx].trim(), segment[idx + 4..].trim()),
        None => (segment.as_str(), ""),
    };
    let title = title.trim_end_matches([',', '|', '-']).trim();
    let company = company.trim_end_matches([',', '|', '-', '.']).trim();

    let plausible = title.chars().any(char::is_alphabetic)
        && title.chars().count() <= MAX_TITLE_CHARS
        && company.chars().count() <= MAX_COMPANY_CHARS;
    plausible.then(|| (title.to_string(), company.to_string()))
}

fn inline_title_company(text: &str) -> Option<(String, String)> {
    let caps = INLINE_ROLE.captures(text)?;
    let title = normalize_spaces(caps.get(1)?.as_str());
    let company = normalize_spaces(caps.get(2)?.as_str());
    Some((title, company))
}

/// Explicit "N years of experience", else the span between the earliest and
/// latest calendar year mentioned (accepted when 1..=45).
pub fn guess_years_experience(text: &str) -> String {
    if let Some(years) = YEARS_EXPLICIT.captures(text).and_then(|c| c.get(1)) {
        return years.as_str().to_string();
    }

    let years: Vec<i32> = CALENDAR_YEAR
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect();
    let (Some(min), Some(max)) = (years.iter().min(), years.iter().max()) else {
        return String::new();
    };
    let span = max - min;
    if span > 0 && span <= MAX_EXPERIENCE_SPAN {
        span.to_string()
    } else {
        String::new()
    }
}

/// Highest degree mentioned, as written in the source.
pub fn guess_education(text: &str) -> String {
    EDUCATION_TIERS
        .iter()
        .flatten()
        .find_map(|pattern| pattern.find(text))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

pub fn guess_english_level(text: &str) -> String {
    ENGLISH_LEVEL
        .find(text)
        .map(|m| normalize_spaces(m.as_str()))
        .unwrap_or_default()
}

/// Short recruiter summary; each sentence appears only when its source field is set.
pub fn build_overall_assessment(position: &str, years_experience: &str, skills: &str) -> String {
    let mut parts = Vec::new();
    if !position.is_empty() {
        parts.push(format!("Candidate aligns with role: {position}."));
    }
    if !years_experience.is_empty() {
        parts.push(format!("Estimated {years_experience} years of experience."));
    }
    if !skills.is_empty() {
        parts.push(format!("Key skills: {skills}."));
    }
    parts.join(" ")
}
