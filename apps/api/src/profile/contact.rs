//! Identity and contact heuristics: name, email, phone, social profile links.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::profile::normalize_spaces;

static NAME_SKIP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)@|linkedin|github|curriculum|resume|cv|phone|email").expect("valid regex")
});

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid regex")
});

// Separators stay on one line so a number never swallows the next line's digits.
static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+?\d[\d \t().-]{8,}\d").expect("valid regex"));

const MIN_PHONE_DIGITS: usize = 10;

static LINKEDIN_URL: Lazy<Regex> = Lazy::new(|| social_pattern("linkedin.com").expect("valid regex"));
static GITHUB_URL: Lazy<Regex> = Lazy::new(|| social_pattern("github.com").expect("valid regex"));

fn social_pattern(domain: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"(?i)(?:https?://)?(?:www\.)?{}/[^\s|,;)]*",
        regex::escape(domain)
    ))
}

/// First line of the header window that looks like a personal name: 2–5
/// tokens, letters only once spaces and hyphens are removed, and no contact
/// markers.
pub fn guess_name(text: &str, scan_lines: usize) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(scan_lines)
        .filter(|line| !NAME_SKIP.is_match(line))
        .find(|line| {
            let tokens = line.split_whitespace().count();
            let mut letters = line.chars().filter(|c| !c.is_whitespace() && *c != '-');
            (2..=5).contains(&tokens) && letters.all(char::is_alphabetic)
        })
        .map(normalize_spaces)
        .unwrap_or_default()
}

pub fn find_email(text: &str) -> String {
    EMAIL
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// First digit run of at least ten digits, whitespace-normalized.
pub fn find_phone(text: &str) -> String {
    PHONE
        .find_iter(text)
        .map(|m| m.as_str())
        .find(|candidate| candidate.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS)
        .map(normalize_spaces)
        .unwrap_or_default()
}

/// First link to `domain` (e.g. `linkedin.com`), upgraded to `https://` when
/// the text omits the scheme.
pub fn find_social_url(text: &str, domain: &str) -> String {
    let compiled;
    let re: &Regex = match domain.to_ascii_lowercase().as_str() {
        "linkedin.com" => &*LINKEDIN_URL,
        "github.com" => &*GITHUB_URL,
        _ => match social_pattern(domain) {
            Ok(re) => {
                compiled = re;
                &compiled
            }
            Err(_) => return String::new(),
        },
    };
    let Some(m) = re.find(text) else {
        return String::new();
    };
    let url = m.as_str().trim();
    if url.to_ascii_lowercase().starts_with("http") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}
