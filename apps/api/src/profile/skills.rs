/// Skill vocabulary, in tie-break order.
pub const KNOWN_SKILLS: &[&str] = &[
    "python",
    "java",
    "javascript",
    "typescript",
    "sql",
    "aws",
    "gcp",
    "azure",
    "docker",
    "kubernetes",
    "react",
    "node",
    "flask",
    "django",
    "fastapi",
    "pandas",
    "numpy",
    "machine learning",
    "data analysis",
    "excel",
    "tableau",
    "power bi",
    "git",
    "linux",
    "terraform",
];

/// Counts case-insensitive occurrences of each vocabulary term and returns the
/// `top_n` most frequent as `"a, b, c"`. Ties keep vocabulary order.
///
/// Counting is by substring, so "java" also counts inside "javascript".
pub fn rank_skills(text: &str, top_n: usize) -> String {
    let lowered = text.to_lowercase();
    let mut counts: Vec<(&str, usize)> = KNOWN_SKILLS
        .iter()
        .map(|skill| (*skill, lowered.matches(skill).count()))
        .filter(|(_, count)| *count > 0)
        .collect();

    // Stable sort: equal counts stay in vocabulary order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
        .into_iter()
        .take(top_n)
        .map(|(skill, _)| skill)
        .collect::<Vec<_>>()
        .join(", ")
}
