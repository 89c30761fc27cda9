//! Tokenizer: turns free-form résumé text into a candidate skill set.
//!
//! This is a word-length filter, not a skill extractor. Keep it that way:
//! callers (and the role table) are calibrated against its crude output.

use crate::skills::SkillSet;

/// Tokens must be strictly longer than this many characters to be kept.
pub const MIN_TOKEN_CHARS: usize = 3;
/// Maximum number of distinct tokens kept per profile.
pub const MAX_TOKENS: usize = 30;

/// Extracts the candidate skill set from free text.
///
/// Splits on whitespace, drops tokens of `MIN_TOKEN_CHARS` characters or fewer,
/// lower-cases and deduplicates. At most `MAX_TOKENS` distinct tokens are kept.
/// Which tokens survive the cap is implementation-defined; callers must not rely
/// on it. This implementation keeps the first distinct tokens in text order.
///
/// Empty or whitespace-only input yields an empty set.
pub fn extract(text: &str) -> SkillSet {
    let mut skills = SkillSet::new();

    for token in text.split_whitespace() {
        if skills.len() >= MAX_TOKENS {
            break;
        }
        if token.chars().count() <= MIN_TOKEN_CHARS {
            continue;
        }
        skills.insert(token.to_lowercase());
    }

    skills
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> SkillSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_length_filter_drops_three_letter_skills() {
        let skills = extract("Experienced Python developer with SQL and AWS skills");
        assert_eq!(
            skills,
            set(&["experienced", "python", "developer", "with", "skills"])
        );
        assert!(!skills.contains("sql"));
        assert!(!skills.contains("aws"));
    }

    #[test]
    fn test_empty_text_yields_empty_set() {
        assert!(extract("").is_empty());
        assert!(extract("   \n\t  ").is_empty());
    }

    #[test]
    fn test_lowercases_and_dedups() {
        let skills = extract("Rust RUST rust Kubernetes kubernetes");
        assert_eq!(skills, set(&["rust", "kubernetes"]));
    }

    #[test]
    fn test_punctuation_is_kept_on_tokens() {
        // Whitespace split only: trailing punctuation stays attached.
        let skills = extract("Python, Docker.");
        assert_eq!(skills, set(&["python,", "docker."]));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // "café" is 4 chars but 5 bytes.
        let skills = extract("café été");
        assert_eq!(skills, set(&["café"]));
    }

    #[test]
    fn test_caps_at_max_tokens() {
        let text: Vec<String> = (0..100).map(|i| format!("token{i:03}")).collect();
        let skills = extract(&text.join(" "));
        assert_eq!(skills.len(), MAX_TOKENS);
    }

    #[test]
    fn test_duplicates_do_not_count_toward_cap() {
        let mut words = vec!["repeated"; 50];
        words.push("distinct");
        let skills = extract(&words.join(" "));
        assert_eq!(skills, set(&["repeated", "distinct"]));
    }

    #[test]
    fn test_extract_is_idempotent() {
        let text = "Senior Backend Engineer building Kafka pipelines in Rust and Scala";
        assert_eq!(extract(text), extract(text));
    }

    #[test]
    fn test_reextracting_joined_output_is_subset() {
        let text = "Data Engineer: Spark, Airflow, Python; dbt and Snowflake warehousing";
        let first = extract(text);
        let joined = first.iter().cloned().collect::<Vec<_>>().join(" ");
        let second = extract(&joined);
        assert!(second.is_subset(&first));
    }
}
