//! PICO extraction: ordered pattern families with first-success-wins
//! semantics.
//!
//! Each of the four fields has an ordered list of candidate patterns,
//! evaluated case-insensitively against the concatenated title+abstract
//! text. The first pattern that matches wins and later patterns are never
//! tried; pattern order is an explicit contract, not incidental code order.
//! A miss is not an error; the field stays empty.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::config::ExtractionConfig;
use crate::error::{Error, Result};
use crate::locale::Locale;
use crate::text::truncate_chars;
use crate::types::ArticleRecord;

/// Maximum length of any extracted field, in characters.
const FIELD_MAX_CHARS: usize = 200;
/// MeSH terms used when synthesizing the population fallback.
const FALLBACK_TERMS_MAX: usize = 2;

/// Structured clinical-question decomposition extracted from free text.
///
/// Fields are empty strings when nothing matched, never absent, so
/// downstream rendering stays uniform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pico {
    pub population: String,
    pub intervention: String,
    pub comparison: String,
    pub outcome: String,
}

/// Extracts [`Pico`] fields from article text using the configured pattern
/// families, compiled once at construction.
#[derive(Debug)]
pub struct PicoExtractor {
    population: Vec<Regex>,
    intervention: Vec<Regex>,
    comparison: Vec<Regex>,
    outcome: Vec<Regex>,
    disease_indicators: Vec<String>,
    locale: Locale,
}

impl PicoExtractor {
    /// Compile the configured pattern families. A malformed pattern is a
    /// configuration error here, never a failure at extraction time.
    pub fn new(config: &ExtractionConfig) -> Result<Self> {
        Ok(Self {
            population: compile_family(&config.population_patterns)?,
            intervention: compile_family(&config.intervention_patterns)?,
            comparison: compile_family(&config.comparison_patterns)?,
            outcome: compile_family(&config.outcome_patterns)?,
            disease_indicators: config
                .disease_indicators
                .iter()
                .map(|s| s.to_lowercase())
                .collect(),
            locale: Locale,
        })
    }

    /// Extract PICO fields from one article. Never fails; fields without a
    /// match (and without a fallback) stay empty.
    pub fn extract(&self, article: &ArticleRecord) -> Pico {
        let text = format!("{} {}", article.title, article.abstract_text);

        let mut pico = Pico {
            population: first_match(&self.population, &text),
            intervention: first_match(&self.intervention, &text),
            comparison: first_match(&self.comparison, &text),
            outcome: first_match(&self.outcome, &text),
        };

        if pico.population.is_empty()
            && let Some(population) = self.population_from_mesh(&article.mesh_terms)
        {
            pico.population = population;
        }

        pico
    }

    /// Synthesize a population from disease-indicating MeSH terms when no
    /// population pattern matched.
    fn population_from_mesh(&self, mesh_terms: &[String]) -> Option<String> {
        let disease_terms: Vec<&str> = mesh_terms
            .iter()
            .filter(|term| {
                let lower = term.to_lowercase();
                self.disease_indicators
                    .iter()
                    .any(|indicator| lower.contains(indicator))
            })
            .map(|term| term.as_str())
            .take(FALLBACK_TERMS_MAX)
            .collect();

        if disease_terms.is_empty() {
            None
        } else {
            Some(truncate_chars(
                &self.locale.population_from_terms(&disease_terms),
                FIELD_MAX_CHARS,
            ))
        }
    }
}

fn compile_family(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|pattern| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| Error::Pattern {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })
        })
        .collect()
}

/// Evaluate patterns in order and return the first success, trimmed and
/// capped. A pattern without a capture group yields its whole match.
fn first_match(patterns: &[Regex], text: &str) -> String {
    for pattern in patterns {
        if let Some(captures) = pattern.captures(text) {
            let matched = captures
                .get(1)
                .or_else(|| captures.get(0))
                .map(|m| m.as_str())
                .unwrap_or("");
            return truncate_chars(matched.trim(), FIELD_MAX_CHARS);
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extractor() -> PicoExtractor {
        PicoExtractor::new(&ExtractionConfig::default()).unwrap()
    }

    fn article_with_abstract(abstract_text: &str) -> ArticleRecord {
        ArticleRecord {
            abstract_text: abstract_text.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_population_first_pattern_wins() {
        // Matches both the "patients with" pattern (first) and the
        // "enrolled <n>" pattern (fourth); the first must win.
        let article = article_with_abstract(
            "We enrolled 120 participants. Patients with chronic kidney disease were randomized.",
        );
        let pico = extractor().extract(&article);
        assert_eq!(pico.population, "chronic kidney disease");
    }

    #[test]
    fn test_intervention_extraction() {
        let article = article_with_abstract(
            "Participants received dapagliflozin 10 mg daily, and outcomes were tracked.",
        );
        let pico = extractor().extract(&article);
        assert_eq!(pico.intervention, "dapagliflozin 10 mg daily");
    }

    #[test]
    fn test_comparison_without_capture_group_yields_whole_match() {
        // Only the third comparison pattern (a bare alternation with no
        // capture group) matches here.
        let article = article_with_abstract("All arms continued standard care throughout.");
        let pico = extractor().extract(&article);
        assert_eq!(pico.comparison, "standard care");
    }

    #[test]
    fn test_outcome_extraction() {
        let article = article_with_abstract(
            "The primary outcome was a sustained decline in eGFR of at least 50%",
        );
        let pico = extractor().extract(&article);
        assert_eq!(
            pico.outcome,
            "a sustained decline in eGFR of at least 50%"
        );
    }

    #[test]
    fn test_fields_capped_at_200_chars() {
        let long_population = "x".repeat(400);
        let article = article_with_abstract(&format!(
            "Patients with {long_population} were included,"
        ));
        let pico = extractor().extract(&article);
        assert!(pico.population.chars().count() <= 200);
    }

    #[test]
    fn test_population_falls_back_to_disease_mesh_terms() {
        let article = ArticleRecord {
            abstract_text: "No matching phrasing here.".into(),
            mesh_terms: vec![
                "Humans".into(),
                "Nephrotic Syndrome".into(),
                "Renal Insufficiency, Chronic".into(),
                "Kidney Failure".into(),
            ],
            ..Default::default()
        };
        let pico = extractor().extract(&article);
        // Only the first two disease-indicating terms are used.
        assert_eq!(
            pico.population,
            "患有 Nephrotic Syndrome, Renal Insufficiency, Chronic 的病人"
        );
    }

    #[test]
    fn test_no_match_and_no_fallback_leaves_fields_empty() {
        let article = article_with_abstract("Completely unrelated text");
        let pico = extractor().extract(&article);
        assert_eq!(pico, Pico::default());
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let article = article_with_abstract(
            "Patients with IgA nephropathy received sparsentan. The primary outcome was proteinuria,",
        );
        let extractor = extractor();
        assert_eq!(extractor.extract(&article), extractor.extract(&article));
    }

    #[test]
    fn test_malformed_pattern_is_a_construction_error() {
        let config = ExtractionConfig {
            population_patterns: vec!["(unclosed".into()],
            ..Default::default()
        };
        let err = PicoExtractor::new(&config).unwrap_err();
        assert!(matches!(err, Error::Pattern { .. }));
    }
}
