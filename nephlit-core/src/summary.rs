//! Article summarization: study-type classification, structured-abstract
//! splitting, and the localized narrative.
//!
//! The composer is a pure function of the article record: the same input
//! always yields the same [`ArticleSummary`]. Missing or unstructured
//! abstracts degrade to a fallback narrative and a single full-abstract
//! section, never an error.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::config::{SectionConfig, TaxonomyGroup};
use crate::error::{Error, Result};
use crate::locale::Locale;
use crate::pico::Pico;
use crate::text::{collapse_whitespace, truncate_chars};
use crate::types::ArticleRecord;

/// Character cap for each narrative paragraph (before the ellipsis marker).
const NARRATIVE_MAX_CHARS: usize = 300;
/// Character cap for each structured section in the summary object.
const SECTION_MAX_CHARS: usize = 500;
/// Raw-abstract window fed to the fallback narrative.
const FALLBACK_NARRATIVE_CHARS: usize = 800;
/// Character cap for the full-abstract fallback section.
const FULL_ABSTRACT_MAX_CHARS: usize = 1000;
/// Trend tags attached to a summary.
const RELATED_TRENDS_MAX: usize = 5;
/// Keyword and MeSH lists attached to a summary.
const TERMS_MAX: usize = 10;

/// Fixed study-design classification, highest evidence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StudyType {
    #[serde(rename = "RCT")]
    Rct,
    #[serde(rename = "meta-analysis")]
    MetaAnalysis,
    #[serde(rename = "systematic-review")]
    SystematicReview,
    #[serde(rename = "cohort-study")]
    CohortStudy,
    #[serde(rename = "case-control-study")]
    CaseControlStudy,
    #[serde(rename = "generic-study")]
    GenericStudy,
}

impl fmt::Display for StudyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StudyType::Rct => "RCT",
            StudyType::MetaAnalysis => "meta-analysis",
            StudyType::SystematicReview => "systematic-review",
            StudyType::CohortStudy => "cohort-study",
            StudyType::CaseControlStudy => "case-control-study",
            StudyType::GenericStudy => "generic-study",
        };
        write!(f, "{label}")
    }
}

/// Recognized abstract sections, in narrative priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Background,
    Objective,
    Methods,
    Results,
    Conclusion,
    /// Fallback entry when no section headers were detected.
    FullAbstract,
}

/// Composed summary for one featured article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub pmid: String,
    pub title: String,
    pub journal: String,
    pub pub_date: String,
    pub study_type: StudyType,
    pub pico: Pico,
    /// Localized multi-paragraph synopsis.
    pub narrative: String,
    /// Structured sections; a single `full_abstract` entry when no section
    /// headers were detected.
    pub sections: BTreeMap<SectionKind, String>,
    /// Up to 5 "category: keyword" trend tags.
    pub related_trends: Vec<String>,
    pub keywords: Vec<String>,
    pub mesh_terms: Vec<String>,
    pub is_high_impact: bool,
    pub pubmed_url: String,
    pub doi: String,
}

/// Splits abstracts into labeled sections and renders the localized
/// narrative and per-article summary object.
pub struct SummaryComposer {
    headers: Vec<(Regex, SectionKind)>,
    taxonomy: Vec<TaxonomyGroup>,
    locale: Locale,
}

impl SummaryComposer {
    pub fn new(sections: &SectionConfig, taxonomy: Vec<TaxonomyGroup>) -> Result<Self> {
        let headers = sections
            .headers
            .iter()
            .map(|header| {
                RegexBuilder::new(&header.pattern)
                    .case_insensitive(true)
                    .multi_line(true)
                    .build()
                    .map(|regex| (regex, header.kind))
                    .map_err(|e| Error::Pattern {
                        pattern: header.pattern.clone(),
                        message: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            headers,
            taxonomy,
            locale: Locale,
        })
    }

    /// Classify the study design. Fixed priority, first match wins.
    pub fn classify(&self, article: &ArticleRecord) -> StudyType {
        let has_pub_type = |label: &str| {
            article
                .pub_types
                .iter()
                .any(|pub_type| pub_type.contains(label))
        };
        let abstract_lower = article.abstract_text.to_lowercase();

        if has_pub_type("Randomized Controlled Trial") {
            StudyType::Rct
        } else if has_pub_type("Meta-Analysis") {
            StudyType::MetaAnalysis
        } else if has_pub_type("Systematic Review") {
            StudyType::SystematicReview
        } else if abstract_lower.contains("cohort") {
            StudyType::CohortStudy
        } else if abstract_lower.contains("case-control") {
            StudyType::CaseControlStudy
        } else {
            StudyType::GenericStudy
        }
    }

    /// Split a raw abstract into labeled sections.
    ///
    /// Each recognized header's first occurrence opens a span that runs to
    /// the start of the next recognized header after it, or end of string.
    /// Headers absent from the abstract simply don't appear in the map.
    pub fn split_sections(&self, text: &str) -> BTreeMap<SectionKind, String> {
        let mut header_spans: Vec<(usize, usize, SectionKind)> = Vec::new();
        for (pattern, kind) in &self.headers {
            if let Some(found) = pattern.find(text) {
                header_spans.push((found.start(), found.end(), *kind));
            }
        }

        let starts: Vec<usize> = header_spans.iter().map(|&(start, _, _)| start).collect();
        let mut sections = BTreeMap::new();
        for &(_, end, kind) in &header_spans {
            let span_end = starts
                .iter()
                .copied()
                .filter(|&start| start >= end)
                .min()
                .unwrap_or(text.len());
            let body = text[end..span_end].trim();
            if !body.is_empty() {
                sections.insert(kind, body.to_string());
            }
        }
        sections
    }

    /// Render the localized multi-paragraph narrative.
    ///
    /// Section priority: Objective (else Background), Methods, Results,
    /// Conclusion. Falls back to a single paragraph over the head of the
    /// raw abstract when no section was recognized.
    pub fn narrative(
        &self,
        article: &ArticleRecord,
        study_type: StudyType,
        sections: &BTreeMap<SectionKind, String>,
    ) -> String {
        let mut paragraphs = Vec::new();

        if let Some(text) = sections.get(&SectionKind::Objective) {
            paragraphs.push(
                self.locale
                    .objective_paragraph(study_type, &simplify(text, NARRATIVE_MAX_CHARS)),
            );
        } else if let Some(text) = sections.get(&SectionKind::Background) {
            paragraphs.push(
                self.locale
                    .background_paragraph(&simplify(text, NARRATIVE_MAX_CHARS)),
            );
        }
        if let Some(text) = sections.get(&SectionKind::Methods) {
            paragraphs.push(
                self.locale
                    .methods_paragraph(&simplify(text, NARRATIVE_MAX_CHARS)),
            );
        }
        if let Some(text) = sections.get(&SectionKind::Results) {
            paragraphs.push(
                self.locale
                    .results_paragraph(&simplify(text, NARRATIVE_MAX_CHARS)),
            );
        }
        if let Some(text) = sections.get(&SectionKind::Conclusion) {
            paragraphs.push(
                self.locale
                    .conclusion_paragraph(&simplify(text, NARRATIVE_MAX_CHARS)),
            );
        }

        if paragraphs.is_empty() {
            let head = truncate_chars(&article.abstract_text, FALLBACK_NARRATIVE_CHARS);
            return self
                .locale
                .fallback_paragraph(&simplify(&head, NARRATIVE_MAX_CHARS));
        }
        paragraphs.join("\n\n")
    }

    /// Build the full [`ArticleSummary`] for one article.
    pub fn compose(&self, article: &ArticleRecord, pico: Pico) -> ArticleSummary {
        let study_type = self.classify(article);
        let sections = self.split_sections(&article.abstract_text);
        let narrative = self.narrative(article, study_type, &sections);

        let mut section_map: BTreeMap<SectionKind, String> = sections
            .iter()
            .map(|(kind, body)| (*kind, truncate_chars(body, SECTION_MAX_CHARS)))
            .collect();
        if section_map.is_empty() {
            section_map.insert(
                SectionKind::FullAbstract,
                truncate_chars(&article.abstract_text, FULL_ABSTRACT_MAX_CHARS),
            );
        }

        ArticleSummary {
            pmid: article.pmid.clone(),
            title: article.title.clone(),
            journal: article.journal.clone(),
            pub_date: article.pub_date.clone(),
            study_type,
            pico,
            narrative,
            sections: section_map,
            related_trends: self.related_trends(article),
            keywords: article.keywords.iter().take(TERMS_MAX).cloned().collect(),
            mesh_terms: article.mesh_terms.iter().take(TERMS_MAX).cloned().collect(),
            is_high_impact: article.is_high_impact,
            pubmed_url: article.pubmed_url.clone(),
            doi: article.doi.clone(),
        }
    }

    /// Taxonomy keywords present in the article text, as
    /// "category: keyword" tags.
    fn related_trends(&self, article: &ArticleRecord) -> Vec<String> {
        let text = format!("{} {}", article.title, article.abstract_text).to_lowercase();
        let mut tags = Vec::new();
        for group in &self.taxonomy {
            for keyword in &group.keywords {
                if text.contains(&keyword.to_lowercase()) {
                    tags.push(format!("{}: {}", group.category, keyword));
                    if tags.len() == RELATED_TRENDS_MAX {
                        return tags;
                    }
                }
            }
        }
        tags
    }
}

/// Collapse whitespace and truncate to `max` characters, preferring to cut
/// at a sentence boundary when one falls past the midpoint of the window;
/// otherwise hard-cut and append an ellipsis marker.
fn simplify(text: &str, max: usize) -> String {
    let collapsed = collapse_whitespace(text);
    if collapsed.chars().count() <= max {
        return collapsed;
    }
    let window = truncate_chars(&collapsed, max);
    match window.rfind('.') {
        Some(idx) if window[..idx].chars().count() > max / 2 => window[..=idx].to_string(),
        _ => format!("{window}..."),
    }
}
