//! Research-idea generation from aggregate trend output.
//!
//! Ideas are emitted in a fixed order (hot topics, research gaps,
//! cross-domain, methodological, high-impact follow-up) and never
//! re-sorted; consumers wanting "top N" take a prefix.

use serde::{Deserialize, Serialize};

use crate::config::TaxonomyGroup;
use crate::locale::Locale;
use crate::text::truncate_chars;
use crate::trends::TrendSnapshot;
use crate::types::{RecordSet, flatten};

/// Hot keywords turned into extension ideas.
const HOT_TOPIC_IDEAS_MAX: usize = 10;
/// Research-gap ideas emitted per run.
const GAP_IDEAS_MAX: usize = 5;
/// Inclusive keyword-count range that marks a research gap.
const GAP_COUNT_MIN: usize = 1;
const GAP_COUNT_MAX: usize = 3;
/// Example titles carried by the high-impact follow-up idea.
const EXAMPLE_TITLES_MAX: usize = 3;
const EXAMPLE_TITLE_CHARS: usize = 50;

/// The kind of suggestion a [`ResearchIdea`] makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdeaKind {
    HotTopicExtension,
    ResearchGap,
    CrossDomain,
    Methodological,
    HighImpactFollowUp,
}

/// One actionable research suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchIdea {
    pub kind: IdeaKind,
    pub keyword: String,
    /// Keyword frequency backing the idea, when one applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<usize>,
    /// Localized free-text suggestion body.
    pub suggestion: String,
    pub suggested_design: String,
    /// Example article titles (high-impact follow-up only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub example_titles: Vec<String>,
}

/// Turns a [`TrendSnapshot`] into an ordered idea list.
pub struct IdeaGenerator {
    taxonomy: Vec<TaxonomyGroup>,
    locale: Locale,
}

impl IdeaGenerator {
    pub fn new(taxonomy: Vec<TaxonomyGroup>) -> Self {
        Self {
            taxonomy,
            locale: Locale,
        }
    }

    /// Generate the ordered idea list for this run.
    pub fn generate(&self, snapshot: &TrendSnapshot, records: &RecordSet) -> Vec<ResearchIdea> {
        let mut ideas = Vec::new();

        // 1. Hot-topic extensions.
        for (keyword, count) in snapshot.top_keywords.iter().take(HOT_TOPIC_IDEAS_MAX) {
            ideas.push(ResearchIdea {
                kind: IdeaKind::HotTopicExtension,
                keyword: keyword.clone(),
                frequency: Some(*count),
                suggestion: self.locale.hot_topic_idea(keyword, *count),
                suggested_design: self.locale.hot_topic_design().to_string(),
                example_titles: Vec::new(),
            });
        }

        // 2. Research gaps: keywords mentioned but thinly studied, walked
        // in taxonomy order.
        let mut gaps = 0;
        'taxonomy: for group in &self.taxonomy {
            let Some(counts) = snapshot.keyword_counts.get(&group.category) else {
                continue;
            };
            for keyword in &group.keywords {
                let Some(&count) = counts.get(keyword) else {
                    continue;
                };
                if (GAP_COUNT_MIN..=GAP_COUNT_MAX).contains(&count) {
                    ideas.push(ResearchIdea {
                        kind: IdeaKind::ResearchGap,
                        keyword: keyword.clone(),
                        frequency: Some(count),
                        suggestion: self
                            .locale
                            .research_gap_idea(keyword, &group.category, count),
                        suggested_design: self.locale.research_gap_design().to_string(),
                        example_titles: Vec::new(),
                    });
                    gaps += 1;
                    if gaps == GAP_IDEAS_MAX {
                        break 'taxonomy;
                    }
                }
            }
        }

        // 3. Cross-domain idea, only when at least two categories actually
        // hold articles.
        let populated_categories = records
            .values()
            .filter(|bundle| !bundle.articles.is_empty())
            .count();
        if populated_categories >= 2 {
            ideas.push(ResearchIdea {
                kind: IdeaKind::CrossDomain,
                keyword: self.locale.cross_domain_keyword().to_string(),
                frequency: None,
                suggestion: self.locale.cross_domain_idea().to_string(),
                suggested_design: self.locale.cross_domain_design().to_string(),
                example_titles: Vec::new(),
            });
        }

        // 4. The two fixed methodological-innovation ideas.
        for (keyword, suggestion, design) in self.locale.methodological_ideas() {
            ideas.push(ResearchIdea {
                kind: IdeaKind::Methodological,
                keyword: keyword.to_string(),
                frequency: None,
                suggestion: suggestion.to_string(),
                suggested_design: design.to_string(),
                example_titles: Vec::new(),
            });
        }

        // 5. High-impact follow-up, with example titles.
        let high_impact: Vec<_> = flatten(records)
            .into_iter()
            .filter(|tagged| tagged.article.is_high_impact)
            .collect();
        if !high_impact.is_empty() {
            ideas.push(ResearchIdea {
                kind: IdeaKind::HighImpactFollowUp,
                keyword: self.locale.high_impact_keyword().to_string(),
                frequency: None,
                suggestion: self.locale.high_impact_idea(high_impact.len()),
                suggested_design: self.locale.high_impact_design().to_string(),
                example_titles: high_impact
                    .iter()
                    .take(EXAMPLE_TITLES_MAX)
                    .map(|tagged| truncate_chars(&tagged.article.title, EXAMPLE_TITLE_CHARS))
                    .collect(),
            });
        }

        ideas
    }
}
