//! Trend aggregation over the flattened record set.
//!
//! Produces the [`TrendSnapshot`]: keyword counts against the configured
//! taxonomy, journal/publication-type/MeSH frequency tables, and
//! per-category statistics. Aggregation is a pure function of the record
//! set apart from the `analyzed_at` timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::config::TaxonomyGroup;
use crate::types::{RecordSet, flatten};

/// Keywords exposed in `top_keywords`.
const TOP_KEYWORDS_MAX: usize = 20;
/// Journals listed per category in `per_category_stats`.
const CATEGORY_JOURNALS_MAX: usize = 5;

/// Aggregate trend statistics derived from one record set.
///
/// Distribution lists keep full counts, ordered by count descending with
/// first-seen order on ties; the report builder applies the display caps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSnapshot {
    pub total_count: usize,
    pub high_impact_count: usize,
    pub analyzed_at: DateTime<Utc>,
    /// Taxonomy category -> keyword -> number of articles mentioning it.
    pub keyword_counts: BTreeMap<String, BTreeMap<String, usize>>,
    /// Top keywords across the whole taxonomy as (keyword, count) pairs.
    /// Ties keep taxonomy insertion order.
    pub top_keywords: Vec<(String, usize)>,
    pub journal_distribution: Vec<(String, usize)>,
    pub pub_type_distribution: Vec<(String, usize)>,
    pub mesh_frequency: Vec<(String, usize)>,
    /// Category display name -> stats, computed per category so category
    /// boundaries never leak.
    pub per_category_stats: BTreeMap<String, CategoryStats>,
}

/// Per-category slice of the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub count: usize,
    pub high_impact_count: usize,
    pub top_journals: Vec<(String, usize)>,
}

/// Insertion-ordered frequency counter.
///
/// Stable-sorting by descending count keeps first-seen order among equal
/// counts, matching the tie behavior the report format relies on.
#[derive(Debug, Default)]
pub(crate) struct FrequencyCounter {
    index: HashMap<String, usize>,
    entries: Vec<(String, usize)>,
}

impl FrequencyCounter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, term: &str) {
        self.add_count(term, 1);
    }

    pub(crate) fn add_count(&mut self, term: &str, count: usize) {
        match self.index.get(term) {
            Some(&i) => self.entries[i].1 += count,
            None => {
                self.index.insert(term.to_string(), self.entries.len());
                self.entries.push((term.to_string(), count));
            }
        }
    }

    /// Entries sorted by count descending, first-seen order on ties.
    pub(crate) fn into_sorted(mut self) -> Vec<(String, usize)> {
        self.entries.sort_by_key(|&(_, count)| std::cmp::Reverse(count));
        self.entries
    }
}

/// Aggregates trend statistics against a fixed keyword taxonomy.
pub struct TrendAnalyzer {
    taxonomy: Vec<TaxonomyGroup>,
}

impl TrendAnalyzer {
    pub fn new(taxonomy: Vec<TaxonomyGroup>) -> Self {
        Self { taxonomy }
    }

    /// Build a [`TrendSnapshot`] for the record set. An empty record set
    /// yields a zeroed snapshot, never an error.
    pub fn analyze(&self, records: &RecordSet) -> TrendSnapshot {
        let articles = flatten(records);

        // Keyword membership: case-insensitive substring presence over
        // title+abstract, counted at most once per article per keyword.
        let mut keyword_counts: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();
        for tagged in &articles {
            let text = format!(
                "{} {}",
                tagged.article.title, tagged.article.abstract_text
            )
            .to_lowercase();
            for group in &self.taxonomy {
                for keyword in &group.keywords {
                    if text.contains(&keyword.to_lowercase()) {
                        *keyword_counts
                            .entry(group.category.clone())
                            .or_default()
                            .entry(keyword.clone())
                            .or_insert(0) += 1;
                    }
                }
            }
        }

        // Merge all groups into one flat counter, walked in taxonomy order
        // so ties in the top list keep insertion order.
        let mut merged = FrequencyCounter::new();
        for group in &self.taxonomy {
            if let Some(counts) = keyword_counts.get(&group.category) {
                for keyword in &group.keywords {
                    if let Some(&count) = counts.get(keyword) {
                        merged.add_count(keyword, count);
                    }
                }
            }
        }
        let mut top_keywords = merged.into_sorted();
        top_keywords.truncate(TOP_KEYWORDS_MAX);

        let mut journals = FrequencyCounter::new();
        let mut pub_types = FrequencyCounter::new();
        let mut mesh = FrequencyCounter::new();
        for tagged in &articles {
            journals.add(&tagged.article.journal);
            for pub_type in &tagged.article.pub_types {
                pub_types.add(pub_type);
            }
            for term in &tagged.article.mesh_terms {
                mesh.add(term);
            }
        }

        let mut per_category_stats = BTreeMap::new();
        for (id, bundle) in records {
            let mut category_journals = FrequencyCounter::new();
            for article in &bundle.articles {
                category_journals.add(&article.journal);
            }
            let mut top_journals = category_journals.into_sorted();
            top_journals.truncate(CATEGORY_JOURNALS_MAX);

            per_category_stats.insert(
                bundle.display_name(id).to_string(),
                CategoryStats {
                    count: bundle.articles.len(),
                    high_impact_count: bundle
                        .articles
                        .iter()
                        .filter(|a| a.is_high_impact)
                        .count(),
                    top_journals,
                },
            );
        }

        let snapshot = TrendSnapshot {
            total_count: articles.len(),
            high_impact_count: articles
                .iter()
                .filter(|t| t.article.is_high_impact)
                .count(),
            analyzed_at: Utc::now(),
            keyword_counts,
            top_keywords,
            journal_distribution: journals.into_sorted(),
            pub_type_distribution: pub_types.into_sorted(),
            mesh_frequency: mesh.into_sorted(),
            per_category_stats,
        };
        tracing::debug!(
            total = snapshot.total_count,
            high_impact = snapshot.high_impact_count,
            "aggregated trend snapshot"
        );
        snapshot
    }
}
