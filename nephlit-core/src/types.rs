//! Input data model: bibliographic records grouped by research category.
//!
//! These types mirror the JSON handed over by the fetch collaborator. Every
//! field is serde-defaulted so partially populated records degrade to empty
//! values instead of failing deserialization.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One bibliographic record as delivered by the fetch collaborator.
///
/// Records are immutable inputs; the engine never mutates them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleRecord {
    /// PubMed identifier, unique within a run.
    pub pmid: String,
    pub title: String,
    /// Free-text abstract, may be empty.
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// Ordered author list ("LastName ForeName").
    pub authors: Vec<String>,
    pub journal: String,
    /// Free-text publication date (e.g. "2024 Mar 15"). Compared lexically,
    /// never parsed.
    pub pub_date: String,
    /// Controlled-vocabulary publication type labels.
    pub pub_types: Vec<String>,
    pub keywords: Vec<String>,
    /// Controlled-vocabulary subject-indexing terms.
    pub mesh_terms: Vec<String>,
    pub doi: String,
    /// Set by the fetch collaborator via substring match against the
    /// configured journal allow-list.
    pub is_high_impact: bool,
    /// Owning category id, exclusive per run. Assigned on ingestion.
    pub category: String,
    pub pubmed_url: String,
    /// Pass-through fetch timestamp; the engine never interprets it.
    pub fetched_at: String,
}

/// All records fetched for one research category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryBundle {
    /// Localized display name.
    pub name: String,
    pub name_en: String,
    /// Curated topic list for the category's search strategy.
    pub topics: Vec<String>,
    pub articles: Vec<ArticleRecord>,
    pub count: usize,
    /// Pass-through search timestamp.
    pub search_date: String,
    /// Search window in days used by the fetch collaborator.
    pub days_back: u32,
}

impl CategoryBundle {
    /// Display name, falling back to the given category id when the fetch
    /// collaborator left it empty.
    pub fn display_name<'a>(&'a self, category_id: &'a str) -> &'a str {
        if self.name.is_empty() {
            category_id
        } else {
            &self.name
        }
    }
}

/// The full record set: category id -> bundle. Sorted keys keep every
/// downstream iteration deterministic.
pub type RecordSet = BTreeMap<String, CategoryBundle>;

/// An article tagged with its owning category, produced by flattening a
/// [`RecordSet`].
#[derive(Debug, Clone, Copy)]
pub struct TaggedArticle<'a> {
    pub category_id: &'a str,
    pub category_name: &'a str,
    pub article: &'a ArticleRecord,
}

/// Flatten a record set into category-tagged article references, in
/// category-id order.
pub fn flatten(records: &RecordSet) -> Vec<TaggedArticle<'_>> {
    records
        .iter()
        .flat_map(|(id, bundle)| {
            bundle.articles.iter().map(move |article| TaggedArticle {
                category_id: id,
                category_name: bundle.display_name(id),
                article,
            })
        })
        .collect()
}
