//! Weekly report assembly: featured-article selection, executive summary,
//! and the final report document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ideas::ResearchIdea;
use crate::locale::Locale;
use crate::summary::ArticleSummary;
use crate::trends::{CategoryStats, TrendSnapshot};
use crate::types::{RecordSet, TaggedArticle, flatten};

/// Articles spotlighted in the report.
const FEATURED_MAX: usize = 10;
/// Hot topics named in the key-finding sentence.
const FINDING_TOPICS_MAX: usize = 3;
/// Distinct journals named in the high-impact key finding.
const FINDING_JOURNALS_MAX: usize = 3;
/// Display caps for the report's trend block.
const HOT_TOPICS_MAX: usize = 10;
const JOURNALS_MAX: usize = 15;
const PUB_TYPES_MAX: usize = 10;
const MESH_MAX: usize = 30;

/// Controlled-vocabulary publication type labels checked by the
/// evidence-quality key finding.
const RCT_PUB_TYPE: &str = "Randomized Controlled Trial";
const META_PUB_TYPE: &str = "Meta-Analysis";

/// Executive-summary block of the weekly report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    pub total_count: usize,
    pub high_impact_count: usize,
    /// Up to 3 localized key-finding sentences.
    pub key_findings: Vec<String>,
}

/// Trend block of the weekly report, capped for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendBlock {
    pub hot_topics: Vec<(String, usize)>,
    pub keyword_counts: BTreeMap<String, BTreeMap<String, usize>>,
    pub journal_distribution: Vec<(String, usize)>,
    pub pub_type_distribution: Vec<(String, usize)>,
}

/// The assembled weekly report document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyReport {
    pub generated_at: DateTime<Utc>,
    /// Localized report-period label, or "N/A" without categories.
    pub report_period: String,
    pub executive_summary: ExecutiveSummary,
    pub category_stats: BTreeMap<String, CategoryStats>,
    pub trends: TrendBlock,
    pub featured_articles: Vec<ArticleSummary>,
    pub research_ideas: Vec<ResearchIdea>,
    pub mesh_frequency: Vec<(String, usize)>,
}

/// Assembles the weekly report from the other components' outputs.
pub struct ReportBuilder {
    locale: Locale,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self { locale: Locale }
    }

    /// Select featured articles: high-impact first, then latest lexical
    /// `pub_date`. The sort is stable, so the input order breaks remaining
    /// ties deterministically.
    pub fn featured<'a>(&self, articles: &[TaggedArticle<'a>]) -> Vec<TaggedArticle<'a>> {
        let mut sorted = articles.to_vec();
        sorted.sort_by(|a, b| {
            b.article
                .is_high_impact
                .cmp(&a.article.is_high_impact)
                .then_with(|| b.article.pub_date.cmp(&a.article.pub_date))
        });
        sorted.truncate(FEATURED_MAX);
        sorted
    }

    /// Assemble the final report document.
    pub fn build(
        &self,
        records: &RecordSet,
        snapshot: &TrendSnapshot,
        featured_articles: Vec<ArticleSummary>,
        research_ideas: Vec<ResearchIdea>,
    ) -> WeeklyReport {
        let report_period = records
            .values()
            .next()
            .map(|bundle| self.locale.report_period(bundle.days_back))
            .unwrap_or_else(|| self.locale.report_period_unknown().to_string());

        WeeklyReport {
            generated_at: Utc::now(),
            report_period,
            executive_summary: ExecutiveSummary {
                total_count: snapshot.total_count,
                high_impact_count: snapshot.high_impact_count,
                key_findings: self.key_findings(&flatten(records), snapshot),
            },
            category_stats: snapshot.per_category_stats.clone(),
            trends: TrendBlock {
                hot_topics: take_pairs(&snapshot.top_keywords, HOT_TOPICS_MAX),
                keyword_counts: snapshot.keyword_counts.clone(),
                journal_distribution: take_pairs(&snapshot.journal_distribution, JOURNALS_MAX),
                pub_type_distribution: take_pairs(
                    &snapshot.pub_type_distribution,
                    PUB_TYPES_MAX,
                ),
            },
            featured_articles,
            research_ideas,
            mesh_frequency: take_pairs(&snapshot.mesh_frequency, MESH_MAX),
        }
    }

    /// Key-finding sentences: a fixed 3-rule cascade where each rule
    /// independently appends 0 or 1 sentence.
    fn key_findings(&self, articles: &[TaggedArticle<'_>], snapshot: &TrendSnapshot) -> Vec<String> {
        let mut findings = Vec::new();

        let hot_topics = take_pairs(&snapshot.top_keywords, FINDING_TOPICS_MAX);
        if !hot_topics.is_empty() {
            findings.push(self.locale.hot_topic_finding(&hot_topics));
        }

        let high_impact: Vec<_> = articles
            .iter()
            .filter(|tagged| tagged.article.is_high_impact)
            .collect();
        if !high_impact.is_empty() {
            // Distinct journals in first-seen order.
            let mut journals: Vec<&str> = Vec::new();
            for tagged in &high_impact {
                if !journals.contains(&tagged.article.journal.as_str()) {
                    journals.push(&tagged.article.journal);
                    if journals.len() == FINDING_JOURNALS_MAX {
                        break;
                    }
                }
            }
            findings.push(
                self.locale
                    .high_impact_finding(high_impact.len(), &journals),
            );
        }

        let rct_count = pub_type_count(snapshot, RCT_PUB_TYPE);
        let meta_count = pub_type_count(snapshot, META_PUB_TYPE);
        if rct_count > 0 || meta_count > 0 {
            findings.push(self.locale.evidence_quality_finding(rct_count, meta_count));
        }

        findings
    }
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn take_pairs(pairs: &[(String, usize)], n: usize) -> Vec<(String, usize)> {
    pairs.iter().take(n).cloned().collect()
}

fn pub_type_count(snapshot: &TrendSnapshot, label: &str) -> usize {
    snapshot
        .pub_type_distribution
        .iter()
        .find(|(pub_type, _)| pub_type == label)
        .map(|&(_, count)| count)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TaxonomyGroup;
    use crate::trends::TrendAnalyzer;
    use crate::types::{ArticleRecord, CategoryBundle, flatten};
    use pretty_assertions::assert_eq;

    fn taxonomy() -> Vec<TaxonomyGroup> {
        vec![TaxonomyGroup {
            category: "臨床結局".into(),
            keywords: vec!["mortality".into()],
        }]
    }

    fn article(pmid: &str, pub_date: &str, high_impact: bool) -> ArticleRecord {
        ArticleRecord {
            pmid: pmid.into(),
            pub_date: pub_date.into(),
            is_high_impact: high_impact,
            journal: if high_impact {
                "Kidney Int".into()
            } else {
                "Minor J".into()
            },
            ..Default::default()
        }
    }

    fn record_set(articles: Vec<ArticleRecord>, days_back: u32) -> RecordSet {
        let mut records = RecordSet::new();
        records.insert(
            "adult".into(),
            CategoryBundle {
                name: "成人腎臟學".into(),
                articles,
                days_back,
                ..Default::default()
            },
        );
        records
    }

    #[test]
    fn test_featured_prefers_high_impact_then_pub_date() {
        let records = record_set(
            vec![
                article("1", "2024 Jan 02", false),
                article("2", "2024 Mar 15", false),
                article("3", "2023 Dec 01", true),
            ],
            7,
        );
        let builder = ReportBuilder::new();
        let featured = builder.featured(&flatten(&records));

        // High-impact first despite the older date, then lexically latest.
        let pmids: Vec<&str> = featured.iter().map(|t| t.article.pmid.as_str()).collect();
        assert_eq!(pmids, vec!["3", "2", "1"]);
    }

    #[test]
    fn test_featured_caps_at_ten() {
        let articles = (0..15)
            .map(|i| article(&format!("{i}"), "2024 Jan 01", false))
            .collect();
        let records = record_set(articles, 7);
        let featured = ReportBuilder::new().featured(&flatten(&records));
        assert_eq!(featured.len(), 10);
    }

    #[test]
    fn test_report_period_from_first_category() {
        let records = record_set(vec![article("1", "2024 Jan 01", false)], 14);
        let snapshot = TrendAnalyzer::new(taxonomy()).analyze(&records);
        let report = ReportBuilder::new().build(&records, &snapshot, vec![], vec![]);
        assert_eq!(report.report_period, "過去 14 天");
    }

    #[test]
    fn test_report_period_na_without_categories() {
        let records = RecordSet::new();
        let snapshot = TrendAnalyzer::new(taxonomy()).analyze(&records);
        let report = ReportBuilder::new().build(&records, &snapshot, vec![], vec![]);
        assert_eq!(report.report_period, "N/A");
    }

    #[test]
    fn test_key_findings_full_cascade() {
        let mut rct = article("1", "2024 Feb 01", true);
        rct.title = "mortality outcomes".into();
        rct.pub_types = vec!["Randomized Controlled Trial".into()];
        let records = record_set(vec![rct], 7);

        let snapshot = TrendAnalyzer::new(taxonomy()).analyze(&records);
        let report = ReportBuilder::new().build(&records, &snapshot, vec![], vec![]);
        let findings = &report.executive_summary.key_findings;

        assert_eq!(findings.len(), 3);
        assert!(findings[0].contains("mortality"));
        assert!(findings[1].contains("Kidney Int"));
        assert_eq!(findings[2], "高品質證據: 1 篇 RCT, 0 篇統合分析");
    }

    #[test]
    fn test_key_findings_omitted_without_signals() {
        // No taxonomy hits, no high-impact articles, no RCT/meta pub types.
        let records = record_set(vec![article("1", "2024 Jan 01", false)], 7);
        let snapshot = TrendAnalyzer::new(taxonomy()).analyze(&records);
        let report = ReportBuilder::new().build(&records, &snapshot, vec![], vec![]);
        assert!(report.executive_summary.key_findings.is_empty());
    }

    #[test]
    fn test_trend_block_applies_display_caps() {
        let articles = (0..20)
            .map(|i| {
                let mut a = article(&format!("{i}"), "2024 Jan 01", false);
                a.journal = format!("Journal {i}");
                a.pub_types = vec![format!("Type {i}")];
                a.mesh_terms = (0..2).map(|j| format!("Mesh {i}-{j}")).collect();
                a
            })
            .collect();
        let records = record_set(articles, 7);
        let snapshot = TrendAnalyzer::new(taxonomy()).analyze(&records);
        let report = ReportBuilder::new().build(&records, &snapshot, vec![], vec![]);

        assert_eq!(report.trends.journal_distribution.len(), 15);
        assert_eq!(report.trends.pub_type_distribution.len(), 10);
        assert_eq!(report.mesh_frequency.len(), 30);
        // The snapshot itself keeps full counts.
        assert_eq!(snapshot.journal_distribution.len(), 20);
        assert_eq!(snapshot.mesh_frequency.len(), 40);
    }

    #[test]
    fn test_category_stats_carried_into_report() {
        let records = record_set(vec![article("1", "2024 Jan 01", true)], 7);
        let snapshot = TrendAnalyzer::new(taxonomy()).analyze(&records);
        let report = ReportBuilder::new().build(&records, &snapshot, vec![], vec![]);
        let stats = &report.category_stats["成人腎臟學"];
        assert_eq!(stats.count, 1);
        assert_eq!(stats.high_impact_count, 1);
    }
}
