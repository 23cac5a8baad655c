//! Analyzer façade that wires the components together into one pipeline.
//!
//! [`ResearchAnalyzer`] owns the components, all constructed once from a
//! single [`AnalyzerConfig`]. Every public operation is a pure function of
//! its explicit inputs; running the pipeline twice on an unchanged record
//! set yields identical output apart from freshly generated timestamps.

use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::ideas::{IdeaGenerator, ResearchIdea};
use crate::pico::{Pico, PicoExtractor};
use crate::report::{ReportBuilder, WeeklyReport};
use crate::summary::{ArticleSummary, SummaryComposer};
use crate::trends::{TrendAnalyzer, TrendSnapshot};
use crate::types::{ArticleRecord, RecordSet, flatten};

/// The analysis engine: trend aggregation, PICO extraction, article
/// summarization, idea generation, and report assembly.
pub struct ResearchAnalyzer {
    config: AnalyzerConfig,
    trends: TrendAnalyzer,
    pico: PicoExtractor,
    summary: SummaryComposer,
    ideas: IdeaGenerator,
    report: ReportBuilder,
}

impl ResearchAnalyzer {
    /// Build the engine, compiling every pattern table once. Fails only on
    /// malformed configuration.
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        Ok(Self {
            trends: TrendAnalyzer::new(config.trend_keywords.clone()),
            pico: PicoExtractor::new(&config.extraction)?,
            summary: SummaryComposer::new(&config.sections, config.trend_keywords.clone())?,
            ideas: IdeaGenerator::new(config.trend_keywords.clone()),
            report: ReportBuilder::new(),
            config,
        })
    }

    /// The engine with default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(AnalyzerConfig::default())
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Aggregate trend statistics over the record set.
    pub fn analyze_trends(&self, records: &RecordSet) -> TrendSnapshot {
        self.trends.analyze(records)
    }

    /// Extract PICO fields from one article.
    pub fn extract_pico(&self, article: &ArticleRecord) -> Pico {
        self.pico.extract(article)
    }

    /// Build the full summary object for one article, including its PICO
    /// extraction.
    pub fn summarize_article(&self, article: &ArticleRecord) -> ArticleSummary {
        let pico = self.pico.extract(article);
        self.summary.compose(article, pico)
    }

    /// Generate the ordered research-idea list.
    pub fn generate_ideas(
        &self,
        snapshot: &TrendSnapshot,
        records: &RecordSet,
    ) -> Vec<ResearchIdea> {
        self.ideas.generate(snapshot, records)
    }

    /// Run the full pipeline and assemble the weekly report document.
    pub fn build_report(&self, records: &RecordSet) -> WeeklyReport {
        let snapshot = self.trends.analyze(records);
        let articles = flatten(records);
        tracing::debug!(
            total = articles.len(),
            high_impact = snapshot.high_impact_count,
            "building weekly report"
        );

        let featured = self.report.featured(&articles);
        let summaries: Vec<ArticleSummary> = featured
            .iter()
            .map(|tagged| self.summarize_article(tagged.article))
            .collect();
        let ideas = self.ideas.generate(&snapshot, records);

        let report = self.report.build(records, &snapshot, summaries, ideas);
        tracing::info!(
            featured = report.featured_articles.len(),
            ideas = report.research_ideas.len(),
            findings = report.executive_summary.key_findings.len(),
            "weekly report assembled"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CategoryBundle;
    use pretty_assertions::assert_eq;

    fn analyzer() -> ResearchAnalyzer {
        ResearchAnalyzer::with_defaults().unwrap()
    }

    fn sample_records() -> RecordSet {
        let mut records = RecordSet::new();
        records.insert(
            "adult".into(),
            CategoryBundle {
                name: "成人腎臟學".into(),
                articles: vec![
                    ArticleRecord {
                        pmid: "1".into(),
                        title: "Dapagliflozin and mortality in CKD".into(),
                        abstract_text:
                            "BACKGROUND: CKD progresses. METHODS: We enrolled 4304 patients. \
                             RESULTS: Mortality fell. CONCLUSIONS: Dapagliflozin works."
                                .into(),
                        journal: "N Engl J Med".into(),
                        pub_date: "2024 Mar 15".into(),
                        pub_types: vec!["Randomized Controlled Trial".into()],
                        is_high_impact: true,
                        ..Default::default()
                    },
                    ArticleRecord {
                        pmid: "2".into(),
                        title: "A biomarker cohort".into(),
                        abstract_text: "A prospective cohort using a novel biomarker.".into(),
                        journal: "Minor J".into(),
                        pub_date: "2024 Jan 02".into(),
                        ..Default::default()
                    },
                ],
                count: 2,
                days_back: 7,
                ..Default::default()
            },
        );
        records
    }

    #[test]
    fn test_build_report_end_to_end() {
        let report = analyzer().build_report(&sample_records());

        assert_eq!(report.report_period, "過去 7 天");
        assert_eq!(report.executive_summary.total_count, 2);
        assert_eq!(report.executive_summary.high_impact_count, 1);
        assert_eq!(report.featured_articles.len(), 2);
        // High-impact article is featured first.
        assert_eq!(report.featured_articles[0].pmid, "1");
        assert!(!report.research_ideas.is_empty());
    }

    #[test]
    fn test_pipeline_is_pure_modulo_timestamps() {
        let engine = analyzer();
        let records = sample_records();
        let first = engine.build_report(&records);
        let mut second = engine.build_report(&records);
        second.generated_at = first.generated_at;
        assert_eq!(first, second);

        let mut snapshot_a = engine.analyze_trends(&records);
        let snapshot_b = engine.analyze_trends(&records);
        snapshot_a.analyzed_at = snapshot_b.analyzed_at;
        assert_eq!(snapshot_a, snapshot_b);
    }

    #[test]
    fn test_empty_record_set_builds_empty_report() {
        let report = analyzer().build_report(&RecordSet::new());
        assert_eq!(report.report_period, "N/A");
        assert_eq!(report.executive_summary.total_count, 0);
        assert!(report.featured_articles.is_empty());
        // Only the two static methodological ideas remain.
        assert_eq!(report.research_ideas.len(), 2);
    }
}
