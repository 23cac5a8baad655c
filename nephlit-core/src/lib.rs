//! # Nephlit Core
//!
//! Deterministic analysis engine for weekly nephrology literature digests.
//! Takes already-fetched bibliographic records grouped by research category
//! and derives trend statistics, per-article PICO extractions, localized
//! narrative summaries, and a ranked list of research-idea suggestions,
//! assembled into a weekly report document.
//!
//! Fetching records from PubMed, dashboard rendering, and the CLI surface
//! live in sibling collaborators; this crate is pure computation plus thin
//! JSON persistence for its own output documents.

pub mod config;
pub mod engine;
pub mod error;
pub mod ideas;
pub mod locale;
pub mod pico;
pub mod report;
pub mod store;
pub mod summary;
mod text;
pub mod trends;
pub mod types;

// Re-export commonly used types at the crate root.
pub use config::{AnalyzerConfig, ExtractionConfig, SectionConfig, TaxonomyGroup};
pub use engine::ResearchAnalyzer;
pub use error::{Error, Result};
pub use ideas::{IdeaKind, ResearchIdea};
pub use pico::{Pico, PicoExtractor};
pub use report::{ExecutiveSummary, ReportBuilder, WeeklyReport};
pub use summary::{ArticleSummary, SectionKind, StudyType, SummaryComposer};
pub use trends::{CategoryStats, TrendAnalyzer, TrendSnapshot};
pub use types::{ArticleRecord, CategoryBundle, RecordSet};
