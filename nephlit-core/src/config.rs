//! Configuration for the analysis engine.
//!
//! Uses `figment` for layered configuration: defaults -> optional TOML file
//! -> `NEPHLIT_`-prefixed environment variables. The keyword taxonomy,
//! journal allow-list, and pattern tables are plain read-only data carried
//! in [`AnalyzerConfig`]; each component compiles what it needs at
//! construction, so tests can substitute alternate vocabularies without
//! process-wide side effects.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::summary::SectionKind;

/// One taxonomy group: a named trend category and its literal keyword list.
///
/// Group order matters: it defines the tie-breaking insertion order for top
/// keywords and the walk order for research-gap detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyGroup {
    pub category: String,
    pub keywords: Vec<String>,
}

/// Ordered regex pattern families for PICO extraction. Within each family
/// the first matching pattern wins; later patterns are never tried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub population_patterns: Vec<String>,
    pub intervention_patterns: Vec<String>,
    pub comparison_patterns: Vec<String>,
    pub outcome_patterns: Vec<String>,
    /// Lowercase substrings that mark a MeSH term as disease-indicating,
    /// used for the population fallback.
    pub disease_indicators: Vec<String>,
}

/// One recognized abstract section header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionHeader {
    /// Header regex, compiled case-insensitively.
    pub pattern: String,
    pub kind: SectionKind,
}

/// Ordered section header patterns for structured-abstract splitting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionConfig {
    pub headers: Vec<SectionHeader>,
}

/// Locations of the three persisted JSON documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub data_dir: PathBuf,
    pub articles_file: String,
    pub trends_file: String,
    pub summary_file: String,
}

impl OutputConfig {
    pub fn articles_path(&self) -> PathBuf {
        self.data_dir.join(&self.articles_file)
    }

    pub fn trends_path(&self) -> PathBuf {
        self.data_dir.join(&self.trends_file)
    }

    pub fn summary_path(&self) -> PathBuf {
        self.data_dir.join(&self.summary_file)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            articles_file: "articles.json".into(),
            trends_file: "trends.json".into(),
            summary_file: "weekly_summary.json".into(),
        }
    }
}

/// Top-level configuration for the analysis engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Trend keyword taxonomy, in scan order.
    pub trend_keywords: Vec<TaxonomyGroup>,
    /// Journal allow-list; the fetch collaborator flags a record as
    /// high-impact when its journal substring-matches an entry.
    pub high_impact_journals: Vec<String>,
    pub extraction: ExtractionConfig,
    pub sections: SectionConfig,
    pub output: OutputConfig,
}

impl AnalyzerConfig {
    /// Load configuration: built-in defaults, then an optional TOML file,
    /// then `NEPHLIT_`-prefixed environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment
            .merge(Env::prefixed("NEPHLIT_").split("__"))
            .extract()
            .map_err(|e| Error::Config {
                message: e.to_string(),
            })
    }

    /// Whether a journal name matches the high-impact allow-list
    /// (case-insensitive substring match). The fetch collaborator applies
    /// this when it sets `is_high_impact` on ingested records.
    pub fn is_high_impact_journal(&self, journal: &str) -> bool {
        let journal = journal.to_lowercase();
        self.high_impact_journals
            .iter()
            .any(|entry| journal.contains(&entry.to_lowercase()))
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            population_patterns: strings(&[
                r"(?:patients?|subjects?|participants?|children|adults?|individuals?)\s+(?:with|who|having)\s+([^.]+?)(?:\.|,|were|was)",
                r"(?:in|among)\s+(\d+[\d,]*\s*(?:patients?|subjects?|participants?|children|adults?)(?:[^.]{0,100}))",
                r"(\d+[\d,]*\s*(?:patients?|subjects?|participants?|children|adults?)[^.]{0,50}(?:with|having)[^.]{0,100})",
                r"(?:enrolled|included|recruited)\s+(\d+[^.]{0,150})",
            ]),
            intervention_patterns: strings(&[
                r"(?:received|treated with|administered|given|assigned to)\s+([^.]+?)(?:\.|,|versus|vs|compared|or placebo)",
                r"(?:intervention|treatment)\s+(?:group|arm)?\s*(?:received|was|included)?\s*([^.]+?)(?:\.|,|versus|vs)",
                r"(?:effect of|efficacy of|impact of)\s+([^.]+?)\s+(?:on|in|for)",
            ]),
            comparison_patterns: strings(&[
                r"(?:compared (?:to|with)|versus|vs\.?)\s+([^.]+?)(?:\.|,|in terms)",
                r"(?:control group|placebo group)\s*(?:received|was)?\s*([^.]*)",
                r"(?:placebo|standard care|usual care|conventional treatment)",
            ]),
            outcome_patterns: strings(&[
                r"(?:primary (?:outcome|endpoint)|main outcome)\s*(?:was|were|included)?\s*([^.]+)",
                r"(?:measured|assessed|evaluated)\s+([^.]+?)(?:\.|,|using|by)",
                r"(?:significantly|showed)\s+([^.]+?)(?:\.|,)",
                r"(?:reduction|increase|improvement|decrease|change)\s+(?:in|of)\s+([^.]+?)(?:\.|,)",
            ]),
            disease_indicators: strings(&[
                "disease", "syndrome", "disorder", "injury", "failure", "nephro", "kidney",
                "renal",
            ]),
        }
    }
}

impl Default for SectionConfig {
    fn default() -> Self {
        let header = |pattern: &str, kind: SectionKind| SectionHeader {
            pattern: pattern.to_string(),
            kind,
        };
        Self {
            headers: vec![
                header(r"BACKGROUND[:\s]*", SectionKind::Background),
                header(r"(?:OBJECTIVE|AIM|PURPOSE)S?[:\s]*", SectionKind::Objective),
                header(r"METHODS[:\s]*", SectionKind::Methods),
                header(r"(?:RESULTS|FINDINGS)[:\s]*", SectionKind::Results),
                header(r"(?:CONCLUSIONS?|INTERPRETATION)[:\s]*", SectionKind::Conclusion),
            ],
        }
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            trend_keywords: vec![
                TaxonomyGroup {
                    category: "治療方法".into(),
                    keywords: strings(&[
                        "SGLT2 inhibitor",
                        "GLP-1",
                        "finerenone",
                        "dapagliflozin",
                        "empagliflozin",
                        "canagliflozin",
                        "immunotherapy",
                        "gene therapy",
                        "stem cell",
                        "biologics",
                    ]),
                },
                TaxonomyGroup {
                    category: "診斷技術".into(),
                    keywords: strings(&[
                        "biomarker",
                        "machine learning",
                        "artificial intelligence",
                        "proteomics",
                        "metabolomics",
                        "genetic testing",
                        "point-of-care",
                        "digital health",
                    ]),
                },
                TaxonomyGroup {
                    category: "研究主題".into(),
                    keywords: strings(&[
                        "cardiovascular",
                        "heart failure",
                        "inflammation",
                        "fibrosis",
                        "oxidative stress",
                        "gut microbiome",
                        "precision medicine",
                        "personalized",
                        "telemedicine",
                    ]),
                },
                TaxonomyGroup {
                    category: "臨床結局".into(),
                    keywords: strings(&[
                        "mortality",
                        "hospitalization",
                        "quality of life",
                        "patient-reported outcomes",
                        "cost-effectiveness",
                        "eGFR decline",
                        "proteinuria",
                        "ESKD",
                    ]),
                },
            ],
            high_impact_journals: strings(&[
                "N Engl J Med",
                "Lancet",
                "JAMA",
                "BMJ",
                "Ann Intern Med",
                "J Am Soc Nephrol",
                "Kidney Int",
                "Am J Kidney Dis",
                "Clin J Am Soc Nephrol",
                "Nephrol Dial Transplant",
                "Pediatr Nephrol",
                "Am J Transplant",
                "Transplantation",
                "Nat Rev Nephrol",
                "Kidney Int Rep",
                "J Clin Invest",
                "JAMA Intern Med",
                "JAMA Pediatr",
                "Pediatrics",
                "J Pediatr",
            ]),
            extraction: ExtractionConfig::default(),
            sections: SectionConfig::default(),
            output: OutputConfig::default(),
        }
    }
}
