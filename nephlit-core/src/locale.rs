//! Localized message building for narratives, research ideas, and report
//! labels.
//!
//! The digest is written for a Traditional-Chinese readership; every
//! human-facing sentence the engine produces is assembled here so the
//! wording lives in one place. JSON field names stay English throughout.

use crate::summary::StudyType;

/// Builds the localized strings embedded in summaries, ideas, and reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Locale;

impl Locale {
    /// Subject phrase used to open the objective paragraph, e.g.
    /// "本隨機對照試驗旨在探討…".
    pub fn study_type_phrase(&self, study_type: StudyType) -> &'static str {
        match study_type {
            StudyType::Rct => "本隨機對照試驗",
            StudyType::MetaAnalysis => "本統合分析",
            StudyType::SystematicReview => "本系統性回顧",
            StudyType::CohortStudy => "本世代研究",
            StudyType::CaseControlStudy => "本病例對照研究",
            StudyType::GenericStudy => "本研究",
        }
    }

    pub fn objective_paragraph(&self, study_type: StudyType, text: &str) -> String {
        format!("【研究目的】{}旨在探討{}", self.study_type_phrase(study_type), text)
    }

    pub fn background_paragraph(&self, text: &str) -> String {
        format!("【研究背景】{text}")
    }

    pub fn methods_paragraph(&self, text: &str) -> String {
        format!("【研究方法】{text}")
    }

    pub fn results_paragraph(&self, text: &str) -> String {
        format!("【主要結果】{text}")
    }

    pub fn conclusion_paragraph(&self, text: &str) -> String {
        format!("【結論】{text}")
    }

    /// Single-paragraph narrative used when no section headers were found.
    pub fn fallback_paragraph(&self, text: &str) -> String {
        format!("【摘要】{text}")
    }

    /// Population synthesized from disease-indicating MeSH terms.
    pub fn population_from_terms(&self, terms: &[&str]) -> String {
        format!("患有 {} 的病人", terms.join(", "))
    }

    /// Report-period label, e.g. "過去 7 天".
    pub fn report_period(&self, days_back: u32) -> String {
        format!("過去 {days_back} 天")
    }

    pub fn report_period_unknown(&self) -> &'static str {
        "N/A"
    }

    // --- Executive-summary key findings ---

    pub fn hot_topic_finding(&self, topics: &[(String, usize)]) -> String {
        let joined = topics
            .iter()
            .map(|(topic, count)| format!("{topic} ({count}篇)"))
            .collect::<Vec<_>>()
            .join(", ");
        format!("本週熱門研究主題: {joined}")
    }

    pub fn high_impact_finding(&self, count: usize, journals: &[&str]) -> String {
        format!("高影響力期刊發表 {} 篇，包括: {}", count, journals.join(", "))
    }

    pub fn evidence_quality_finding(&self, rct_count: usize, meta_count: usize) -> String {
        format!("高品質證據: {rct_count} 篇 RCT, {meta_count} 篇統合分析")
    }

    // --- Research idea bodies ---

    pub fn hot_topic_idea(&self, keyword: &str, count: usize) -> String {
        format!(
            "目前 '{keyword}' 是研究熱點 ({count} 篇相關文章)，可考慮：\n\
             1. 在本地族群中驗證相關發現\n\
             2. 結合其他熱門主題進行交叉研究\n\
             3. 針對特定亞群進行深入分析"
        )
    }

    pub fn hot_topic_design(&self) -> &'static str {
        "觀察性研究 / 回顧性分析"
    }

    pub fn research_gap_idea(&self, keyword: &str, category: &str, count: usize) -> String {
        format!(
            "'{keyword}' ({category}) 目前研究較少 ({count} 篇)，\n\
             可能是新興或未被充分探索的領域，可考慮：\n\
             1. 文獻回顧以了解現有證據\n\
             2. 前瞻性觀察研究\n\
             3. 與既有研究主題結合"
        )
    }

    pub fn research_gap_design(&self) -> &'static str {
        "系統性回顧 / 前瞻性研究"
    }

    pub fn cross_domain_keyword(&self) -> &'static str {
        "兒童腎臟學 + 成人腎臟學"
    }

    pub fn cross_domain_idea(&self) -> &'static str {
        "考慮進行兒童至成人的長期追蹤研究：\n\
         1. 兒童期腎臟疾病對成年後的影響\n\
         2. 早期介入對長期預後的效果\n\
         3. 生命歷程觀點的腎臟病研究"
    }

    pub fn cross_domain_design(&self) -> &'static str {
        "長期追蹤世代研究"
    }

    /// The two fixed methodological-innovation ideas, as
    /// (keyword, body, suggested design) triples.
    pub fn methodological_ideas(&self) -> [(&'static str, &'static str, &'static str); 2] {
        [
            (
                "AI/機器學習",
                "應用人工智慧於腎臟病研究：\n\
                 1. 建立腎功能預測模型\n\
                 2. 影像自動判讀系統\n\
                 3. 治療反應預測",
                "回顧性資料分析 + 模型開發",
            ),
            (
                "真實世界數據",
                "利用真實世界數據進行研究：\n\
                 1. 健保資料庫分析\n\
                 2. 電子病歷數據挖掘\n\
                 3. 多中心登錄資料分析",
                "真實世界研究 (RWE)",
            ),
        ]
    }

    pub fn high_impact_keyword(&self) -> &'static str {
        "重要發現複製與延伸"
    }

    pub fn high_impact_idea(&self, count: usize) -> String {
        format!(
            "本週有 {count} 篇高影響力期刊文章，可考慮：\n\
             1. 在本地族群中驗證這些發現\n\
             2. 探索可能的機轉\n\
             3. 研究是否有族群差異"
        )
    }

    pub fn high_impact_design(&self) -> &'static str {
        "驗證性研究 / 機轉研究"
    }
}
