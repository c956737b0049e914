//! Answer composition from ranked results

use std::collections::HashMap;
use std::sync::Arc;

use tracing::error;
use tracing::warn;

use crate::models::{AnswerOutcome, AnswerTurn, ScoredDocument, Source};
use crate::store::DocumentStore;

/// Returned when a ranked result no longer resolves to a document
pub const CORPUS_ERROR_MESSAGE: &str = "抱歉，系统出现错误。";

/// Default number of sources cited per answer
pub const DEFAULT_MAX_SOURCES: usize = 3;

/// Follow-up questions offered with each answer
pub const FOLLOW_UPS_PER_CATEGORY: usize = 3;

/// Fallback reply for a query nothing matched
#[must_use]
pub fn fallback_message(query: &str) -> String {
    format!(
        r#"抱歉，我在知识库中没有找到关于"{query}"的相关信息。

🔍 **建议您**：
• 尝试使用不同的关键词重新提问
• 在知识中心使用全文搜索功能
• 联系相关部门同事获取帮助

📚 **我可以帮您查询**：
• 销售业绩和数据分析
• 人力资源政策（休假、福利等）
• 市场营销活动和策略
• IT设备和技术支持
• 财务报销和费用管理"#
    )
}

/// Canned follow-up questions keyed by document category
#[derive(Debug, Clone)]
pub struct FollowUpCatalog {
    by_category: HashMap<String, Vec<String>>,
    generic: Vec<String>,
}

impl FollowUpCatalog {
    /// Catalog for the built-in corpus categories
    #[must_use]
    pub fn builtin() -> Self {
        let entries: [(&str, [&str; FOLLOW_UPS_PER_CATEGORY]); 5] = [
            ("销售数据", ["查看本季度销售目标", "上个月的销售数据", "不同区域的销售对比"]),
            ("人力资源", ["如何申请年假", "病假需要什么材料", "其他福利有哪些"]),
            ("市场营销", ["Q4的营销计划", "营销活动预算", "如何策划活动"]),
            ("IT支持", ["如何重置密码", "申请新电脑", "VPN配置方法"]),
            ("财务管理", ["发票开具要求", "报销审批流程", "预算申请流程"]),
        ];

        let by_category = entries
            .into_iter()
            .map(|(category, questions)| {
                (
                    category.to_string(),
                    questions.iter().map(ToString::to_string).collect(),
                )
            })
            .collect();

        Self {
            by_category,
            generic: vec![
                "如何查看详细信息？".to_string(),
                "有相关的操作指南吗？".to_string(),
                "这个政策什么时候更新的？".to_string(),
            ],
        }
    }

    /// Replace or add category entries; entries without exactly three questions are skipped
    #[must_use]
    pub fn with_overrides(mut self, overrides: HashMap<String, Vec<String>>) -> Self {
        for (category, questions) in overrides {
            if questions.len() == FOLLOW_UPS_PER_CATEGORY {
                self.by_category.insert(category, questions);
            } else {
                warn!(
                    "Ignoring follow-ups for '{}': expected {} questions, got {}",
                    category,
                    FOLLOW_UPS_PER_CATEGORY,
                    questions.len()
                );
            }
        }
        self
    }

    /// Questions for `category`, or the generic list for unknown categories
    #[must_use]
    pub fn questions_for(&self, category: &str) -> &[String] {
        self.by_category
            .get(category)
            .map_or(self.generic.as_slice(), Vec::as_slice)
    }

    #[must_use]
    pub fn generic(&self) -> &[String] {
        &self.generic
    }
}

impl Default for FollowUpCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Builds the assistant's answer from ranked results
#[derive(Clone)]
pub struct ResponseComposer {
    store: Arc<dyn DocumentStore>,
    follow_ups: Arc<FollowUpCatalog>,
    max_sources: usize,
}

impl ResponseComposer {
    pub fn new(store: Arc<dyn DocumentStore>, follow_ups: FollowUpCatalog, max_sources: usize) -> Self {
        Self {
            store,
            follow_ups: Arc::new(follow_ups),
            max_sources,
        }
    }

    /// Compose the answer for `query`.
    ///
    /// No results yield the fallback message. Otherwise the content is the top
    /// document verbatim, with sources from the leading results and follow-ups
    /// for the top document's category. Confidence is the top score.
    #[must_use]
    pub fn compose(&self, query: &str, results: &[ScoredDocument]) -> AnswerTurn {
        let Some(top) = results.first() else {
            return AnswerTurn {
                content: fallback_message(query),
                sources: Vec::new(),
                related_questions: Vec::new(),
                confidence: 0,
                outcome: AnswerOutcome::NoMatch,
                process: None,
            };
        };

        let sources: Vec<Source> = results
            .iter()
            .take(self.max_sources)
            .filter_map(|result| self.store.get_document(&result.document_id))
            .map(Source::from)
            .collect();

        let Some(top_document) = self.store.get_document(&top.document_id) else {
            error!(
                "Ranked result {} is missing from the document store",
                top.document_id
            );
            return AnswerTurn {
                content: CORPUS_ERROR_MESSAGE.to_string(),
                sources,
                related_questions: self.follow_ups.generic().to_vec(),
                confidence: top.relevance_score,
                outcome: AnswerOutcome::CorpusInconsistency,
                process: None,
            };
        };

        AnswerTurn {
            content: top_document.content.clone(),
            sources,
            related_questions: self
                .follow_ups
                .questions_for(&top_document.category)
                .to_vec(),
            confidence: top.relevance_score,
            outcome: AnswerOutcome::Answered,
            process: None,
        }
    }
}
