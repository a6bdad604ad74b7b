//! 候補検索パス
//!
//! 3つの緩い検索で候補を広めに集め、精度はスコア計算に任せる。

use part_ai_common::{CatalogPredicate, MatchQuery};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrievalPass {
    /// 部品名を含むエントリ
    ExactName,
    /// キーワードのいずれかを含むエントリ
    Keyword,
    /// 説明文トークンのいずれかを含むエントリ
    DescriptionTerm,
}

impl RetrievalPass {
    pub const ALL: [RetrievalPass; 3] = [
        RetrievalPass::ExactName,
        RetrievalPass::Keyword,
        RetrievalPass::DescriptionTerm,
    ];

    /// パスごとの最大取得件数
    pub fn limit(&self) -> usize {
        match self {
            RetrievalPass::ExactName => 3,
            RetrievalPass::Keyword => 5,
            RetrievalPass::DescriptionTerm => 3,
        }
    }

    /// 検索条件（検索語がなければNone）
    pub fn predicate(&self, query: &MatchQuery) -> Option<CatalogPredicate> {
        let part_name = query.identified_part_name()?;
        match self {
            RetrievalPass::ExactName => Some(CatalogPredicate::NameContains(part_name.to_string())),
            RetrievalPass::Keyword => (!query.keywords.is_empty())
                .then(|| CatalogPredicate::NameOrDescriptionContainsAny(query.keywords.clone())),
            RetrievalPass::DescriptionTerm => {
                let terms = query.description_terms();
                (!terms.is_empty()).then(|| {
                    CatalogPredicate::NameOrDescriptionContainsAny(
                        terms.into_iter().map(String::from).collect(),
                    )
                })
            }
        }
    }
}

impl fmt::Display for RetrievalPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetrievalPass::ExactName => write!(f, "exact-name"),
            RetrievalPass::Keyword => write!(f, "keyword"),
            RetrievalPass::DescriptionTerm => write!(f, "description-term"),
        }
    }
}
