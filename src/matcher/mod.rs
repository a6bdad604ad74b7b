//! カタログ照合モジュール
//!
//! 1. 3つの検索パスで候補を収集（並行実行）
//! 2. IDで重複除去
//! 3. スコア計算・ソート・閾値フィルタ・件数制限

mod passes;

pub use passes::RetrievalPass;

use crate::catalog::CatalogSearch;
use crate::error::{PartAiError, Result};
use part_ai_common::{rank_candidates, CatalogEntry, MatchQuery, ScoredCandidate};
use std::collections::HashSet;
use tracing::debug;

/// カタログ照合
///
/// カタログ検索機能は外から注入する。
pub struct Matcher<C> {
    catalog: C,
}

impl<C: CatalogSearch> Matcher<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// 部品名・説明文・キーワードから照合
    pub async fn match_product(
        &self,
        part_name: Option<&str>,
        description: Option<&str>,
        keywords: &[String],
    ) -> Result<Vec<ScoredCandidate>> {
        let query = MatchQuery::new(part_name, description, keywords);
        self.match_query(&query).await
    }

    /// クエリで照合（最大10件、類似度の降順）
    ///
    /// 未識別のクエリはカタログにアクセスせず空を返す。
    /// カタログ検索の失敗は `PartAiError::Retrieval` として返す。
    pub async fn match_query(&self, query: &MatchQuery) -> Result<Vec<ScoredCandidate>> {
        if !query.is_identified() {
            debug!(part_name = ?query.part_name, "part not identified, skipping match");
            return Ok(Vec::new());
        }

        let candidates = self.retrieve_candidates(query).await?;
        let candidate_count = candidates.len();
        let ranked = rank_candidates(query, candidates);

        debug!(candidates = candidate_count, matched = ranked.len(), "catalog match complete");
        Ok(ranked)
    }

    /// 3パスの候補を収集し、IDで重複除去
    ///
    /// 重複時はパス順（部品名 → キーワード → 説明文）で最初のものを残す。
    pub async fn retrieve_candidates(&self, query: &MatchQuery) -> Result<Vec<CatalogEntry>> {
        if !query.is_identified() {
            return Ok(Vec::new());
        }

        let (exact, keyword, description) = tokio::try_join!(
            self.run_pass(RetrievalPass::ExactName, query),
            self.run_pass(RetrievalPass::Keyword, query),
            self.run_pass(RetrievalPass::DescriptionTerm, query),
        )?;

        let mut seen = HashSet::new();
        let unique = exact
            .into_iter()
            .chain(keyword)
            .chain(description)
            .filter(|entry| seen.insert(entry.id.clone()))
            .collect();

        Ok(unique)
    }

    async fn run_pass(&self, pass: RetrievalPass, query: &MatchQuery) -> Result<Vec<CatalogEntry>> {
        let Some(predicate) = pass.predicate(query) else {
            return Ok(Vec::new());
        };

        let hits = self
            .catalog
            .search(&predicate, pass.limit())
            .await
            .map_err(|e| match e {
                PartAiError::Retrieval(_) => e,
                other => PartAiError::Retrieval(format!("{}: {}", pass, other)),
            })?;

        debug!(%pass, hits = hits.len(), "retrieval pass");
        Ok(hits)
    }
}
