//! 類似度スコア計算
//!
//! 候補ごとに3つのシグナルを合算する:
//! 1. 部品名の包含（最大0.5）
//! 2. キーワードの一致率（最大0.3）
//! 3. 説明文トークンの一致率（最大0.2）
//!
//! 比較はすべて大文字小文字を区別しない部分一致。

use crate::predicate::contains_ignore_case;
use crate::query::MatchQuery;
use crate::types::{CatalogEntry, ScoredCandidate};

/// 候補名が部品名を含む場合の加点
pub const NAME_CONTAINS_QUERY_WEIGHT: f64 = 0.5;
/// 部品名が候補名を含む場合の加点
pub const QUERY_CONTAINS_NAME_WEIGHT: f64 = 0.4;
pub const KEYWORD_WEIGHT: f64 = 0.3;
pub const DESCRIPTION_WEIGHT: f64 = 0.2;

/// この値を超えた候補のみ結果に残す
pub const MIN_SIMILARITY: f64 = 0.3;
pub const MAX_RESULTS: usize = 10;

/// 1件の候補の類似度を計算（0.0〜1.0）
///
/// 未識別のクエリに対しては常に0.0。
/// 名前が空の候補は部品名シグナルを得ない。
pub fn score_candidate(query: &MatchQuery, entry: &CatalogEntry) -> f64 {
    let Some(part_name) = query.identified_part_name() else {
        return 0.0;
    };

    let mut score = 0.0;

    if contains_ignore_case(&entry.name, part_name) {
        score += NAME_CONTAINS_QUERY_WEIGHT;
    } else if contains_ignore_case(part_name, &entry.name) {
        score += QUERY_CONTAINS_NAME_WEIGHT;
    }

    if !query.keywords.is_empty() {
        let matched = query
            .keywords
            .iter()
            .filter(|kw| {
                contains_ignore_case(&entry.name, kw)
                    || entry
                        .description_text()
                        .is_some_and(|d| contains_ignore_case(d, kw))
            })
            .count();
        score += KEYWORD_WEIGHT * ratio(matched, query.keywords.len());
    }

    let terms = query.description_terms();
    if !terms.is_empty() {
        if let Some(description) = entry.description_text() {
            let matched = terms
                .iter()
                .filter(|term| contains_ignore_case(description, term))
                .count();
            score += DESCRIPTION_WEIGHT * ratio(matched, terms.len());
        }
    }

    score.clamp(0.0, 1.0)
}

/// 候補をスコア付けし、降順ソート・閾値フィルタ・件数制限を適用
///
/// 同点の場合はカタログIDの昇順。
pub fn rank_candidates(query: &MatchQuery, candidates: Vec<CatalogEntry>) -> Vec<ScoredCandidate> {
    let mut scored: Vec<ScoredCandidate> = candidates
        .into_iter()
        .map(|entry| ScoredCandidate {
            similarity: score_candidate(query, &entry),
            entry,
            image_url: None,
        })
        .collect();

    scored.sort_by(|a, b| {
        b.similarity
            .total_cmp(&a.similarity)
            .then_with(|| a.entry.id.cmp(&b.entry.id))
    });

    scored
        .into_iter()
        .filter(|c| c.similarity > MIN_SIMILARITY)
        .take(MAX_RESULTS)
        .collect()
}

fn ratio(matched: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        matched as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(part_name: &str, description: Option<&str>, keywords: &[&str]) -> MatchQuery {
        let keywords: Vec<String> = keywords.iter().map(|k| k.to_string()).collect();
        MatchQuery::new(Some(part_name), description, &keywords)
    }

    fn entry(id: &str, name: &str, description: &str) -> CatalogEntry {
        CatalogEntry::new(id, name).with_description(description)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_candidate_name_contains_part_name() {
        let q = query("Filtre à huile", None, &[]);
        let score = score_candidate(&q, &entry("1", "Filtre à huile Bosch", ""));
        assert!(approx(score, 0.5));
    }

    #[test]
    fn test_part_name_contains_candidate_name() {
        let q = query("Filtre à huile Bosch 123", None, &[]);
        let score = score_candidate(&q, &entry("1", "Filtre à huile Bosch", ""));
        assert!(approx(score, 0.4));
    }

    #[test]
    fn test_name_signal_ignores_case() {
        let q = query("filtre À HUILE", None, &[]);
        let score = score_candidate(&q, &entry("1", "Filtre à huile", ""));
        assert!(approx(score, 0.5));
    }

    #[test]
    fn test_keyword_ratio() {
        let q = query("XYZ", None, &["frein", "disque"]);
        let score = score_candidate(&q, &entry("1", "Plaquette de frein", "pour frein avant"));
        assert!(approx(score, 0.15));
    }

    #[test]
    fn test_keyword_matches_description_only() {
        let q = query("XYZ", None, &["céramique"]);
        let score = score_candidate(&q, &entry("1", "Plaquette", "Garniture CÉRAMIQUE"));
        assert!(approx(score, 0.3));
    }

    #[test]
    fn test_description_terms_ratio() {
        // トークン: filtre, huile, pour, moteur, diesel
        let q = query("XYZ", Some("filtre huile pour moteur diesel"), &[]);
        let score = score_candidate(
            &q,
            &entry("1", "Cartouche", "Cartouche filtre pour moteur essence"),
        );
        // filtre, pour, moteur が一致 → 3/5
        assert!(approx(score, 0.2 * 3.0 / 5.0));
    }

    #[test]
    fn test_description_signal_requires_candidate_description() {
        let q = query("XYZ", Some("filtre huile moteur"), &[]);
        let score = score_candidate(&q, &CatalogEntry::new("1", "filtre huile moteur"));
        assert!(approx(score, 0.0));
    }

    #[test]
    fn test_all_signals_reach_one() {
        let q = query("Disque", Some("disque frein ventilé"), &["disque", "frein"]);
        let score = score_candidate(
            &q,
            &entry("1", "Disque de frein", "disque frein ventilé avant"),
        );
        assert!(approx(score, 1.0));
    }

    #[test]
    fn test_empty_candidate_name_gets_no_name_signal() {
        let q = query("Filtre", None, &[]);
        assert!(approx(score_candidate(&q, &entry("1", "", "")), 0.0));
    }

    #[test]
    fn test_not_identified_scores_zero() {
        let q = query(crate::NOT_IDENTIFIED, None, &[]);
        assert!(approx(score_candidate(&q, &entry("1", "Non identifié", "")), 0.0));
    }

    #[test]
    fn test_rank_threshold_is_strict() {
        // キーワード全一致のみ → ちょうど0.3 → 除外
        let q = query("XYZ", None, &["frein"]);
        let ranked = rank_candidates(&q, vec![entry("1", "Plaquette de frein", "")]);
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_rank_sorted_desc_with_id_tiebreak() {
        let q = query("Filtre", None, &[]);
        let ranked = rank_candidates(
            &q,
            vec![
                entry("c", "Filtre à air", ""),
                entry("b", "Filtr", ""),
                entry("a", "Filtre à huile", ""),
            ],
        );
        let ids: Vec<&str> = ranked.iter().map(|c| c.entry.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "b"]);
        assert!(approx(ranked[2].similarity, 0.4));
    }

    #[test]
    fn test_rank_truncates_to_max_results() {
        let q = query("Bougie", None, &[]);
        let candidates = (0..15)
            .map(|i| entry(&format!("{:02}", i), &format!("Bougie {}", i), ""))
            .collect();
        let ranked = rank_candidates(&q, candidates);
        assert_eq!(ranked.len(), MAX_RESULTS);
        assert_eq!(ranked[0].entry.id, "00");
    }
}
