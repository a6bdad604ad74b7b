//! 照合クエリ
//!
//! 画像解析の出力を照合用のクエリに変換する。
//! 空文字・未設定の扱いはここで一元化し、スコア計算側では意識しない。

use crate::types::VisionAnalysis;

/// 画像解析サービスが「部品を識別できなかった」ときに返す部品名
pub const NOT_IDENTIFIED: &str = "Non identifié";

/// 説明文トークンの最小文字数（これより長いものだけ採用）
pub const MIN_TERM_CHARS: usize = 3;

/// 説明文トークンの最大採用数
pub const MAX_DESCRIPTION_TERMS: usize = 5;

/// 照合クエリ（1回の照合呼び出しの間だけ存在する）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchQuery {
    pub part_name: Option<String>,
    pub description: Option<String>,
    pub keywords: Vec<String>,
}

impl MatchQuery {
    /// 前後の空白を除去し、空の説明文・キーワードを取り除いて構築
    pub fn new(part_name: Option<&str>, description: Option<&str>, keywords: &[String]) -> Self {
        let non_blank = |s: &str| {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };

        Self {
            part_name: part_name.and_then(non_blank),
            description: description.and_then(non_blank),
            keywords: keywords.iter().filter_map(|k| non_blank(k.as_str())).collect(),
        }
    }

    pub fn from_analysis(analysis: &VisionAnalysis) -> Self {
        Self::new(
            Some(&analysis.part_name),
            Some(&analysis.description),
            &analysis.keywords,
        )
    }

    /// 識別済みの部品名（未設定またはセンチネル値ならNone）
    pub fn identified_part_name(&self) -> Option<&str> {
        self.part_name
            .as_deref()
            .filter(|name| *name != NOT_IDENTIFIED)
    }

    pub fn is_identified(&self) -> bool {
        self.identified_part_name().is_some()
    }

    /// 説明文を空白で分割し、4文字以上のトークンを先頭から最大5個返す
    ///
    /// 候補検索（説明文パス）とスコア計算の分母の両方で使う。
    pub fn description_terms(&self) -> Vec<&str> {
        self.description
            .as_deref()
            .map(|d| {
                d.split_whitespace()
                    .filter(|w| w.chars().count() > MIN_TERM_CHARS)
                    .take(MAX_DESCRIPTION_TERMS)
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_sentinel_is_not_identified() {
        let query = MatchQuery::new(Some(NOT_IDENTIFIED), Some("pièce"), &[]);
        assert!(!query.is_identified());
    }

    #[test]
    fn test_missing_or_blank_part_name_is_not_identified() {
        assert!(!MatchQuery::new(None, None, &[]).is_identified());
        assert!(!MatchQuery::new(Some("   "), None, &[]).is_identified());
    }

    #[test]
    fn test_new_trims_and_drops_blanks() {
        let query = MatchQuery::new(
            Some("  Filtre à huile "),
            Some("  "),
            &keywords(&["frein", "", "  disque "]),
        );
        assert_eq!(query.identified_part_name(), Some("Filtre à huile"));
        assert_eq!(query.description, None);
        assert_eq!(query.keywords, keywords(&["frein", "disque"]));
    }

    #[test]
    fn test_description_terms_filters_short_tokens() {
        let query = MatchQuery::new(Some("x"), Some("Un filtre à huile pour moteur"), &[]);
        assert_eq!(query.description_terms(), vec!["filtre", "huile", "pour", "moteur"]);
    }

    #[test]
    fn test_description_terms_capped_at_five() {
        let query = MatchQuery::new(
            Some("x"),
            Some("alpha bravo charlie delta echo foxtrot golf"),
            &[],
        );
        assert_eq!(
            query.description_terms(),
            vec!["alpha", "bravo", "charlie", "delta", "echo"]
        );
    }

    #[test]
    fn test_description_terms_counts_characters_not_bytes() {
        // "été" は3文字（4バイト以上）なので除外される
        let query = MatchQuery::new(Some("x"), Some("été usée"), &[]);
        assert_eq!(query.description_terms(), vec!["usée"]);
    }

    #[test]
    fn test_from_analysis() {
        let analysis = VisionAnalysis {
            part_name: "Plaquette de frein".into(),
            description: "Plaquette avant".into(),
            confidence: 0.9,
            keywords: keywords(&["frein"]),
            ..Default::default()
        };
        let query = MatchQuery::from_analysis(&analysis);
        assert_eq!(query.identified_part_name(), Some("Plaquette de frein"));
        assert_eq!(query.description.as_deref(), Some("Plaquette avant"));
        assert_eq!(query.keywords, keywords(&["frein"]));
    }
}
