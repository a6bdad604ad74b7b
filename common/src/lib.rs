//! Part AI Common Library
//!
//! CLIと他のフロントエンドで共有される型と照合ロジック

pub mod types;
pub mod error;
pub mod query;
pub mod predicate;
pub mod scoring;
pub mod parser;
pub mod prompts;

pub use types::{CatalogEntry, ScoredCandidate, VisionAnalysis};
pub use error::{Error, Result};
pub use query::{MatchQuery, NOT_IDENTIFIED};
pub use predicate::{CatalogPredicate, contains_ignore_case};
pub use scoring::{rank_candidates, score_candidate, MAX_RESULTS, MIN_SIMILARITY};
pub use parser::{extract_json_object, parse_vision_response};
pub use prompts::build_identify_prompt;
