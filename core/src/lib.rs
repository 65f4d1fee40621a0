pub mod charts;
pub mod engine;
pub mod error;
pub mod insights;
pub mod profile;
pub mod ranker;
pub mod tokenizer;
pub mod vectorizer;

pub use charts::{ChartKind, ChartSink, JsonChartSink, NullChartSink};
pub use engine::{rank_with_insights, RankResponse, ScoredCandidate};
pub use error::TalentError;
pub use insights::{CountMap, Insights, SalaryComparison};
pub use profile::{Corpus, Profile, Query};
pub use vectorizer::{SparseVector, VectorSpace};
