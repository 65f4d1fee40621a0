use anyhow::Result;
use serde::Serialize;

use crate::charts::{ChartKind, ChartSink};
use crate::insights::{self, Insights};
use crate::profile::{Corpus, Query};
use crate::ranker::{self, TOP_K};
use crate::vectorizer::VectorSpace;

/// One ranked candidate: the exposed profile field subset plus its score.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredCandidate {
    pub full_name: String,
    pub city: String,
    pub skills: String,
    pub match_score: f32,
}

/// Complete response for one ranking request.
#[derive(Debug, Serialize)]
pub struct RankResponse {
    pub candidates: Vec<ScoredCandidate>,
    pub insights: Insights,
}

/// Rank the corpus against the query and aggregate insights over the
/// title-filtered subset.
///
/// The vector space is fitted fresh from the corpus snapshot and discarded
/// with the response. Pure over its inputs; the only side effect is handing
/// the three aggregation payloads to `sink`.
pub fn rank_with_insights(
    corpus: &Corpus,
    query: &Query,
    sink: &dyn ChartSink,
) -> Result<RankResponse> {
    let (space, corpus_vectors) = VectorSpace::fit(corpus.feature_texts());
    let query_vector = space.transform(&query.text());
    let ranked = ranker::rank(&query_vector, &corpus_vectors, TOP_K);
    tracing::debug!(
        corpus_size = corpus.len(),
        vocabulary = space.vocabulary_len(),
        candidates = ranked.len(),
        "ranked corpus against query"
    );

    let candidates = ranked
        .into_iter()
        .filter_map(|(idx, score)| {
            corpus.get(idx).map(|p| ScoredCandidate {
                full_name: p.full_name.clone(),
                city: p.city.clone(),
                skills: p.skills.clone(),
                match_score: score,
            })
        })
        .collect();

    let insights = insights::compute(corpus, &query.job_title);
    sink.render(
        ChartKind::SkillDistribution,
        &query.job_title,
        &serde_json::to_value(&insights.skill_distribution)?,
    )?;
    sink.render(
        ChartKind::SalaryComparison,
        &query.job_title,
        &serde_json::to_value(&insights.salary_comparison)?,
    )?;
    sink.render(
        ChartKind::RegionalDistribution,
        &query.job_title,
        &serde_json::to_value(&insights.regional_distribution)?,
    )?;

    Ok(RankResponse {
        candidates,
        insights,
    })
}
