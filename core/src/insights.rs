use std::collections::HashMap;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::profile::{Corpus, Profile};

/// Entries kept in each distribution after truncation.
pub const MAX_DISTRIBUTION_ENTRIES: usize = 10;

/// Count mapping ordered by descending count; equal counts break
/// alphabetically so output is deterministic. Serializes as a JSON object in
/// that order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CountMap(Vec<(String, u64)>);

impl CountMap {
    fn from_counts(counts: HashMap<String, u64>, limit: usize) -> Self {
        let mut entries: Vec<(String, u64)> = counts.into_iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries.truncate(limit);
        Self(entries)
    }

    pub fn entries(&self) -> &[(String, u64)] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for CountMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, count) in &self.0 {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}

/// Mean current and expected salary over the filtered subset. `None` means
/// the subset was empty, which is distinct from a legitimate zero mean.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryComparison {
    pub current_salary_mean: Option<f64>,
    pub expected_salary_mean: Option<f64>,
}

/// The three independent aggregations over the title-filtered subset.
#[derive(Debug, Serialize)]
pub struct Insights {
    pub skill_distribution: CountMap,
    pub salary_comparison: SalaryComparison,
    pub regional_distribution: CountMap,
}

/// Aggregate insights over profiles whose professional title contains
/// `job_title` as a case-insensitive substring. An empty filtered subset is a
/// normal outcome: empty distributions and null salary means.
pub fn compute(corpus: &Corpus, job_title: &str) -> Insights {
    let needle = job_title.to_lowercase();
    let filtered: Vec<&Profile> = corpus
        .profiles()
        .iter()
        .filter(|p| p.professional_title.to_lowercase().contains(&needle))
        .collect();
    tracing::debug!(job_title, matched = filtered.len(), "aggregating insights");

    Insights {
        skill_distribution: skill_distribution(&filtered),
        salary_comparison: salary_comparison(&filtered),
        regional_distribution: regional_distribution(&filtered),
    }
}

fn skill_distribution(filtered: &[&Profile]) -> CountMap {
    let mut counts: HashMap<String, u64> = HashMap::new();
    for p in filtered {
        for skill in p.skill_list() {
            *counts.entry(skill.to_string()).or_insert(0) += 1;
        }
    }
    CountMap::from_counts(counts, MAX_DISTRIBUTION_ENTRIES)
}

fn salary_comparison(filtered: &[&Profile]) -> SalaryComparison {
    if filtered.is_empty() {
        return SalaryComparison {
            current_salary_mean: None,
            expected_salary_mean: None,
        };
    }
    let n = filtered.len() as f64;
    let current = filtered.iter().map(|p| p.current_salary).sum::<f64>() / n;
    let expected = filtered.iter().map(|p| p.expected_salary).sum::<f64>() / n;
    SalaryComparison {
        current_salary_mean: Some(round2(current)),
        expected_salary_mean: Some(round2(expected)),
    }
}

fn regional_distribution(filtered: &[&Profile]) -> CountMap {
    let mut counts: HashMap<String, u64> = HashMap::new();
    for p in filtered {
        *counts.entry(p.city.clone()).or_insert(0) += 1;
    }
    CountMap::from_counts(counts, MAX_DISTRIBUTION_ENTRIES)
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
