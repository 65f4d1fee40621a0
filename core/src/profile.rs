use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::TalentError;

/// A candidate profile record. Fixed schema; attributes the source data may
/// omit are explicit options rather than empty strings filled in later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub full_name: String,
    pub city: String,
    pub professional_title: String,
    /// Comma-separated skill list, stored as text (e.g. "Python, SQL").
    pub skills: String,
    pub current_salary: f64,
    pub expected_salary: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Profile {
    /// Search text for vectorization: professional title and skills,
    /// space-concatenated.
    pub fn features(&self) -> String {
        format!("{} {}", self.professional_title, self.skills)
    }

    /// Skills as an ordered list, split on `", "` exactly. Empty or
    /// malformed entries are kept as empty strings so counts stay consistent
    /// with the source text.
    pub fn skill_list(&self) -> impl Iterator<Item = &str> + '_ {
        self.skills.split(", ")
    }
}

/// Ordered, read-only profile collection. Feature texts are composed once at
/// construction and cached for the lifetime of the snapshot.
pub struct Corpus {
    profiles: Vec<Profile>,
    features: Vec<String>,
}

impl Corpus {
    pub fn new(profiles: Vec<Profile>) -> Self {
        let features = profiles.iter().map(Profile::features).collect();
        Self { profiles, features }
    }

    /// Load profiles from a `.jsonl` file (one object per line) or a JSON
    /// file holding an array of profile objects.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let f = File::open(path).with_context(|| format!("open corpus {}", path.display()))?;
        let profiles = if path.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            let reader = BufReader::new(f);
            let mut profiles = Vec::new();
            for (lineno, line) in reader.lines().enumerate() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                let profile: Profile = serde_json::from_str(&line)
                    .with_context(|| format!("corpus record at line {}", lineno + 1))?;
                profiles.push(profile);
            }
            profiles
        } else {
            serde_json::from_reader(BufReader::new(f))
                .with_context(|| format!("corpus array in {}", path.display()))?
        };
        tracing::info!(num_profiles = profiles.len(), path = %path.display(), "corpus loaded");
        Ok(Self::new(profiles))
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn get(&self, idx: usize) -> Option<&Profile> {
        self.profiles.get(idx)
    }

    /// Cached `profile_features` texts, in corpus order.
    pub fn feature_texts(&self) -> &[String] {
        &self.features
    }
}

/// A validated ranking query.
#[derive(Debug, Clone)]
pub struct Query {
    pub job_title: String,
    pub skills: String,
}

impl Query {
    /// Both fields are required and must be non-empty after trimming.
    pub fn new(job_title: &str, skills: &str) -> Result<Self, TalentError> {
        let job_title = job_title.trim();
        let skills = skills.trim();
        if job_title.is_empty() {
            return Err(TalentError::InvalidQuery("'job_title' is required".into()));
        }
        if skills.is_empty() {
            return Err(TalentError::InvalidQuery("'skills' is required".into()));
        }
        Ok(Self {
            job_title: job_title.to_string(),
            skills: skills.to_string(),
        })
    }

    /// Query text, composed exactly like profile feature texts.
    pub fn text(&self) -> String {
        format!("{} {}", self.job_title, self.skills)
    }
}
