//! Match Scoring — deterministic rule-based scorer for one user against one job.
//!
//! Four signals, each in [0, 1], combined with fixed weights that sum to 1:
//! skill overlap, location, job type and experience level.
//! No I/O, no hidden state: identical inputs always yield identical output.

use std::collections::HashSet;

use serde::Serialize;

use crate::models::job::JobPosting;
use crate::models::user::UserProfile;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// Structured breakdown of why a score was produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchExplanation {
    /// Required skills the user has, in the job's order and spelling.
    pub matched_skills: Vec<String>,
    pub location_match: bool,
    pub job_type_match: bool,
    pub experience_match: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredRecommendation {
    pub job: JobPosting,
    pub score: f64, // 0.0 – 1.0
    pub explanation: MatchExplanation,
}

// ────────────────────────────────────────────────────────────────────────────
// Weights
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub skills: f64,
    pub location: f64,
    pub job_type: f64,
    pub experience: f64,
}

pub const WEIGHTS: ScoringWeights = ScoringWeights {
    skills: 0.5,
    location: 0.2,
    job_type: 0.15,
    experience: 0.15,
};

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

/// Scores `job` for `user`. Total over all inputs.
pub fn score(user: &UserProfile, job: &JobPosting) -> ScoredRecommendation {
    let (matched_skills, skill_overlap) = skill_overlap(&user.skills, &job.required_skills);

    let location_match = location_matches(
        user.preferred_location.as_deref(),
        job.location.as_deref(),
    );
    let job_type_match = exact_match(user.preferred_job_type.as_deref(), job.job_type.as_deref());
    let experience_match = exact_match(
        user.experience_level.as_deref(),
        job.experience_level.as_deref(),
    );

    let w = WEIGHTS;
    let score = (w.skills * skill_overlap
        + w.location * indicator(location_match)
        + w.job_type * indicator(job_type_match)
        + w.experience * indicator(experience_match))
    .clamp(0.0, 1.0);

    ScoredRecommendation {
        job: job.clone(),
        score,
        explanation: MatchExplanation {
            matched_skills,
            location_match,
            job_type_match,
            experience_match,
        },
    }
}

/// Returns the matched required skills and |user ∩ required| / |required|.
/// Blank and case-insensitive duplicate required skills are ignored; an empty
/// requirement list yields 0.
fn skill_overlap(user_skills: &[String], required_skills: &[String]) -> (Vec<String>, f64) {
    let user_set: HashSet<String> = user_skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    let mut seen = HashSet::new();
    let mut required_count = 0usize;
    let mut matched = Vec::new();

    for skill in required_skills {
        let key = skill.trim().to_lowercase();
        if key.is_empty() || !seen.insert(key.clone()) {
            continue;
        }
        required_count += 1;
        if user_set.contains(&key) {
            matched.push(skill.trim().to_string());
        }
    }

    if required_count == 0 {
        return (matched, 0.0);
    }
    let overlap = matched.len() as f64 / required_count as f64;
    (matched, overlap)
}

/// Unset or "any" on either side counts as a match.
fn location_matches(preferred: Option<&str>, location: Option<&str>) -> bool {
    if is_unset_or_any(preferred) || is_unset_or_any(location) {
        return true;
    }
    exact_match(preferred, location)
}

fn is_unset_or_any(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None => true,
        Some(v) => v.is_empty() || v.eq_ignore_ascii_case("any"),
    }
}

/// Case-insensitive equality; a missing or blank value never matches.
fn exact_match(a: Option<&str>, b: Option<&str>) -> bool {
    match (a.map(str::trim), b.map(str::trim)) {
        (Some(a), Some(b)) if !a.is_empty() && !b.is_empty() => a.to_lowercase() == b.to_lowercase(),
        _ => false,
    }
}

fn indicator(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
