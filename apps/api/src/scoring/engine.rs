//! Resume scoring engine: pure, deterministic heuristics over a resume and an
//! optional job description.
//!
//! Sub-scores:
//! - keyword match: share of the job's skills found among resume keywords
//! - formatting: average paragraph length as a scannability proxy
//! - experience alignment: clipped multiset overlap of whitespace tokens
//!
//! The overall score is their weighted sum. No I/O happens here.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use uuid::Uuid;

use crate::models::{JobDescription, Resume, ScoreCard};
use crate::scoring::weights::ScoringConfig;

pub const KEYWORD_RECOMMENDATION: &str = "Add more role-specific keywords to improve match.";
pub const FORMATTING_RECOMMENDATION: &str =
    "Simplify formatting and ensure consistent section spacing.";
pub const EXPERIENCE_RECOMMENDATION: &str =
    "Highlight achievements aligned with the job description.";
pub const WELL_OPTIMIZED_MESSAGE: &str = "Resume is well-optimized for the selected job.";

// ────────────────────────────────────────────────────────────────────────────
// Engine
// ────────────────────────────────────────────────────────────────────────────

/// The three sub-scores before weighting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScores {
    pub keyword: f64,
    pub formatting: f64,
    pub experience: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Scores `resume` against `job`, producing a fresh score card.
    pub fn score(&self, resume: &Resume, job: Option<&JobDescription>) -> ScoreCard {
        let sub = self.sub_scores(resume, job);
        let overall = self.overall(&sub);

        ScoreCard {
            id: Uuid::new_v4(),
            resume_id: resume.id,
            job_description_id: job.and_then(|j| j.id),
            ats_score: overall,
            keyword_match: sub.keyword,
            formatting_score: sub.formatting,
            overall_score: overall,
            recommendations: self.recommendations(&sub),
            generated_at: Utc::now(),
        }
    }

    pub fn sub_scores(&self, resume: &Resume, job: Option<&JobDescription>) -> SubScores {
        SubScores {
            keyword: self.keyword_score(resume, job),
            formatting: self.formatting_score(resume),
            experience: self.experience_score(resume, job),
        }
    }

    pub fn keyword_score(&self, resume: &Resume, job: Option<&JobDescription>) -> f64 {
        let Some(job) = job else {
            return self.config.keyword_without_job;
        };

        let job_keywords: HashSet<String> = job
            .required_skills
            .iter()
            .chain(job.preferred_skills.iter())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_lowercase())
            .collect();
        if job_keywords.is_empty() {
            return self.config.keyword_without_job_skills;
        }

        let resume_keywords: HashSet<String> = resume
            .extracted_keywords
            .iter()
            .map(|k| k.to_lowercase())
            .collect();
        let overlap = resume_keywords.intersection(&job_keywords).count();

        self.round(overlap as f64 / job_keywords.len() as f64)
    }

    pub fn formatting_score(&self, resume: &Resume) -> f64 {
        let text = match resume.parsed_text.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => return self.config.formatting_without_text,
        };

        let characters = text.chars().count() as f64;
        let paragraphs = text.matches("\n\n").count().max(1) as f64;
        let avg_paragraph = characters / paragraphs;

        self.config
            .formatting_bands
            .iter()
            .find(|band| avg_paragraph < band.max_avg_paragraph_chars)
            .map(|band| band.score)
            .unwrap_or(self.config.formatting_floor)
    }

    pub fn experience_score(&self, resume: &Resume, job: Option<&JobDescription>) -> f64 {
        let Some(job) = job else {
            return self.config.experience_without_job;
        };

        let role_terms = term_counts(job.canonical_text.as_deref().unwrap_or(""));
        if role_terms.is_empty() {
            return self.config.experience_without_job_text;
        }
        let resume_terms = term_counts(resume.parsed_text.as_deref().unwrap_or(""));

        let overlap: usize = role_terms
            .iter()
            .map(|(token, &count)| count.min(resume_terms.get(token).copied().unwrap_or(0)))
            .sum();
        let max_possible: usize = role_terms.values().sum();

        self.round(overlap as f64 / max_possible as f64)
    }

    pub fn overall(&self, sub: &SubScores) -> f64 {
        let w = &self.config.weights;
        sub.keyword * w.keyword + sub.formatting * w.formatting + sub.experience * w.experience
    }

    /// Canned advice, one line per weak sub-score, in fixed order.
    pub fn recommendations(&self, sub: &SubScores) -> Vec<String> {
        let threshold = self.config.recommendation_threshold;
        let mut recommendations: Vec<String> = [
            (sub.keyword, KEYWORD_RECOMMENDATION),
            (sub.formatting, FORMATTING_RECOMMENDATION),
            (sub.experience, EXPERIENCE_RECOMMENDATION),
        ]
        .into_iter()
        .filter(|(score, _)| *score < threshold)
        .map(|(_, message)| message.to_string())
        .collect();

        if recommendations.is_empty() {
            recommendations.push(WELL_OPTIMIZED_MESSAGE.to_string());
        }
        recommendations
    }

    fn round(&self, value: f64) -> f64 {
        round_to(value, self.config.precision as usize)
    }
}

/// Rounds the exact binary value to `places` decimals, ties to even.
pub(crate) fn round_to(value: f64, places: usize) -> f64 {
    format!("{value:.places$}").parse().unwrap_or(value)
}

/// Lower-cased whitespace tokens with their frequencies.
fn term_counts(text: &str) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for word in text.split_whitespace() {
        *counts.entry(word.to_lowercase()).or_insert(0) += 1;
    }
    counts
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::weights::ScoringWeights;

    fn make_resume(parsed_text: Option<&str>, keywords: &[&str]) -> Resume {
        Resume {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            file_url: "https://files.example.com/resume.pdf".to_string(),
            parsed_text: parsed_text.map(String::from),
            extracted_skills: vec![],
            extracted_keywords: keywords.iter().map(|k| k.to_string()).collect(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn make_job(required: &[&str], preferred: &[&str], text: Option<&str>) -> JobDescription {
        JobDescription {
            required_skills: required.iter().map(|s| s.to_string()).collect(),
            preferred_skills: preferred.iter().map(|s| s.to_string()).collect(),
            canonical_text: text.map(String::from),
            ..JobDescription::new("Backend Engineer")
        }
    }

    fn engine() -> ScoringEngine {
        ScoringEngine::default()
    }

    #[test]
    fn test_keyword_match_is_case_insensitive_ratio() {
        let resume = make_resume(None, &["python", "sql"]);
        let job = make_job(&["Python", "AWS"], &["SQL"], None);
        assert_eq!(engine().keyword_score(&resume, Some(&job)), 0.6667);
    }

    #[test]
    fn test_keyword_without_job_is_half() {
        let resume = make_resume(None, &["rust"]);
        assert_eq!(engine().keyword_score(&resume, None), 0.5);
    }

    #[test]
    fn test_keyword_with_empty_job_skills() {
        let resume = make_resume(None, &["rust"]);
        let job = make_job(&[], &[""], Some("Build services in Rust"));
        assert_eq!(engine().keyword_score(&resume, Some(&job)), 0.6);
    }

    #[test]
    fn test_duplicate_job_skills_count_once() {
        let resume = make_resume(None, &["Rust"]);
        let job = make_job(&["rust", "RUST"], &["Go"], None);
        assert_eq!(engine().keyword_score(&resume, Some(&job)), 0.5);
    }

    #[test]
    fn test_formatting_without_text() {
        assert_eq!(engine().formatting_score(&make_resume(None, &[])), 0.3);
        assert_eq!(engine().formatting_score(&make_resume(Some(""), &[])), 0.3);
    }

    #[test]
    fn test_formatting_bands() {
        let short = "a".repeat(399);
        assert_eq!(engine().formatting_score(&make_resume(Some(&short), &[])), 0.8);

        let medium = "a".repeat(400);
        assert_eq!(engine().formatting_score(&make_resume(Some(&medium), &[])), 0.6);

        let long = "a".repeat(800);
        assert_eq!(engine().formatting_score(&make_resume(Some(&long), &[])), 0.4);
    }

    #[test]
    fn test_formatting_divides_by_paragraph_breaks() {
        // 3 paragraphs of 300 chars plus two "\n\n" breaks: 904 chars / 2 breaks = 452
        let text = format!(
            "{}\n\n{}\n\n{}",
            "a".repeat(300),
            "b".repeat(300),
            "c".repeat(300)
        );
        assert_eq!(engine().formatting_score(&make_resume(Some(&text), &[])), 0.6);
    }

    #[test]
    fn test_formatting_counts_characters_not_bytes() {
        // 399 two-byte characters stay in the top band
        let text = "é".repeat(399);
        assert_eq!(engine().formatting_score(&make_resume(Some(&text), &[])), 0.8);
    }

    #[test]
    fn test_experience_without_job() {
        let resume = make_resume(Some("Rust engineer"), &[]);
        assert_eq!(engine().experience_score(&resume, None), 0.5);
    }

    #[test]
    fn test_experience_with_empty_job_text() {
        let resume = make_resume(Some("Rust engineer"), &[]);
        let job = make_job(&["rust"], &[], Some("   \n "));
        assert_eq!(engine().experience_score(&resume, Some(&job)), 0.55);
        let job = make_job(&["rust"], &[], None);
        assert_eq!(engine().experience_score(&resume, Some(&job)), 0.55);
    }

    #[test]
    fn test_experience_clips_repeated_terms() {
        // job: rust x2, services x1 → max 3; resume: rust x1, services x3 → 1 + 1
        let resume = make_resume(Some("Rust services services SERVICES"), &[]);
        let job = make_job(&[], &[], Some("rust Rust services"));
        assert_eq!(engine().experience_score(&resume, Some(&job)), 0.6667);
    }

    #[test]
    fn test_experience_without_resume_text_is_zero() {
        let resume = make_resume(None, &[]);
        let job = make_job(&[], &[], Some("distributed systems"));
        assert_eq!(engine().experience_score(&resume, Some(&job)), 0.0);
    }

    #[test]
    fn test_no_text_no_job_scores_046() {
        let card = engine().score(&make_resume(None, &[]), None);
        assert_eq!(card.keyword_match, 0.5);
        assert_eq!(card.formatting_score, 0.3);
        assert!((card.overall_score - 0.46).abs() < 1e-9, "got {}", card.overall_score);
        assert_eq!(
            card.recommendations,
            vec![
                KEYWORD_RECOMMENDATION.to_string(),
                FORMATTING_RECOMMENDATION.to_string(),
                EXPERIENCE_RECOMMENDATION.to_string(),
            ]
        );
    }

    #[test]
    fn test_overall_without_job_depends_only_on_formatting() {
        let resume = make_resume(Some("short paragraph"), &[]);
        let card = engine().score(&resume, None);
        let expected = 0.4 + card.formatting_score * 0.2;
        assert!((card.overall_score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_ats_score_equals_overall() {
        let resume = make_resume(Some("Rust and SQL"), &["rust"]);
        let job = make_job(&["Rust"], &["Kafka"], Some("Rust SQL Kafka"));
        let card = engine().score(&resume, Some(&job));
        assert_eq!(card.ats_score, card.overall_score);
    }

    #[test]
    fn test_well_optimized_only_when_all_pass() {
        let text = "rust sql kafka";
        let resume = make_resume(Some(text), &["rust", "sql", "kafka"]);
        let job = make_job(&["Rust", "SQL"], &["Kafka"], Some(text));
        let card = engine().score(&resume, Some(&job));
        assert_eq!(card.keyword_match, 1.0);
        assert_eq!(card.formatting_score, 0.8);
        assert_eq!(card.recommendations, vec![WELL_OPTIMIZED_MESSAGE.to_string()]);
        assert!((card.overall_score - 0.96).abs() < 1e-9);
    }

    #[test]
    fn test_threshold_is_strict() {
        let sub = SubScores {
            keyword: 0.6,
            formatting: 0.6,
            experience: 0.5999,
        };
        assert_eq!(
            engine().recommendations(&sub),
            vec![EXPERIENCE_RECOMMENDATION.to_string()]
        );
    }

    #[test]
    fn test_scores_bounded_zero_to_one() {
        let resumes = [
            make_resume(None, &[]),
            make_resume(Some("x"), &["a", "b", "c"]),
            make_resume(Some(&"word ".repeat(500)), &["word"]),
        ];
        let jobs = [
            None,
            Some(make_job(&[], &[], None)),
            Some(make_job(&["A", "z"], &["b"], Some("word word other"))),
        ];
        for resume in &resumes {
            for job in &jobs {
                let card = engine().score(resume, job.as_ref());
                for s in [card.keyword_match, card.formatting_score, card.overall_score] {
                    assert!((0.0..=1.0).contains(&s), "score {s} out of range");
                }
            }
        }
    }

    #[test]
    fn test_card_carries_identities() {
        let resume = make_resume(None, &[]);
        let job = JobDescription {
            id: Some(Uuid::new_v4()),
            ..make_job(&[], &[], None)
        };
        let card = engine().score(&resume, Some(&job));
        assert_eq!(card.resume_id, resume.id);
        assert_eq!(card.job_description_id, job.id);
        assert!(engine().score(&resume, None).job_description_id.is_none());
    }

    #[test]
    fn test_custom_weights_apply() {
        let engine = ScoringEngine::new(ScoringConfig {
            weights: ScoringWeights {
                keyword: 1.0,
                formatting: 0.0,
                experience: 0.0,
            },
            ..ScoringConfig::default()
        });
        let card = engine.score(&make_resume(None, &[]), None);
        assert_eq!(card.overall_score, 0.5);
    }

    #[test]
    fn test_ratio_ties_round_to_even() {
        let skills: Vec<String> = (0..32).map(|i| format!("s{i}")).collect();
        let refs: Vec<&str> = skills.iter().map(String::as_str).collect();
        let job = make_job(&refs, &[], None);
        let resume = make_resume(None, &["s0"]);
        assert_eq!(engine().keyword_score(&resume, Some(&job)), 0.0312);
    }

    #[test]
    fn test_round_to_places() {
        assert_eq!(round_to(2.0 / 3.0, 4), 0.6667);
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.135, 2), 0.14);
        assert_eq!(round_to(1.0, 4), 1.0);
    }
}
