use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Relative contribution of each sub-score to the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub keyword: f64,
    pub formatting: f64,
    pub experience: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            keyword: 0.5,
            formatting: 0.2,
            experience: 0.3,
        }
    }
}

/// A formatting band: average paragraph length strictly below `max_avg_paragraph_chars`
/// scores `score`. Bands are checked in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormattingBand {
    pub max_avg_paragraph_chars: f64,
    pub score: f64,
}

/// Every weight, fallback and threshold the scoring engine uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub weights: ScoringWeights,
    /// Keyword score when no job description is supplied.
    pub keyword_without_job: f64,
    /// Keyword score when the job lists no required or preferred skills.
    pub keyword_without_job_skills: f64,
    /// Formatting score when the resume has no parsed text.
    pub formatting_without_text: f64,
    pub formatting_bands: Vec<FormattingBand>,
    /// Formatting score when the average paragraph exceeds every band.
    pub formatting_floor: f64,
    /// Experience score when no job description is supplied.
    pub experience_without_job: f64,
    /// Experience score when the job's canonical text has no tokens.
    pub experience_without_job_text: f64,
    /// Sub-scores strictly below this trigger a recommendation.
    pub recommendation_threshold: f64,
    /// Decimal places kept on ratio-based sub-scores.
    pub precision: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            keyword_without_job: 0.5,
            keyword_without_job_skills: 0.6,
            formatting_without_text: 0.3,
            formatting_bands: vec![
                FormattingBand {
                    max_avg_paragraph_chars: 400.0,
                    score: 0.8,
                },
                FormattingBand {
                    max_avg_paragraph_chars: 800.0,
                    score: 0.6,
                },
            ],
            formatting_floor: 0.4,
            experience_without_job: 0.5,
            experience_without_job_text: 0.55,
            recommendation_threshold: 0.6,
            precision: 4,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ScoringConfigError {
    #[error("scoring weight '{0}' must be between 0 and 1, got {1}")]
    WeightOutOfRange(&'static str, f64),

    #[error("scoring weights must sum to 1.0, got {0}")]
    WeightsDoNotSum(f64),

    #[error("score '{0}' must be between 0 and 1, got {1}")]
    ScoreOutOfRange(&'static str, f64),

    #[error("formatting bands must be in ascending order")]
    UnorderedBands,
}

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

impl ScoringConfig {
    /// Checks that every produced score stays within [0, 1].
    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        let ScoringWeights {
            keyword,
            formatting,
            experience,
        } = self.weights;
        for (name, w) in [
            ("keyword", keyword),
            ("formatting", formatting),
            ("experience", experience),
        ] {
            if !(0.0..=1.0).contains(&w) {
                return Err(ScoringConfigError::WeightOutOfRange(name, w));
            }
        }
        let sum = keyword + formatting + experience;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ScoringConfigError::WeightsDoNotSum(sum));
        }

        let mut scores = vec![
            ("keyword_without_job", self.keyword_without_job),
            ("keyword_without_job_skills", self.keyword_without_job_skills),
            ("formatting_without_text", self.formatting_without_text),
            ("formatting_floor", self.formatting_floor),
            ("experience_without_job", self.experience_without_job),
            ("experience_without_job_text", self.experience_without_job_text),
            ("recommendation_threshold", self.recommendation_threshold),
        ];
        scores.extend(self.formatting_bands.iter().map(|b| ("formatting_band", b.score)));
        for (name, s) in scores {
            if !(0.0..=1.0).contains(&s) {
                return Err(ScoringConfigError::ScoreOutOfRange(name, s));
            }
        }

        let ordered = self
            .formatting_bands
            .windows(2)
            .all(|w| w[0].max_avg_paragraph_chars < w[1].max_avg_paragraph_chars);
        if !ordered {
            return Err(ScoringConfigError::UnorderedBands);
        }
        Ok(())
    }
}
