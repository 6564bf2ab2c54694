//! Per-owner analytics over stored resumes and their score cards.

pub mod handlers;

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Resume, ScoreCard};
use crate::scoring::engine::round_to;
use crate::store::{ResumeStore, ScoreCardStore, StoreResult};

const TOP_KEYWORDS: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordFrequency {
    pub keyword: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreTrendPoint {
    pub date: DateTime<Utc>,
    pub average_score: f64,
    pub submissions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub total_resumes: usize,
    pub average_score: f64,
    pub keywords: Vec<KeywordFrequency>,
    pub score_trends: Vec<ScoreTrendPoint>,
}

/// Loads an owner's resumes and score cards and summarises them.
pub async fn summary_for_owner(
    resumes: &dyn ResumeStore,
    score_cards: &dyn ScoreCardStore,
    owner_id: Uuid,
) -> StoreResult<AnalyticsSummary> {
    let owned = resumes.list_for_owner(owner_id).await?;
    let ids: Vec<Uuid> = owned.iter().map(|r| r.id).collect();
    let cards = score_cards.list_for_resumes(&ids).await?;
    Ok(summarize(&owned, &cards))
}

pub fn summarize(resumes: &[Resume], cards: &[ScoreCard]) -> AnalyticsSummary {
    AnalyticsSummary {
        total_resumes: resumes.len(),
        average_score: mean_overall(cards.iter()).map(round2).unwrap_or(0.0),
        keywords: top_keywords(resumes, TOP_KEYWORDS),
        score_trends: score_trends(cards),
    }
}

/// Most frequent extracted keywords; ties broken alphabetically.
fn top_keywords(resumes: &[Resume], limit: usize) -> Vec<KeywordFrequency> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for keyword in resumes.iter().flat_map(|r| r.extracted_keywords.iter()) {
        *counts.entry(keyword.as_str()).or_insert(0) += 1;
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(limit)
        .map(|(keyword, count)| KeywordFrequency {
            keyword: keyword.to_string(),
            count,
        })
        .collect()
}

/// Daily (UTC) average overall score, oldest day first.
fn score_trends(cards: &[ScoreCard]) -> Vec<ScoreTrendPoint> {
    let mut buckets: BTreeMap<NaiveDate, Vec<&ScoreCard>> = BTreeMap::new();
    for card in cards {
        buckets
            .entry(card.generated_at.date_naive())
            .or_default()
            .push(card);
    }

    buckets
        .into_iter()
        .map(|(day, day_cards)| ScoreTrendPoint {
            date: day.and_time(chrono::NaiveTime::MIN).and_utc(),
            average_score: mean_overall(day_cards.iter().copied())
                .map(round2)
                .unwrap_or(0.0),
            submissions: day_cards.len(),
        })
        .collect()
}

fn mean_overall<'a>(cards: impl Iterator<Item = &'a ScoreCard>) -> Option<f64> {
    let (sum, n) = cards.fold((0.0, 0usize), |(sum, n), c| (sum + c.overall_score, n + 1));
    (n > 0).then(|| sum / n as f64)
}

fn round2(value: f64) -> f64 {
    round_to(value, 2)
}
