use chrono::{DateTime, Utc};
use prepcoach_schema::{Category, EvaluationResult, DEFAULT_SCORE};
use serde::Serialize;

/// Append-only record of evaluated submissions.
///
/// Each category keeps its own sequence; `timestamps` is a global log with
/// one entry per submission of any category. No length relation between the
/// two is maintained.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PerformanceLedger {
    dsa: Vec<EvaluationResult>,
    system_design: Vec<EvaluationResult>,
    behavioral: Vec<EvaluationResult>,
    timestamps: Vec<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryAverages {
    pub dsa: Option<f64>,
    pub system_design: Option<f64>,
    pub behavioral: Option<f64>,
}

impl CategoryAverages {
    pub fn get(&self, category: Category) -> Option<f64> {
        match category {
            Category::Dsa => self.dsa,
            Category::SystemDesign => self.system_design,
            Category::Behavioral => self.behavioral,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub category: Category,
    pub count: usize,
    pub average: f64,
    /// Average minus the neutral score.
    pub delta_from_baseline: f64,
    pub best: u8,
    pub latest: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    pub score: u8,
    pub timestamp: DateTime<Utc>,
}

impl PerformanceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, category: Category, result: EvaluationResult) {
        self.timestamps.push(result.timestamp);
        self.bucket_mut(category).push(result);
    }

    pub fn results(&self, category: Category) -> &[EvaluationResult] {
        match category {
            Category::Dsa => &self.dsa,
            Category::SystemDesign => &self.system_design,
            Category::Behavioral => &self.behavioral,
        }
    }

    pub fn scores(&self, category: Category) -> Vec<u8> {
        self.results(category).iter().map(|r| r.score).collect()
    }

    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    pub fn total_submissions(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Mean score, `None` when the category has no submissions.
    pub fn average(&self, category: Category) -> Option<f64> {
        let results = self.results(category);
        if results.is_empty() {
            return None;
        }
        let total: u32 = results.iter().map(|r| u32::from(r.score)).sum();
        Some(f64::from(total) / results.len() as f64)
    }

    pub fn compute_averages(&self) -> CategoryAverages {
        CategoryAverages {
            dsa: self.average(Category::Dsa),
            system_design: self.average(Category::SystemDesign),
            behavioral: self.average(Category::Behavioral),
        }
    }

    /// Per-category summaries, skipping categories with no data.
    pub fn summary(&self) -> Vec<CategorySummary> {
        Category::ALL
            .into_iter()
            .filter_map(|category| {
                let results = self.results(category);
                let average = self.average(category)?;
                let best = results.iter().map(|r| r.score).max()?;
                let latest = results.last()?.score;
                Some(CategorySummary {
                    category,
                    count: results.len(),
                    average,
                    delta_from_baseline: average - f64::from(DEFAULT_SCORE),
                    best,
                    latest,
                })
            })
            .collect()
    }

    /// Score progression for one category, oldest first.
    pub fn trend(&self, category: Category) -> Vec<TrendPoint> {
        self.results(category)
            .iter()
            .map(|r| TrendPoint {
                score: r.score,
                timestamp: r.timestamp,
            })
            .collect()
    }

    fn bucket_mut(&mut self, category: Category) -> &mut Vec<EvaluationResult> {
        match category {
            Category::Dsa => &mut self.dsa,
            Category::SystemDesign => &mut self.system_design,
            Category::Behavioral => &mut self.behavioral,
        }
    }
}
