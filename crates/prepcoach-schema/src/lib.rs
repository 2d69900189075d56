pub mod catalog;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use catalog::*;

/// Score reported when the completion text carries no parseable score.
pub const DEFAULT_SCORE: u8 = 5;

/// Upper bound of the scoring scale.
pub const MAX_SCORE: u8 = 10;

/// Scores at or above this value are shown as positive feedback.
pub const POSITIVE_SCORE_THRESHOLD: u8 = 7;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Dsa,
    SystemDesign,
    Behavioral,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Dsa, Category::SystemDesign, Category::Behavioral];

    /// Name embedded in evaluation prompts and shown to the user.
    pub fn display_name(self) -> &'static str {
        match self {
            Category::Dsa => "DSA",
            Category::SystemDesign => "System Design",
            Category::Behavioral => "Behavioral",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Category::Dsa => "dsa",
            Category::SystemDesign => "system-design",
            Category::Behavioral => "behavioral",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dsa" | "coding" => Ok(Category::Dsa),
            "system-design" | "system_design" | "systemdesign" | "sd" => {
                Ok(Category::SystemDesign)
            }
            "behavioral" | "behavioural" | "beh" | "lp" => Ok(Category::Behavioral),
            other => Err(anyhow::anyhow!(
                "unknown category: {other} (expected dsa, system-design or behavioral)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Difficulty {
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(label)
    }
}

/// Category-specific metadata attached to a catalog question.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestionDetail {
    Dsa {
        topic: &'static str,
        difficulty: Difficulty,
        hints: &'static [&'static str],
        expected_approach: &'static str,
    },
    SystemDesign {
        focus_areas: &'static [&'static str],
        key_components: &'static [&'static str],
    },
    Behavioral {
        principle: &'static str,
    },
}

/// A read-only catalog entry.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Question {
    pub id: u32,
    pub category: Category,
    pub prompt_text: &'static str,
    pub detail: QuestionDetail,
}

impl Question {
    /// One-line heading used by the question card.
    pub fn heading(&self) -> String {
        match &self.detail {
            QuestionDetail::Dsa {
                topic, difficulty, ..
            } => format!("{topic} - {difficulty}"),
            QuestionDetail::SystemDesign { .. } => self.prompt_text.to_string(),
            QuestionDetail::Behavioral { principle } => (*principle).to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatTurn {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Score and feedback for one submitted answer. Never edited after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvaluationResult {
    pub score: u8,
    /// Full completion text, including the `Score:` line.
    pub feedback_text: String,
    pub timestamp: DateTime<Utc>,
}

impl EvaluationResult {
    pub fn is_positive(&self) -> bool {
        self.score >= POSITIVE_SCORE_THRESHOLD
    }
}
