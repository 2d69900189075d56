use prepcoach_schema::Category;
use serde::{Deserialize, Serialize};

/// Structured answer as collected by the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum AnswerPayload {
    Dsa {
        language: String,
        code: String,
        explanation: String,
    },
    SystemDesign {
        requirements: String,
        high_level: String,
        database: String,
        deep_dive: String,
    },
    /// STAR-structured behavioral answer.
    Behavioral {
        situation: String,
        task: String,
        action: String,
        result: String,
    },
    Freeform {
        for_category: Category,
        text: String,
    },
}

impl AnswerPayload {
    pub fn category(&self) -> Category {
        match self {
            Self::Dsa { .. } => Category::Dsa,
            Self::SystemDesign { .. } => Category::SystemDesign,
            Self::Behavioral { .. } => Category::Behavioral,
            Self::Freeform { for_category, .. } => *for_category,
        }
    }

    /// Answer text sent to the evaluator, verbatim and untruncated.
    pub fn render(&self) -> String {
        match self {
            Self::Dsa {
                code, explanation, ..
            } => format!("Code:\n{code}\n\nExplanation:\n{explanation}"),
            Self::SystemDesign {
                requirements,
                high_level,
                database,
                deep_dive,
            } => format!(
                "Requirements: {requirements}\nHigh-level: {high_level}\nDatabase: {database}\nDeep dive: {deep_dive}"
            ),
            Self::Behavioral {
                situation,
                task,
                action,
                result,
            } => format!("Situation: {situation}\nTask: {task}\nAction: {action}\nResult: {result}"),
            Self::Freeform { text, .. } => text.clone(),
        }
    }

    /// Names of required fields left blank. The session never calls this;
    /// front ends use it before submitting.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let fields: Vec<(&'static str, &str)> = match self {
            Self::Dsa {
                code, explanation, ..
            } => vec![("code", code.as_str()), ("explanation", explanation.as_str())],
            Self::SystemDesign {
                requirements,
                high_level,
                database,
                deep_dive,
            } => vec![
                ("requirements", requirements.as_str()),
                ("high_level", high_level.as_str()),
                ("database", database.as_str()),
                ("deep_dive", deep_dive.as_str()),
            ],
            Self::Behavioral {
                situation,
                task,
                action,
                result,
            } => vec![
                ("situation", situation.as_str()),
                ("task", task.as_str()),
                ("action", action.as_str()),
                ("result", result.as_str()),
            ],
            Self::Freeform { text, .. } => vec![("text", text.as_str())],
        };
        fields
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}
