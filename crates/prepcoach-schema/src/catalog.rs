//! Static question banks and reference material.
//! Loaded with the binary and never mutated.

use serde::Serialize;

use crate::{Category, Difficulty, Question, QuestionDetail};

pub const LEADERSHIP_PRINCIPLES: &[&str] = &[
    "Customer Obsession",
    "Ownership",
    "Invent and Simplify",
    "Are Right, A Lot",
    "Learn and Be Curious",
    "Hire and Develop the Best",
    "Insist on the Highest Standards",
    "Think Big",
    "Bias for Action",
    "Frugality",
    "Earn Trust",
    "Dive Deep",
    "Have Backbone; Disagree and Commit",
    "Deliver Results",
    "Strive to be Earth's Best Employer",
    "Success and Scale Bring Broad Responsibility",
];

pub const DSA_QUESTIONS: &[Question] = &[
    Question {
        id: 1,
        category: Category::Dsa,
        prompt_text: "Given an array of integers, find two numbers such that they add up to a specific target number. Return indices of the two numbers.",
        detail: QuestionDetail::Dsa {
            topic: "Arrays",
            difficulty: Difficulty::Medium,
            hints: &["Think about using a hash map", "What's the time complexity?"],
            expected_approach: "Hash map for O(n) solution",
        },
    },
    Question {
        id: 2,
        category: Category::Dsa,
        prompt_text: "Given a string s, find the longest palindromic substring in s. You may assume that the maximum length of s is 1000.",
        detail: QuestionDetail::Dsa {
            topic: "Dynamic Programming",
            difficulty: Difficulty::Hard,
            hints: &[
                "Consider expand around centers",
                "Think about Manacher's algorithm",
            ],
            expected_approach: "Expand around centers or dynamic programming",
        },
    },
    Question {
        id: 3,
        category: Category::Dsa,
        prompt_text: "Given a binary tree, determine if it is a valid binary search tree (BST).",
        detail: QuestionDetail::Dsa {
            topic: "Trees",
            difficulty: Difficulty::Medium,
            hints: &["In-order traversal should be sorted", "Think about bounds"],
            expected_approach: "In-order traversal or bounds checking",
        },
    },
];

pub const SYSTEM_DESIGN_QUESTIONS: &[Question] = &[
    Question {
        id: 1,
        category: Category::SystemDesign,
        prompt_text: "Design a URL shortening service like bit.ly",
        detail: QuestionDetail::SystemDesign {
            focus_areas: &["Scalability", "Database design", "Caching", "Load balancing"],
            key_components: &["URL encoding", "Database schema", "Cache layer", "Analytics"],
        },
    },
    Question {
        id: 2,
        category: Category::SystemDesign,
        prompt_text: "Design a chat system like WhatsApp",
        detail: QuestionDetail::SystemDesign {
            focus_areas: &[
                "Real-time messaging",
                "Message delivery",
                "Scalability",
                "Security",
            ],
            key_components: &[
                "WebSocket connections",
                "Message queuing",
                "Database design",
                "Push notifications",
            ],
        },
    },
    Question {
        id: 3,
        category: Category::SystemDesign,
        prompt_text: "Design Amazon's recommendation system",
        detail: QuestionDetail::SystemDesign {
            focus_areas: &[
                "Machine learning",
                "Big data processing",
                "Real-time updates",
                "Personalization",
            ],
            key_components: &[
                "Collaborative filtering",
                "Content-based filtering",
                "Real-time processing",
                "A/B testing",
            ],
        },
    },
];

pub const BEHAVIORAL_QUESTIONS: &[Question] = &[
    Question {
        id: 1,
        category: Category::Behavioral,
        prompt_text: "Tell me about a time when you had to make a decision between what was best for the customer and what was best for the business.",
        detail: QuestionDetail::Behavioral {
            principle: "Customer Obsession",
        },
    },
    Question {
        id: 2,
        category: Category::Behavioral,
        prompt_text: "Describe a situation where you took ownership of a problem that wasn't necessarily your responsibility.",
        detail: QuestionDetail::Behavioral {
            principle: "Ownership",
        },
    },
    Question {
        id: 3,
        category: Category::Behavioral,
        prompt_text: "Tell me about a time when you had to dig deep into data or details to solve a problem.",
        detail: QuestionDetail::Behavioral {
            principle: "Dive Deep",
        },
    },
    Question {
        id: 4,
        category: Category::Behavioral,
        prompt_text: "Give me an example of a time when you had to deliver results under a tight deadline.",
        detail: QuestionDetail::Behavioral {
            principle: "Deliver Results",
        },
    },
];

/// Canned prompts offered next to the coach chat.
pub const COACH_SUGGESTIONS: &[&str] = &[
    "How should I structure my system design answers?",
    "What are the most important Amazon Leadership Principles to focus on?",
    "How can I improve my coding interview performance?",
    "What are common mistakes in behavioral interviews?",
    "How should I prepare for the bar raiser round?",
];

/// Study recommendations listed under the progress stats.
pub const RECOMMENDATIONS: &[&str] = &[
    "Focus on dynamic programming problems - detected weakness in recent DSA sessions",
    "Practice more system design scalability questions",
    "Work on Leadership Principle: 'Dive Deep' - strengthen your examples",
    "Schedule a full mock interview session tomorrow",
];

#[derive(Debug, Clone, Serialize)]
pub struct ResourceLink {
    pub name: &'static str,
    pub url: &'static str,
}

pub const RESOURCE_LINKS: &[ResourceLink] = &[
    ResourceLink {
        name: "LeetCode",
        url: "https://leetcode.com/problemset/all/",
    },
    ResourceLink {
        name: "System Design Primer",
        url: "https://github.com/donnemartin/system-design-primer",
    },
    ResourceLink {
        name: "Grokking the System Design",
        url: "https://www.educative.io/courses/grokking-the-system-design-interview",
    },
    ResourceLink {
        name: "Amazon Leadership Principles",
        url: "https://www.amazon.jobs/en/principles",
    },
    ResourceLink {
        name: "Glassdoor Amazon Reviews",
        url: "https://www.glassdoor.com/Interview/Amazon-Interview-Questions-E6036.htm",
    },
];

pub const VIDEO_RESOURCES: &[&str] = &[
    "Amazon System Design Interview - Real Example",
    "Leadership Principles Deep Dive",
    "Coding Interview Strategies",
    "Behavioral Interview Best Practices",
];

pub const STUDY_GUIDE: &str = r#"## DSA Study Plan (3 days)
- Day 1: Arrays, Strings, Hash Maps (8 problems)
- Day 2: Trees, Graphs, Dynamic Programming (6 problems)
- Day 3: Review and mock interviews

## System Design Checklist
- [ ] Requirements gathering
- [ ] Capacity estimation
- [ ] High-level design
- [ ] Database design
- [ ] Detailed component design
- [ ] Scaling and optimization

## Leadership Principles Focus
- Customer Obsession: 2 stories prepared
- Ownership: 2 stories prepared
- Dive Deep: 1 technical deep-dive story
- Deliver Results: 1 challenging project story
"#;

/// Question bank for a category.
pub fn questions_for(category: Category) -> &'static [Question] {
    match category {
        Category::Dsa => DSA_QUESTIONS,
        Category::SystemDesign => SYSTEM_DESIGN_QUESTIONS,
        Category::Behavioral => BEHAVIORAL_QUESTIONS,
    }
}

/// Round-robin lookup: `index` wraps around the category's bank.
pub fn question_at(category: Category, index: usize) -> &'static Question {
    let bank = questions_for(category);
    &bank[index % bank.len()]
}
