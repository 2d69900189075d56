use console::{style, Emoji, Term};
use prepcoach_core::{InterviewSession, Submission};
use prepcoach_schema::{
    questions_for, Category, Question, QuestionDetail, COACH_SUGGESTIONS, LEADERSHIP_PRINCIPLES,
    RECOMMENDATIONS, RESOURCE_LINKS, STUDY_GUIDE, VIDEO_RESOURCES,
};

pub static CHECKMARK: Emoji<'_, '_> = Emoji("✅ ", "√ ");
pub static CHART: Emoji<'_, '_> = Emoji("📈 ", "");
pub static TARGET: Emoji<'_, '_> = Emoji("🎯 ", "* ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "");
pub static ARROW: Emoji<'_, '_> = Emoji("➜  ", "-> ");

pub fn print_logo(term: &Term) {
    let logo = r#"
  ┌──────────────────────────────┐
  │   prepcoach  interview prep   │
  └──────────────────────────────┘
"#;
    let _ = term.write_line(&format!("{}", style(logo).cyan()));
}

pub fn print_done(term: &Term, msg: &str) {
    let _ = term.write_line(&format!("{} {}", CHECKMARK, style(msg).green()));
}

pub fn print_help(term: &Term) {
    let lines = [
        ("/question <dsa|sd|beh>", "get a new mock interview question"),
        ("/submit", "answer the active question"),
        ("/progress", "show scores and study time"),
        ("/suggest", "list suggested coach questions"),
        ("/ask <n>", "send suggested question n to the coach"),
        ("/resources", "curated links and study guide"),
        ("/new", "start a fresh session"),
        ("/quit", "leave"),
    ];
    let _ = term.write_line(&format!("{}", style("Commands").bold()));
    for (cmd, desc) in lines {
        let _ = term.write_line(&format!("  {:<24} {}", style(cmd).cyan(), desc));
    }
    let _ = term.write_line("  anything else is sent to the AI coach");
}

pub fn render_question_card(term: &Term, question: &Question) {
    let _ = term.write_line("");
    let _ = term.write_line(&format!(
        "{}{}",
        TARGET,
        style(question.heading()).bold().yellow()
    ));
    match &question.detail {
        QuestionDetail::Dsa { hints, .. } => {
            let _ = term.write_line(&format!("Question: {}", question.prompt_text));
            let _ = term.write_line(&format!("Hints: {}", hints.join(", ")));
        }
        QuestionDetail::SystemDesign {
            focus_areas,
            key_components,
        } => {
            let _ = term.write_line(&format!("Focus Areas: {}", focus_areas.join(", ")));
            let _ = term.write_line(&format!("Key Components: {}", key_components.join(", ")));
        }
        QuestionDetail::Behavioral { .. } => {
            let _ = term.write_line(&format!("Question: {}", question.prompt_text));
            let _ = term.write_line(
                "Structure your answer using the STAR method: Situation, Task, Action, Result",
            );
        }
    }
    let _ = term.write_line("");
}

/// Banner shown above the feedback text.
pub fn feedback_banner(category: Category, score: u8, positive: bool) -> String {
    let headline = match (category, positive) {
        (Category::Dsa, true) => "Great Job!",
        (Category::Dsa, false) => "Room for Improvement -",
        (Category::SystemDesign, true) => "Excellent Design!",
        (Category::SystemDesign, false) => "Areas to Improve -",
        (Category::Behavioral, true) => "Strong STAR Response!",
        (Category::Behavioral, false) => "Strengthen Your STAR -",
    };
    format!("{headline} Score: {score}/10")
}

pub fn render_submission(term: &Term, submission: &Submission) {
    let result = &submission.result;
    let banner = feedback_banner(submission.category, result.score, result.is_positive());
    let _ = term.write_line("");
    if result.is_positive() {
        let _ = term.write_line(&format!("{}{}", CHECKMARK, style(banner).green().bold()));
    } else {
        let _ = term.write_line(&format!("{}{}", CHART, style(banner).red().bold()));
    }
    let _ = term.write_line(&result.feedback_text);
    let _ = term.write_line(&format!(
        "{}",
        style(format!(
            "time on question: {}m {}s",
            submission.elapsed.num_minutes(),
            submission.elapsed.num_seconds() % 60
        ))
        .dim()
    ));
    let _ = term.write_line("");
}

pub fn render_coach_reply(term: &Term, reply: &str) {
    let _ = term.write_line(&format!("{} {reply}", style("AI Coach:").bold().magenta()));
}

pub fn render_progress(term: &Term, session: &InterviewSession) {
    let ledger = session.ledger();
    let _ = term.write_line("");
    let _ = term.write_line(&format!(
        "{}{}",
        CHART,
        style(format!("Progress for session {}", session.session_id())).bold()
    ));
    let _ = term.write_line(&format!(
        "{}",
        style(format!(
            "started {}",
            session
                .started_at()
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
        ))
        .dim()
    ));

    if ledger.is_empty() {
        let _ = term.write_line("Complete some mock interviews to see your progress here!");
        return;
    }

    let summaries = ledger.summary();
    for category in Category::ALL {
        let Some(summary) = summaries.iter().find(|s| s.category == category) else {
            let _ = term.write_line(&format!("  {:<15} no data", category.display_name()));
            continue;
        };
        let trend = ledger
            .trend(category)
            .iter()
            .map(|p| format!("{}@{}", p.score, p.timestamp.format("%H:%M:%S")))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = term.write_line(&format!(
            "  {:<15} {:.1}/10 ({:+.1})",
            category.display_name(),
            summary.average,
            summary.delta_from_baseline
        ));
        let _ = term.write_line(&format!(
            "    {}{} answers, best {}, latest {}: {}",
            ARROW,
            summary.count,
            summary.best,
            summary.latest,
            style(trend).dim()
        ));
    }

    let study = session.total_study_time();
    let _ = term.write_line(&format!(
        "  submissions: {}   study time: {}h {}m",
        ledger.total_submissions(),
        study.num_hours(),
        study.num_minutes() % 60
    ));
    let _ = term.write_line("");
    let _ = term.write_line(&format!(
        "{}{}",
        TARGET,
        style("Personalized Recommendations").bold()
    ));
    for recommendation in RECOMMENDATIONS {
        let _ = term.write_line(&format!("  - {recommendation}"));
    }
    let _ = term.write_line("");
}

pub fn render_suggestions(term: &Term) {
    let _ = term.write_line(&format!("{}", style("Suggested Questions").bold()));
    for (i, suggestion) in COACH_SUGGESTIONS.iter().enumerate() {
        let _ = term.write_line(&format!("  {}. {}", i + 1, suggestion));
    }
}

pub fn render_catalog(term: &Term, categories: &[Category]) {
    for &category in categories {
        let _ = term.write_line(&format!(
            "{}",
            style(format!("{} ({})", category.display_name(), category.slug())).bold()
        ));
        for question in questions_for(category) {
            let _ = term.write_line(&format!(
                "  #{:<2} {:<26} {}",
                question.id,
                question.heading_short(),
                question.prompt_text
            ));
        }
        let _ = term.write_line("");
    }
}

pub fn render_principles(term: &Term) {
    let _ = term.write_line(&format!("{}", style("Leadership Principles").bold()));
    for principle in LEADERSHIP_PRINCIPLES {
        let _ = term.write_line(&format!("  - {principle}"));
    }
}

pub fn render_resources(term: &Term) {
    let _ = term.write_line(&format!(
        "{}{}",
        ROCKET,
        style("Essential Preparation Links").bold()
    ));
    for link in RESOURCE_LINKS {
        let _ = term.write_line(&format!("  {:<30} {}", link.name, style(link.url).underlined()));
    }
    let _ = term.write_line("");
    let _ = term.write_line(&format!("{}", style("Study Guides").bold()));
    let _ = term.write_line(STUDY_GUIDE);
    let _ = term.write_line(&format!("{}", style("Recommended Videos").bold()));
    for video in VIDEO_RESOURCES {
        let _ = term.write_line(&format!("  - {video}"));
    }
}

trait HeadingShort {
    fn heading_short(&self) -> String;
}

impl HeadingShort for Question {
    fn heading_short(&self) -> String {
        match &self.detail {
            QuestionDetail::SystemDesign { focus_areas, .. } => {
                focus_areas.first().copied().unwrap_or_default().to_string()
            }
            _ => self.heading(),
        }
    }
}
