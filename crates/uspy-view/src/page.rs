//! Display model of the subject page, derived from [`SubjectDetailView`].

use std::cmp::Ordering;

use uspy_model::{GradeStats, Subject, SubjectKey};
use uspy_review::{ReviewChoice, format_approval, format_grade, stats_rate};

use crate::{
    error::InvariantViolation,
    graph::GraphPanel,
    messages,
    routes::{self, Breadcrumb, LoginRedirect},
    view::{GradesState, SubjectDetailView, SubjectState},
};

/// Everything below the breadcrumbs
#[derive(Debug, Clone, PartialEq)]
pub enum PageBody {
    Loading,
    Message(String),
    Content(Box<SubjectPage>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubjectPage {
    /// `CODE - name`
    pub title: String,
    pub description: String,
    pub credits: [CreditIndicator; 2],
    pub info: Vec<InfoLine>,
    pub evaluation: EvaluationCard,
    pub chart: ChartPanel,
    pub graph: GraphPanel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreditIndicator {
    pub title: &'static str,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoLine {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationCard {
    pub header: &'static str,
    /// Whether the `S`/`N` control is offered
    pub can_evaluate: bool,
    pub chosen: Option<ReviewChoice>,
    pub rate: u32,
    pub recommendation: String,
    pub total: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradeBar {
    /// Grade as sent by the API
    pub grade: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradeChart {
    /// Ordered by numeric grade
    pub bars: Vec<GradeBar>,
    pub average: f64,
    pub your_grade: Option<f64>,
    pub approval_text: String,
    pub average_text: String,
    pub your_grade_text: Option<String>,
}

/// Grade distribution area
#[derive(Debug, Clone, PartialEq)]
pub enum ChartPanel {
    Loading,
    Chart(GradeChart),
    NotEnoughData {
        message: &'static str,
    },
    LoginPrompt {
        message: &'static str,
        action_title: &'static str,
        redirect: LoginRedirect,
    },
}

impl ChartPanel {
    pub fn from_state(key: &SubjectKey, grades: &GradesState, your_grade: Option<f64>) -> Self {
        match grades {
            GradesState::Pending => Self::Loading,
            GradesState::LoginRequired => Self::LoginPrompt {
                message: messages::LOGIN_REQUIRED,
                action_title: messages::LOGIN_ACTION,
                redirect: LoginRedirect::to_subject(key),
            },
            GradesState::Visible(stats) if !stats.has_data() => Self::NotEnoughData {
                message: messages::NOT_ENOUGH_DATA,
            },
            GradesState::Visible(stats) => Self::Chart(GradeChart::new(stats, your_grade)),
        }
    }
}

impl GradeChart {
    fn new(stats: &GradeStats, your_grade: Option<f64>) -> Self {
        let mut bars: Vec<GradeBar> = stats
            .grades
            .iter()
            .map(|(grade, count)| GradeBar {
                grade: grade.clone(),
                count: *count,
            })
            .collect();
        bars.sort_by(|a, b| compare_grades(&a.grade, &b.grade));

        // A zero grade is treated as "no grade"
        let your_grade = your_grade.filter(|grade| *grade != 0.0);

        Self {
            bars,
            average: stats.average,
            your_grade,
            approval_text: format!("Taxa de Aprovação: {}", format_approval(stats.approval)),
            average_text: format!("Média: {}", format_grade(stats.average)),
            your_grade_text: your_grade.map(|grade| format!("Sua nota: {}", format_grade(grade))),
        }
    }
}

// Numeric keys first, in numeric order; anything unparsable after them.
fn compare_grades(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
        (Ok(x), Ok(y)) => x.total_cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Codes of the first requirement group, or "Nenhum"
pub fn requirements_summary(subject: &Subject) -> Result<String, InvariantViolation> {
    let Some(first) = subject.requirements.first() else {
        return Ok(messages::NO_REQUIREMENTS.to_string());
    };

    if first.is_empty() {
        return Err(InvariantViolation::EmptyRequirementGroup(subject.code.clone()));
    }

    Ok(first
        .iter()
        .map(|req| req.code.as_str())
        .collect::<Vec<_>>()
        .join(", "))
}

impl SubjectDetailView {
    /// Build the page for the current state.
    ///
    /// Fails only if the subject record breaks the requirement group invariant.
    pub fn page(&self) -> Result<PageBody, InvariantViolation> {
        let subject = match self.subject() {
            SubjectState::Loading => return Ok(PageBody::Loading),
            SubjectState::Failed(err) => return Ok(PageBody::Message(messages::subject_error(err))),
            SubjectState::Ready(subject) => subject,
        };

        let requirements = requirements_summary(subject).inspect_err(|e| {
            tracing::error!(key = %self.key(), error = %e, "invalid subject record");
        })?;

        let key = self.key();
        let kind = if subject.optional {
            messages::OPTIONAL_SUBJECT
        } else {
            messages::MANDATORY_SUBJECT
        };

        let info = vec![
            InfoLine {
                label: "Tipo",
                value: kind.to_string(),
            },
            InfoLine {
                label: "Curso",
                value: format!("{}/{}", key.course, key.specialization),
            },
            InfoLine {
                label: "Semestre",
                value: format!("{}°", subject.semester),
            },
            InfoLine {
                label: "Requisitos",
                value: requirements,
            },
            InfoLine {
                label: "Carga horária",
                value: subject.hours.clone(),
            },
        ];

        let rate = stats_rate(&subject.stats);
        let evaluation = EvaluationCard {
            header: if self.can_evaluate() {
                messages::EVALUATE_HEADER
            } else {
                messages::ABOUT_HEADER
            },
            can_evaluate: self.can_evaluate(),
            chosen: self.review().map(ReviewChoice::from_review),
            rate,
            recommendation: messages::recommendation(rate),
            total: messages::review_total(subject.stats.total),
        };

        Ok(PageBody::Content(Box::new(SubjectPage {
            title: format!("{} - {}", subject.code, subject.name),
            description: subject.description.clone(),
            credits: [
                CreditIndicator {
                    title: "CA",
                    value: subject.class_credits,
                },
                CreditIndicator {
                    title: "CT",
                    value: subject.assignment_credits,
                },
            ],
            info,
            evaluation,
            chart: ChartPanel::from_state(key, self.grades(), self.user_grade()),
            graph: GraphPanel::from_state(&key.code, self.relations()),
        })))
    }

    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        routes::breadcrumbs(self.key())
    }
}
