#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use uspy_client::{ClientError, SubjectApi};
use uspy_model::{
    GradeStats, Requirement, Stats, Subject, SubjectInfo, SubjectKey, SubjectRelations,
    SubjectReview, UserGrade,
};
use uspy_view::{SubjectDetailView, SubjectState};

pub const COURSE: &str = "45052";
pub const SPECIALIZATION: &str = "0";

pub fn key(code: &str) -> SubjectKey {
    SubjectKey::new(COURSE, SPECIALIZATION, code)
}

pub fn subject(code: &str, total: u32, worth_it: u32) -> Subject {
    Subject {
        code: code.to_string(),
        name: format!("Disciplina {code}"),
        description: String::new(),
        class_credits: 4,
        assignment_credits: 0,
        hours: "60 h".to_string(),
        semester: 3,
        optional: false,
        requirements: vec![vec![Requirement {
            code: "SCC0216".to_string(),
            strong: true,
        }]],
        stats: Stats { total, worth_it },
    }
}

pub fn stats(view: &SubjectDetailView) -> Stats {
    match view.subject() {
        SubjectState::Ready(subject) => subject.stats,
        other => panic!("subject not ready: {other:?}"),
    }
}

/// In-memory [`SubjectApi`]. Anything not configured answers like the real
/// API would for an anonymous user.
#[derive(Default)]
pub struct FakeApi {
    subjects: Mutex<HashMap<String, Subject>>,
    reviews: Mutex<HashMap<String, SubjectReview>>,
    grades: Mutex<HashMap<String, GradeStats>>,
    user_grades: Mutex<HashMap<String, f64>>,
    relations: Mutex<HashMap<String, SubjectRelations>>,
    delays: Mutex<HashMap<String, Duration>>,
    logged_in: Mutex<bool>,
    submit_failure: Mutex<Option<u16>>,
    pub submitted: Mutex<Vec<(SubjectKey, SubjectReview)>>,
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_subject(&self, subject: Subject) -> &Self {
        self.subjects
            .lock()
            .unwrap()
            .insert(subject.code.clone(), subject);
        self
    }

    pub fn with_review(&self, code: &str, review: SubjectReview) -> &Self {
        self.reviews.lock().unwrap().insert(code.to_string(), review);
        self
    }

    pub fn with_grades(&self, code: &str, grades: GradeStats) -> &Self {
        self.grades.lock().unwrap().insert(code.to_string(), grades);
        self
    }

    pub fn with_user_grade(&self, code: &str, grade: f64) -> &Self {
        self.user_grades.lock().unwrap().insert(code.to_string(), grade);
        self
    }

    pub fn with_relations(&self, code: &str, pred: &[&str], succ: &[&str]) -> &Self {
        let infos = |codes: &[&str]| {
            codes
                .iter()
                .map(|c| SubjectInfo {
                    code: c.to_string(),
                    name: None,
                })
                .collect()
        };
        self.relations.lock().unwrap().insert(
            code.to_string(),
            SubjectRelations {
                predecessors: infos(pred),
                successors: infos(succ),
            },
        );
        self
    }

    /// Every request for `code` waits this long before answering
    pub fn with_delay(&self, code: &str, delay: Duration) -> &Self {
        self.delays.lock().unwrap().insert(code.to_string(), delay);
        self
    }

    pub fn logged_in(&self) -> &Self {
        *self.logged_in.lock().unwrap() = true;
        self
    }

    pub fn failing_submissions(&self, status: u16) -> &Self {
        *self.submit_failure.lock().unwrap() = Some(status);
        self
    }

    async fn wait(&self, key: &SubjectKey) {
        let delay = self.delays.lock().unwrap().get(&key.code).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn require_login(&self) -> Result<(), ClientError> {
        if *self.logged_in.lock().unwrap() {
            Ok(())
        } else {
            Err(ClientError::Unauthorized)
        }
    }
}

fn lookup<T: Clone>(map: &Mutex<HashMap<String, T>>, key: &SubjectKey) -> Result<T, ClientError> {
    map.lock()
        .unwrap()
        .get(&key.code)
        .cloned()
        .ok_or(ClientError::NotFound)
}

#[async_trait]
impl SubjectApi for FakeApi {
    async fn subject(&self, key: &SubjectKey) -> Result<Subject, ClientError> {
        self.wait(key).await;
        lookup(&self.subjects, key)
    }

    async fn subject_review(&self, key: &SubjectKey) -> Result<SubjectReview, ClientError> {
        self.wait(key).await;
        self.require_login()?;
        lookup(&self.reviews, key)
    }

    async fn submit_review(
        &self,
        key: &SubjectKey,
        review: &SubjectReview,
    ) -> Result<(), ClientError> {
        self.wait(key).await;
        self.require_login()?;

        if let Some(status) = *self.submit_failure.lock().unwrap() {
            return Err(ClientError::from_status(status));
        }

        self.submitted.lock().unwrap().push((key.clone(), *review));
        self.reviews
            .lock()
            .unwrap()
            .insert(key.code.clone(), *review);
        Ok(())
    }

    async fn subject_grades(&self, key: &SubjectKey) -> Result<GradeStats, ClientError> {
        self.wait(key).await;
        self.require_login()?;
        lookup(&self.grades, key)
    }

    async fn user_grade(&self, key: &SubjectKey) -> Result<UserGrade, ClientError> {
        self.wait(key).await;
        self.require_login()?;
        lookup(&self.user_grades, key).map(|grade| UserGrade { grade })
    }

    async fn subject_relations(&self, key: &SubjectKey) -> Result<SubjectRelations, ClientError> {
        self.wait(key).await;
        // The relations endpoint is flaky for unknown subjects
        self.relations
            .lock()
            .unwrap()
            .get(&key.code)
            .cloned()
            .ok_or(ClientError::Status(502))
    }
}
