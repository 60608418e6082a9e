use std::sync::Arc;

use tokio::sync::mpsc::UnboundedReceiver;
use uspy_client::{ClientError, SubjectApi};
use uspy_model::{GradeStats, Stats, Subject, SubjectKey, SubjectRelations, SubjectReview};
use uspy_review::{ReviewChoice, apply_review};

use crate::{
    error::{ReviewError, SubjectLoadError},
    loader::{self, Slice, SliceUpdate},
    ticket::LoadTicket,
};

/// Subject record slice
#[derive(Debug, Clone, PartialEq)]
pub enum SubjectState {
    Loading,
    Ready(Subject),
    Failed(SubjectLoadError),
}

/// Grade statistics slice
#[derive(Debug, Clone, PartialEq)]
pub enum GradesState {
    Pending,
    Visible(GradeStats),
    /// The grades request was refused; the page offers a login instead
    LoginRequired,
}

/// Prerequisite relations slice
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationsState {
    Loading,
    Ready(SubjectRelations),
    /// Fetch failed; displayed like a subject without relations
    Unavailable,
}

/// A review applied optimistically and not yet confirmed by the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReview {
    ticket: LoadTicket,
    sequence: u64,
    review: SubjectReview,
    /// Counters right after this review was applied
    applied_stats: Stats,
}

impl PendingReview {
    pub const fn ticket(&self) -> &LoadTicket {
        &self.ticket
    }

    pub const fn review(&self) -> &SubjectReview {
        &self.review
    }
}

/// Review state the API is known to hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ReviewSnapshot {
    stats: Stats,
    review: Option<SubjectReview>,
}

/// Bookkeeping while at least one submitted review has not been answered
#[derive(Debug)]
struct Unconfirmed {
    /// Last confirmed state, initially the one before the first pending review
    baseline: ReviewSnapshot,
    /// Sequence of the submission that produced `baseline`, 0 if none did
    baseline_sequence: u64,
    outstanding: usize,
    /// The newest review failed and the view shows `baseline`
    latest_failed: bool,
}

/// State of the subject page
#[derive(Debug)]
pub struct SubjectDetailView {
    key: SubjectKey,
    generation: u64,
    review_sequence: u64,
    unconfirmed: Option<Unconfirmed>,
    subject: SubjectState,
    review: Option<SubjectReview>,
    can_evaluate: bool,
    grades: GradesState,
    user_grade: Option<f64>,
    relations: RelationsState,
}

impl SubjectDetailView {
    /// A view for `key` with every slice in its initial state. Use
    /// [`ticket`](Self::ticket) to start loading it.
    pub const fn new(key: SubjectKey) -> Self {
        Self {
            key,
            generation: 0,
            review_sequence: 0,
            unconfirmed: None,
            subject: SubjectState::Loading,
            review: None,
            can_evaluate: false,
            grades: GradesState::Pending,
            user_grade: None,
            relations: RelationsState::Loading,
        }
    }

    /// Ticket of the current navigation
    pub fn ticket(&self) -> LoadTicket {
        LoadTicket::new(self.key.clone(), self.generation)
    }

    /// Switch to another subject (or reload the same one).
    ///
    /// Every slice is reset and results for earlier tickets will be ignored.
    pub fn navigate(&mut self, key: SubjectKey) -> LoadTicket {
        let generation = self.generation + 1;
        tracing::debug!(%key, generation, "navigating to subject");

        *self = Self {
            generation,
            review_sequence: self.review_sequence,
            ..Self::new(key)
        };

        self.ticket()
    }

    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.generation() == self.generation && *ticket.key() == self.key
    }

    /// Store one fetch result. Returns `false` if it belonged to an earlier
    /// navigation and was discarded.
    pub fn apply(&mut self, update: SliceUpdate) -> bool {
        if !self.is_current(&update.ticket) {
            tracing::debug!(
                slice = update.slice.name(),
                stale_key = %update.ticket.key(),
                stale_generation = update.ticket.generation(),
                current_generation = self.generation,
                "discarding stale response"
            );
            return false;
        }

        match update.slice {
            Slice::Subject(Ok(subject)) => self.subject = SubjectState::Ready(subject),
            Slice::Subject(Err(e)) => {
                tracing::warn!(key = %self.key, error = %e, "failed to load subject");
                self.subject = SubjectState::Failed(SubjectLoadError::from(&e));
            }
            Slice::Review(Ok(review)) => {
                self.review = Some(review);
                self.can_evaluate = true;
            }
            // Not reviewed yet
            Slice::Review(Err(ClientError::NotFound)) => {
                self.review = None;
                self.can_evaluate = true;
            }
            Slice::Review(Err(e)) => {
                tracing::debug!(key = %self.key, error = %e, "review disabled");
                self.can_evaluate = false;
            }
            Slice::Grades(Ok(grades)) => self.grades = GradesState::Visible(grades),
            Slice::Grades(Err(e)) => {
                tracing::debug!(key = %self.key, error = %e, "grades unavailable");
                self.grades = GradesState::LoginRequired;
            }
            Slice::UserGrade(Ok(grade)) => self.user_grade = Some(grade.grade),
            Slice::UserGrade(Err(e)) => {
                tracing::debug!(key = %self.key, error = %e, "no personal grade");
            }
            Slice::Relations(Ok(relations)) => {
                self.relations = RelationsState::Ready(relations);
            }
            Slice::Relations(Err(e)) => {
                tracing::warn!(key = %self.key, error = %e, "failed to load relations");
                self.relations = RelationsState::Unavailable;
            }
        }

        true
    }

    /// Apply a batch of updates, returning how many were accepted
    pub fn apply_all(&mut self, updates: impl IntoIterator<Item = SliceUpdate>) -> usize {
        let mut accepted = 0;
        for update in updates {
            if self.apply(update) {
                accepted += 1;
            }
        }
        accepted
    }

    /// Fetch everything for the current ticket and apply it
    pub async fn load<A>(&mut self, api: &A)
    where
        A: SubjectApi + ?Sized,
    {
        let ticket = self.ticket();
        let updates = loader::fetch_all(api, &ticket).await;
        self.apply_all(updates);
    }

    /// Start every fetch for the current ticket in the background. Feed the
    /// received updates to [`apply`](Self::apply) as they arrive.
    pub fn spawn_load<A>(&self, api: Arc<A>) -> UnboundedReceiver<SliceUpdate>
    where
        A: SubjectApi + ?Sized + 'static,
    {
        loader::spawn_fetches(api, self.ticket())
    }

    /// Record the user's answer and update the counters immediately.
    ///
    /// The counters stay optimistic until [`complete_review`](Self::complete_review)
    /// is called with the API's answer; they are never re-fetched.
    pub fn select_review(&mut self, choice: ReviewChoice) -> Result<PendingReview, ReviewError> {
        let SubjectState::Ready(subject) = &mut self.subject else {
            return Err(ReviewError::NotLoaded);
        };

        if !self.can_evaluate {
            return Err(ReviewError::NotAllowed);
        }

        let review = choice.review();
        let before = ReviewSnapshot {
            stats: subject.stats,
            review: self.review,
        };
        subject.stats = apply_review(before.stats, before.review.as_ref(), &review);
        self.review = Some(review);

        let unconfirmed = self.unconfirmed.get_or_insert(Unconfirmed {
            baseline: before,
            baseline_sequence: 0,
            outstanding: 0,
            latest_failed: false,
        });
        unconfirmed.outstanding += 1;
        unconfirmed.latest_failed = false;

        self.review_sequence += 1;
        tracing::debug!(
            key = %self.key,
            choice = %choice,
            total = subject.stats.total,
            worth_it = subject.stats.worth_it,
            "review applied optimistically"
        );

        Ok(PendingReview {
            ticket: LoadTicket::new(self.key.clone(), self.generation),
            sequence: self.review_sequence,
            review,
            applied_stats: subject.stats,
        })
    }

    /// Settle a pending review with the API's answer.
    ///
    /// When the newest review fails the view goes back to the last state the
    /// API confirmed, skipping every earlier review that was never stored.
    /// Answers for an older navigation leave the view alone.
    pub fn complete_review(
        &mut self,
        pending: PendingReview,
        result: Result<(), ClientError>,
    ) -> Result<(), ReviewError> {
        let latest = pending.sequence == self.review_sequence;
        let current = self.is_current(&pending.ticket);
        let unconfirmed = match &mut self.unconfirmed {
            Some(unconfirmed) if current => unconfirmed,
            _ => {
                tracing::debug!(
                    key = %pending.ticket.key(),
                    "review answer for an older navigation"
                );
                return result.map_err(ReviewError::Submission);
            }
        };
        unconfirmed.outstanding = unconfirmed.outstanding.saturating_sub(1);

        let restore = match &result {
            Ok(()) => {
                tracing::debug!(key = %self.key, sequence = pending.sequence, "review confirmed");
                if pending.sequence > unconfirmed.baseline_sequence {
                    unconfirmed.baseline = ReviewSnapshot {
                        stats: pending.applied_stats,
                        review: Some(pending.review),
                    };
                    unconfirmed.baseline_sequence = pending.sequence;
                }
                // A newer review already failed, so this one is what the API holds
                unconfirmed.latest_failed.then_some(unconfirmed.baseline)
            }
            Err(e) if latest => {
                tracing::warn!(key = %self.key, error = %e, "review rejected, rolled back");
                unconfirmed.latest_failed = true;
                Some(unconfirmed.baseline)
            }
            Err(e) => {
                tracing::warn!(
                    key = %self.key,
                    error = %e,
                    "review rejected after it was superseded"
                );
                None
            }
        };

        if unconfirmed.outstanding == 0 {
            self.unconfirmed = None;
        }

        if let Some(snapshot) = restore {
            if let SubjectState::Ready(subject) = &mut self.subject {
                subject.stats = snapshot.stats;
            }
            self.review = snapshot.review;
        }

        result.map_err(ReviewError::Submission)
    }

    /// Select, submit and settle a review in one go
    pub async fn submit_review<A>(
        &mut self,
        api: &A,
        choice: ReviewChoice,
    ) -> Result<(), ReviewError>
    where
        A: SubjectApi + ?Sized,
    {
        let pending = self.select_review(choice)?;
        let result = api
            .submit_review(pending.ticket.key(), &pending.review)
            .await;
        self.complete_review(pending, result)
    }

    pub const fn key(&self) -> &SubjectKey {
        &self.key
    }

    pub const fn subject(&self) -> &SubjectState {
        &self.subject
    }

    pub const fn review(&self) -> Option<&SubjectReview> {
        self.review.as_ref()
    }

    /// Whether the review control is offered
    pub const fn can_evaluate(&self) -> bool {
        self.can_evaluate
    }

    pub const fn grades(&self) -> &GradesState {
        &self.grades
    }

    pub const fn user_grade(&self) -> Option<f64> {
        self.user_grade
    }

    pub const fn relations(&self) -> &RelationsState {
        &self.relations
    }

    /// True until the subject record has arrived or failed
    pub const fn is_loading(&self) -> bool {
        matches!(self.subject, SubjectState::Loading)
    }
}
