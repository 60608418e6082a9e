//! Fetch drivers for [`SubjectDetailView`](crate::SubjectDetailView).
//!
//! Neither driver touches the view: they produce [`SliceUpdate`]s which the
//! owner feeds into [`SubjectDetailView::apply`](crate::SubjectDetailView::apply).

use std::{future::Future, sync::Arc};

use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};
use uspy_client::{ClientError, SubjectApi};
use uspy_model::{GradeStats, Subject, SubjectKey, SubjectRelations, SubjectReview, UserGrade};

use crate::{ticket::LoadTicket, view::PendingReview};

/// Outcome of one of the page's independent fetches
#[derive(Debug)]
pub enum Slice {
    Subject(Result<Subject, ClientError>),
    Review(Result<SubjectReview, ClientError>),
    Grades(Result<GradeStats, ClientError>),
    UserGrade(Result<UserGrade, ClientError>),
    Relations(Result<SubjectRelations, ClientError>),
}

impl Slice {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Subject(_) => "subject",
            Self::Review(_) => "review",
            Self::Grades(_) => "grades",
            Self::UserGrade(_) => "user_grade",
            Self::Relations(_) => "relations",
        }
    }
}

/// A fetch result tagged with the navigation it was issued for
#[derive(Debug)]
pub struct SliceUpdate {
    pub ticket: LoadTicket,
    pub slice: Slice,
}

/// Run every fetch concurrently and return all results once the slowest is done.
pub async fn fetch_all<A>(api: &A, ticket: &LoadTicket) -> Vec<SliceUpdate>
where
    A: SubjectApi + ?Sized,
{
    let key = ticket.key();

    let (subject, review, grades, user_grade, relations) = tokio::join!(
        api.subject(key),
        api.subject_review(key),
        api.subject_grades(key),
        api.user_grade(key),
        api.subject_relations(key),
    );

    [
        Slice::Subject(subject),
        Slice::Review(review),
        Slice::Grades(grades),
        Slice::UserGrade(user_grade),
        Slice::Relations(relations),
    ]
    .into_iter()
    .map(|slice| SliceUpdate {
        ticket: ticket.clone(),
        slice,
    })
    .collect()
}

/// Spawn one task per fetch. Updates are delivered in completion order; the
/// channel closes once every fetch has reported.
pub fn spawn_fetches<A>(api: Arc<A>, ticket: LoadTicket) -> UnboundedReceiver<SliceUpdate>
where
    A: SubjectApi + ?Sized + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();

    spawn_slice(&api, &ticket, &tx, |api, key| async move {
        Slice::Subject(api.subject(&key).await)
    });
    spawn_slice(&api, &ticket, &tx, |api, key| async move {
        Slice::Review(api.subject_review(&key).await)
    });
    spawn_slice(&api, &ticket, &tx, |api, key| async move {
        Slice::Grades(api.subject_grades(&key).await)
    });
    spawn_slice(&api, &ticket, &tx, |api, key| async move {
        Slice::UserGrade(api.user_grade(&key).await)
    });
    spawn_slice(&api, &ticket, &tx, |api, key| async move {
        Slice::Relations(api.subject_relations(&key).await)
    });

    rx
}

fn spawn_slice<A, F, Fut>(
    api: &Arc<A>,
    ticket: &LoadTicket,
    tx: &UnboundedSender<SliceUpdate>,
    fetch: F,
) where
    A: SubjectApi + ?Sized + 'static,
    F: FnOnce(Arc<A>, SubjectKey) -> Fut + Send + 'static,
    Fut: Future<Output = Slice> + Send + 'static,
{
    let api = Arc::clone(api);
    let ticket = ticket.clone();
    let tx = tx.clone();

    tokio::spawn(async move {
        let slice = fetch(api, ticket.key().clone()).await;
        if tx.send(SliceUpdate { ticket, slice }).is_err() {
            tracing::trace!("view dropped before fetch completed");
        }
    });
}

/// Send a pending review in the background.
///
/// The handle yields the pending review back together with the outcome, ready
/// for [`SubjectDetailView::complete_review`](crate::SubjectDetailView::complete_review).
pub fn spawn_submission<A>(
    api: Arc<A>,
    pending: PendingReview,
) -> JoinHandle<(PendingReview, Result<(), ClientError>)>
where
    A: SubjectApi + ?Sized + 'static,
{
    tokio::spawn(async move {
        let result = api
            .submit_review(pending.ticket().key(), pending.review())
            .await;
        (pending, result)
    })
}
