//! Operations consumed from the remote review API.
//!
//! The view layer is written against these traits so it can run over the HTTP
//! [`ApiClient`](crate::ApiClient) or any in-memory implementation.

use std::sync::Arc;

use async_trait::async_trait;
use uspy_model::{
    AuthenticatedUser, Credentials, GradeStats, Subject, SubjectKey, SubjectRelations,
    SubjectReview, UserGrade,
};

use crate::error::ClientError;

/// Subject data and reviews
#[async_trait]
pub trait SubjectApi: Send + Sync {
    /// Subject record. `NotFound` when the key does not exist.
    async fn subject(&self, key: &SubjectKey) -> Result<Subject, ClientError>;

    /// The requesting user's review. `NotFound` when they have not reviewed yet,
    /// `Unauthorized`/`Forbidden` when they may not review this subject.
    async fn subject_review(&self, key: &SubjectKey) -> Result<SubjectReview, ClientError>;

    /// Create or replace the requesting user's review.
    async fn submit_review(&self, key: &SubjectKey, review: &SubjectReview)
    -> Result<(), ClientError>;

    /// Grade distribution, only for authorized users.
    async fn subject_grades(&self, key: &SubjectKey) -> Result<GradeStats, ClientError>;

    /// The requesting user's own grade.
    async fn user_grade(&self, key: &SubjectKey) -> Result<UserGrade, ClientError>;

    /// Prerequisite neighbours.
    async fn subject_relations(&self, key: &SubjectKey) -> Result<SubjectRelations, ClientError>;
}

/// Session management
#[async_trait]
pub trait AccountApi: Send + Sync {
    /// Logged in user, or `None` when there is no valid session
    async fn current_user(&self) -> Result<Option<AuthenticatedUser>, ClientError>;

    async fn login(&self, credentials: &Credentials) -> Result<(), ClientError>;

    async fn logout(&self) -> Result<(), ClientError>;

    /// Ask the service to email a password redefinition link
    async fn request_password_reset(&self, email: &str) -> Result<(), ClientError>;
}

#[async_trait]
impl<T: SubjectApi + ?Sized> SubjectApi for Arc<T> {
    async fn subject(&self, key: &SubjectKey) -> Result<Subject, ClientError> {
        (**self).subject(key).await
    }

    async fn subject_review(&self, key: &SubjectKey) -> Result<SubjectReview, ClientError> {
        (**self).subject_review(key).await
    }

    async fn submit_review(
        &self,
        key: &SubjectKey,
        review: &SubjectReview,
    ) -> Result<(), ClientError> {
        (**self).submit_review(key, review).await
    }

    async fn subject_grades(&self, key: &SubjectKey) -> Result<GradeStats, ClientError> {
        (**self).subject_grades(key).await
    }

    async fn user_grade(&self, key: &SubjectKey) -> Result<UserGrade, ClientError> {
        (**self).user_grade(key).await
    }

    async fn subject_relations(&self, key: &SubjectKey) -> Result<SubjectRelations, ClientError> {
        (**self).subject_relations(key).await
    }
}
