//! Data model shared by the USPy client crates.
//!
//! Every type here mirrors a payload exchanged with the remote review API, so
//! field names follow the wire format (`worth_it`, `class`, `assign`, ...).

pub mod account;
pub mod subject;

pub use account::{AuthenticatedUser, Credentials, PasswordRedefinition};
pub use subject::{
    GradeStats, Requirement, ReviewCategories, Stats, Subject, SubjectInfo, SubjectKey,
    SubjectRelations, SubjectReview, UserGrade,
};
