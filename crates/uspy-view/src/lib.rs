//! View state for the USPy subject page.
//!
//! [`SubjectDetailView`] owns everything the subject page displays. Data
//! arrives as [`SliceUpdate`]s tagged with the [`LoadTicket`] of the navigation
//! that requested them; updates for an older navigation are dropped, so a slow
//! response for a previous subject can never overwrite the current one.

pub mod error;
pub mod graph;
pub mod loader;
pub mod messages;
pub mod page;
pub mod routes;
pub mod ticket;
pub mod view;

pub use error::{InvariantViolation, ReviewError, SubjectLoadError};
pub use graph::{GraphPanel, RequirementsGraph};
pub use loader::{Slice, SliceUpdate, fetch_all, spawn_fetches, spawn_submission};
pub use page::{ChartPanel, PageBody, SubjectPage};
pub use ticket::LoadTicket;
pub use view::{GradesState, PendingReview, RelationsState, SubjectDetailView, SubjectState};
