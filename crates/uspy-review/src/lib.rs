//! Review arithmetic for USPy
//!
//! This crate holds the pure computations behind the subject review card:
//! the recommendation rate and the optimistic update of the aggregate
//! counters when the user submits or changes a review.
//!
//! The optimistic update is a display approximation. It is never reconciled
//! with the counters stored by the remote service; reloading the subject is
//! the only way to see the authoritative numbers.

use std::fmt;

use uspy_model::{Stats, SubjectReview};

/// The two answers of the "worth it?" question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewChoice {
    /// "S" (sim)
    Yes,
    /// "N" (não)
    No,
}

impl ReviewChoice {
    pub const ALL: [Self; 2] = [Self::Yes, Self::No];

    /// Letter shown next to the radio option
    pub const fn letter(self) -> char {
        match self {
            Self::Yes => 'S',
            Self::No => 'N',
        }
    }

    /// Parse a user answer. Accepts the display letters and yes/no words.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "s" | "sim" | "y" | "yes" | "true" => Some(Self::Yes),
            "n" | "nao" | "não" | "no" | "false" => Some(Self::No),
            _ => None,
        }
    }

    pub const fn review(self) -> SubjectReview {
        SubjectReview::new(matches!(self, Self::Yes))
    }

    pub const fn from_review(review: &SubjectReview) -> Self {
        if review.worth_it() {
            Self::Yes
        } else {
            Self::No
        }
    }
}

impl fmt::Display for ReviewChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Percentage of reviewers who say the subject is worth it.
///
/// # Arguments
///
/// * `worth_it` - Number of positive reviews
/// * `total` - Number of reviews
///
/// # Returns
///
/// `round(100 * worth_it / total)` as an integer in `[0, 100]`, or `0` when
/// there are no reviews. Halves round up.
pub fn recommendation_rate(worth_it: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }

    let worth_it = u64::from(worth_it.min(total));
    let total = u64::from(total);

    // round(100 * w / t) == floor((200 * w + t) / (2 * t))
    ((200 * worth_it + total) / (2 * total)) as u32
}

/// Recommendation rate of a [`Stats`] record
pub fn stats_rate(stats: &Stats) -> u32 {
    recommendation_rate(stats.worth_it, stats.total)
}

/// Remove one review's contribution from the counters.
///
/// Saturates at zero and keeps `worth_it <= total`.
pub fn remove_review(stats: Stats, review: &SubjectReview) -> Stats {
    let total = stats.total.saturating_sub(1);
    let worth_it = if review.worth_it() {
        stats.worth_it.saturating_sub(1)
    } else {
        stats.worth_it
    };

    Stats {
        total,
        worth_it: worth_it.min(total),
    }
}

/// Add one review's contribution to the counters.
pub fn add_review(stats: Stats, review: &SubjectReview) -> Stats {
    Stats {
        total: stats.total.saturating_add(1),
        worth_it: stats.worth_it.saturating_add(u32::from(review.worth_it())),
    }
}

/// Compute the counters after the user submits `next`.
///
/// # Arguments
///
/// * `stats` - Counters currently displayed
/// * `previous` - The user's earlier review of this subject, if any
/// * `next` - The review being submitted
///
/// # Returns
///
/// The updated counters. The previous review is removed before the new one is
/// added, so the total grows by at most one per user:
///
/// * no previous review, "yes": total +1, worth_it +1
/// * previous "yes", now "no": total unchanged, worth_it -1
/// * previous "yes", now "yes": unchanged
pub fn apply_review(stats: Stats, previous: Option<&SubjectReview>, next: &SubjectReview) -> Stats {
    let base = match previous {
        Some(review) => remove_review(stats, review),
        None => stats,
    };

    add_review(base, next)
}

/// Approval rate (`0.0..=1.0`) rendered as a percentage with one decimal place
pub fn format_approval(approval: f64) -> String {
    format!("{:.1}%", approval * 100.0)
}

/// Grade rendered with one decimal place
pub fn format_grade(grade: f64) -> String {
    format!("{grade:.1}")
}
