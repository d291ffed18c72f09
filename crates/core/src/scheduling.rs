//! # Booking Validation
//!
//! This module contains the pure validation logic for proposed appointments.
//! It checks a proposal against a trainer's recurring availability windows
//! and their existing bookings, and reports every violated rule at once.
//!
//! ## Validation Algorithm
//!
//! A proposal passes only when all three checks pass:
//!
//! 1. Availability: at least one window on the proposal's weekday fully
//!    contains the proposed time range
//! 2. Overlap: no existing non-cancelled appointment on the same calendar
//!    date shares any instant with the proposed range (half-open intervals)
//! 3. Minimum gap: every existing non-cancelled appointment on the same
//!    date keeps at least the configured idle buffer on both sides
//!
//! The checks are independent: an appointment that overlaps an existing one
//! typically also violates the gap rule, and both reasons are reported so a
//! caller can display the complete list of problems in one round trip.
//!
//! All timestamps are venue-local wall-clock values; no timezone conversion
//! happens here. The module performs no I/O and never returns early.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::appointment::AppointmentStatus;
use crate::models::availability::{AvailabilityWindow, DayOfWeek, WindowRequest};

/// A single violated booking rule.
///
/// Overlap and gap failures carry the existing appointment's time range so
/// the caller can show which booking caused the conflict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ConflictReason {
    /// No availability window on the proposal's weekday covers the range
    NotAvailable,
    /// The proposal shares time with an existing appointment
    Overlap {
        other_start: NaiveDateTime,
        other_end: NaiveDateTime,
    },
    /// The idle buffer before or after an existing appointment is too small
    InsufficientGap {
        other_start: NaiveDateTime,
        other_end: NaiveDateTime,
        gap_minutes: i64,
    },
}

/// The appointment being requested, before any record exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposedBooking {
    pub trainer_id: Uuid,
    pub starts_at: NaiveDateTime,
    pub duration_minutes: i64,
}

/// Read model of an existing appointment, as much as validation needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExistingAppointment {
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
    pub status: AppointmentStatus,
}

/// Site-level booking rules.
///
/// `open_when_unconfigured` decides what a trainer with zero windows means:
/// `false` (the default posture) treats them as never bookable, `true`
/// treats them as always bookable. This is an explicit policy switch
/// because the original admin and dashboard surfaces disagreed on it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BookingPolicy {
    pub min_gap_minutes: i64,
    pub open_when_unconfigured: bool,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            min_gap_minutes: 0,
            open_when_unconfigured: false,
        }
    }
}

/// Validates a proposed appointment against availability windows and
/// existing bookings.
///
/// Returns `Ok(())` when every rule passes, or the complete list of
/// violated rules. Cancelled appointments never contribute to conflicts,
/// and only appointments on the proposal's calendar date are considered.
///
/// Exactly-abutting appointments (`end == other.start`) pass the overlap
/// check but still fail the gap check when `min_gap_minutes > 0`.
pub fn validate_booking(
    proposed: &ProposedBooking,
    windows: &[AvailabilityWindow],
    existing: &[ExistingAppointment],
    policy: &BookingPolicy,
) -> Result<(), Vec<ConflictReason>> {
    let start = proposed.starts_at;
    let end = start + Duration::minutes(proposed.duration_minutes);
    let day = DayOfWeek::from_date(start.date());

    let mut reasons = Vec::new();

    // Availability check. A trainer with no windows at all is only bookable
    // under the open_when_unconfigured policy; a trainer with windows must
    // have one on this weekday that contains the whole range.
    let covered = if windows.is_empty() {
        policy.open_when_unconfigured
    } else {
        windows
            .iter()
            .filter(|w| w.day == day)
            .any(|w| w.start_time <= start.time() && w.end_time >= end.time())
    };

    if !covered {
        reasons.push(ConflictReason::NotAvailable);
    }

    let min_gap = Duration::minutes(policy.min_gap_minutes);

    for other in existing
        .iter()
        .filter(|a| a.status != AppointmentStatus::Cancelled)
        .filter(|a| a.starts_at.date() == start.date())
    {
        // Half-open interval overlap test
        let overlaps = !(end <= other.starts_at || start >= other.ends_at);
        if overlaps {
            reasons.push(ConflictReason::Overlap {
                other_start: other.starts_at,
                other_end: other.ends_at,
            });
        }

        if policy.min_gap_minutes > 0 {
            let lead = (other.starts_at - end).abs();
            let trail = (start - other.ends_at).abs();
            if lead < min_gap || trail < min_gap {
                reasons.push(ConflictReason::InsufficientGap {
                    other_start: other.starts_at,
                    other_end: other.ends_at,
                    gap_minutes: lead.min(trail).num_minutes(),
                });
            }
        }
    }

    if reasons.is_empty() { Ok(()) } else { Err(reasons) }
}

/// A problem in a proposed set of availability windows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum WindowIssue {
    /// start_time is not strictly before end_time
    InvalidRange { index: usize },
    /// Two windows on the same day share time
    Overlap { first: usize, second: usize },
}

/// Validates a full replacement set of windows for one trainer: each range
/// must be non-empty and same-day windows must not overlap. Overlap between
/// windows on different days is always fine.
pub fn validate_windows(windows: &[WindowRequest]) -> Result<(), Vec<WindowIssue>> {
    let mut issues = Vec::new();

    for (index, window) in windows.iter().enumerate() {
        if window.start_time >= window.end_time {
            issues.push(WindowIssue::InvalidRange { index });
        }
    }

    for (first, a) in windows.iter().enumerate() {
        for (second, b) in windows.iter().enumerate().skip(first + 1) {
            if a.day != b.day {
                continue;
            }
            let disjoint = a.end_time <= b.start_time || a.start_time >= b.end_time;
            if !disjoint {
                issues.push(WindowIssue::Overlap { first, second });
            }
        }
    }

    if issues.is_empty() { Ok(()) } else { Err(issues) }
}
