// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Reasons a draft is refused on submission.
///
/// Both are recoverable: the form stays in editing state with the draft intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The title is empty after trimming; the title field should be marked invalid.
    #[error("the title is required")]
    MissingTitle,

    /// The end is not strictly after the start; a blocking error dialog should be shown.
    #[error("the end must be after the start")]
    InvalidDateRange,

    /// The form was cancelled; its draft is discarded and can no longer be submitted.
    #[error("the form was cancelled")]
    Cancelled,
}

/// Errors raised by the calendar store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("event not found: {0}")]
    EventNotFound(String),
}
