//! Error types for list views

use crate::status::{ViewEvent, ViewStatus};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("Page size must be greater than zero")]
    ZeroPageSize,

    #[error("Invalid view transition: {event:?} while {from:?}")]
    InvalidTransition { from: ViewStatus, event: ViewEvent },
}
