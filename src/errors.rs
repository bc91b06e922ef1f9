//! Error types with diagnostics using miette
//!
//! Every layout fault is local and synchronous. Operations validate their
//! preconditions before touching any point, so an `Err` always means the
//! diagram was left exactly as it was.

use miette::Diagnostic;
use thiserror::Error;

use crate::types::{Align, Direction, NumericError};

/// Errors raised by layout operations
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("alignment `{alignment}` is not defined for a {direction}ward chain")]
    #[diagnostic(
        code(anchorage::layout::invalid_alignment),
        help("horizontal chains take bottom/middle/top, vertical chains take left/center/right")
    )]
    InvalidAlignment { alignment: Align, direction: Direction },

    #[error("cannot {operation}: {reason}")]
    #[diagnostic(code(anchorage::layout::invalid_operation))]
    InvalidOperation {
        operation: &'static str,
        reason: String,
    },

    #[error("cannot scale text by {factor}: {reason}")]
    #[diagnostic(
        code(anchorage::text::scaling),
        help("pick a factor whose target size is reachable on the font-size ladder")
    )]
    ScalingError { factor: f64, reason: String },

    #[error("{operation} is not supported for {kind}")]
    #[diagnostic(code(anchorage::layout::unsupported))]
    UnsupportedOperation {
        operation: &'static str,
        kind: &'static str,
    },

    #[error("invalid number: {0}")]
    #[diagnostic(code(anchorage::invalid_number))]
    InvalidNumber(#[from] NumericError),

    #[error("node {0} does not belong to this diagram")]
    #[diagnostic(code(anchorage::unknown_node))]
    UnknownNode(usize),
}

impl LayoutError {
    pub(crate) fn invalid_operation(operation: &'static str, reason: impl Into<String>) -> Self {
        LayoutError::InvalidOperation {
            operation,
            reason: reason.into(),
        }
    }

    pub(crate) fn scaling(factor: f64, reason: impl Into<String>) -> Self {
        LayoutError::ScalingError {
            factor,
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = LayoutError> = std::result::Result<T, E>;
