use thiserror::Error;

use crate::schema::FrameKind;
use crate::wire::FormatError;

/// Errors surfaced by container and frame accessors.
///
/// `Record` concerns one frame only; its siblings stay readable. The other
/// variants are caller mistakes and never leave the container in a
/// different state.
#[derive(Debug, Error)]
pub enum ContainerError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("frame {index} is malformed: {source}")]
    Record {
        index: usize,
        #[source]
        source: FormatError,
    },

    #[error("frame index {index} out of range (container holds {count} frames)")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("frame {index} is {actual}, not {expected}")]
    VariantMismatch {
        index: usize,
        expected: FrameKind,
        actual: FrameKind,
    },
}

impl ContainerError {
    /// Index of the frame the error concerns, if any.
    pub fn index(&self) -> Option<usize> {
        match self {
            ContainerError::Record { index, .. }
            | ContainerError::IndexOutOfRange { index, .. }
            | ContainerError::VariantMismatch { index, .. } => Some(*index),
            ContainerError::Format(_) => None,
        }
    }

    /// Underlying wire failure, for `Format` and `Record`.
    pub fn format_error(&self) -> Option<&FormatError> {
        match self {
            ContainerError::Format(e) | ContainerError::Record { source: e, .. } => Some(e),
            _ => None,
        }
    }
}
