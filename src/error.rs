//! Error type shared by every container.
//!
//! Only checked index access and allocation report errors. Duplicate
//! values and keys are not errors, and precondition violations (empty
//! pops, cursor misuse, zero buckets) are handled outside this type.

use core::alloc::Layout;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContainerError {
    /// Checked access beyond the live elements.
    #[error("index out of range: index {index} is beyond length {len}")]
    OutOfRange { index: usize, len: usize },

    /// The requested capacity does not fit in `isize::MAX` bytes.
    #[error("capacity overflow")]
    CapacityOverflow,

    /// The global allocator returned null for `layout`.
    #[error("allocation of {} bytes failed", .layout.size())]
    AllocationFailure { layout: Layout },

    /// More initial elements than a fixed-capacity container can hold.
    #[error("too many elements: {given} given for a capacity of {capacity}")]
    TooManyElements { given: usize, capacity: usize },
}

pub type Result<T> = core::result::Result<T, ContainerError>;
