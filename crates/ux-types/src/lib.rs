pub mod digest;
pub mod schema;
pub mod snapshot;
pub mod types;

pub use schema::{
    AriaInfo, BoundingBox, ElementType, KeyUserFlow, PageMeta, Provenance, UIElement,
    UnifiedSchema, Viewport,
};
pub use snapshot::{AxeNode, AxeViolation, ComputedStyle, RawBoundingBox, RawNode, RawSnapshot};
pub use types::{Dimension, ElementContext, Issue, IssueStatus, Severity};
