//! Attachment-based layout.
//!
//! Every edge of a component may be attached to the page content area or to an
//! edge of another component on the same page. The [`LayoutEngine`] turns those
//! relative constraints into absolute rectangles, resolving components in
//! dependency order and rejecting cyclic or dangling attachments.
//!
//! Content-derived sizes come from a [`ContentMetrics`] implementation, which
//! keeps the engine a pure function of the page and the metrics.

mod engine;
mod metrics;

pub use engine::{ComponentGeometry, LayoutEngine, LayoutIssue, LayoutResult};
pub use metrics::{ContentMetrics, TextMetrics};
