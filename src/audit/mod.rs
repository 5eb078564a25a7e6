//! Audit history subsystem: change tracking, history recording, and
//! mutation hook dispatch for tracked entities.

pub mod observer;
pub mod recorder;
pub mod tracker;

pub use observer::{HistoryObserver, ItemObserver};
pub use recorder::{format_changes, HistoryRecorder};
pub use tracker::{diff, FieldChange, ItemSnapshot, TRACKED_FIELDS};
