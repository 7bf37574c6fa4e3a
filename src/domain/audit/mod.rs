pub mod cursor;
pub mod diff;
pub mod entity;
pub mod repository;

#[cfg(test)]
mod diff_tests;

pub use cursor::PageCursor;
pub use diff::diff;
pub use entity::{
    ActorRef, AuditEntry, AuditEvent, ChangedFields, FieldChange, RequestContext, SubjectRef,
};
pub use repository::{AuditEntryRepository, AuditFilter, DailyActorCount, EventCount};
