pub mod common;
pub mod entry;
pub mod err;
pub mod feedback;
pub mod form;

pub use common::{ProjectInfo, ProjectLastUpdate, Reply, ReplyList};
pub use entry::{EntryType, StructuredCategory};
pub use err::AppError;
pub use feedback::{FeedbackKind, FeedbackMessage, FormOutcome, LastUpdate, SideEffect};
pub use form::{ExportFormat, ExportRequest, FormMode, FormState, StructuredFields, ValidationError};
