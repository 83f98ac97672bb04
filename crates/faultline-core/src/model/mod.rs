pub mod candidate;
pub mod event;
pub mod submission;

pub use candidate::{CompositeError, DataValue, ErrorCandidate, ErrorData, SimpleError};
pub use event::{LogEvent, PropertyValue};
pub use submission::{CustomData, Submission, TagSet};
