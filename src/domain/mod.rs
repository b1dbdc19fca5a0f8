pub mod candidate;
pub mod record;

pub use candidate::Candidate;
pub use record::{ProductRecord, ABSENT_MARKER};
