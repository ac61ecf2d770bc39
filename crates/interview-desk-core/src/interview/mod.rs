mod session;

pub use session::{Advance, InterviewScript, InterviewSession};
