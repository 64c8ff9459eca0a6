pub mod session;
pub mod state;
pub mod submission;
pub mod submission_ctx;

pub use session::Session;
pub use state::SessionView;
pub use submission::SubmissionWorkflow;
pub use submission_ctx::SubmissionCtx;
