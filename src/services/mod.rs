pub mod assignments;
pub mod comments;
pub mod files;
pub mod policy;
pub mod submissions;
pub mod verification;

pub use assignments::AssignmentService;
pub use comments::CommentService;
pub use files::{FileStore, LocalFileStore, MemoryFileStore};
pub use submissions::SubmissionService;
pub use verification::{CommandVerifier, VerificationReport, Verifier};
