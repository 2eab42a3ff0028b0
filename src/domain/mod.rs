//! Domain logic - pure value types independent of git and the registry

pub mod branch;
pub mod commit;
pub mod prerelease;
pub mod release;
pub mod severity;
pub mod tag;
pub mod version;

pub use branch::{BranchContext, SkipReason};
pub use commit::{ChangeRecord, CommitRecord, CommitType};
pub use prerelease::PreRelease;
pub use release::{ReleaseDecision, ReleaseRef};
pub use severity::Severity;
pub use tag::TagPattern;
pub use version::Version;
