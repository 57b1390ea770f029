//! Built-in conflict rules.

pub mod duplicate_name;
pub mod incompatible_versions;
pub mod oversized_installs;

pub use duplicate_name::DuplicateNameRule;
pub use incompatible_versions::IncompatibleVersionsRule;
pub use oversized_installs::OversizedInstallsRule;
