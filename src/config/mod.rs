pub mod applicator;
pub mod loader;
pub mod schema;

pub use applicator::{apply_builtin, apply_patches, ApplyError, ApplyOptions};
pub use loader::{builtin, load_from_str, ConfigError, BUILTIN_TABLE};
pub use schema::{Metadata, Patch, PatchGroup, PatchTable, ValidationError, ValidationIssue};
