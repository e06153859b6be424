//! Semantic version tags: templated parsing and formatting, Semantic
//! Versioning precedence, and version files discovered by walking up the
//! directory tree.
//!
//! # Example
//!
//! ```
//! use semtag::SemanticVersion;
//!
//! let v = SemanticVersion::new(10, 33, 4).with_special("beta");
//! assert_eq!(v.format("v%M.%m.%p%s"), "v10.33.4-beta");
//! assert_eq!(v.to_string(), "v10.33.4-beta");
//!
//! let parsed = SemanticVersion::parse_with("3$2^1", Some("%M$%m^%p"), false)?;
//! assert_eq!(parsed, SemanticVersion::new(3, 2, 1));
//! assert!(parsed < SemanticVersion::new(3, 2, 2));
//! # Ok::<(), semtag::ParseError>(())
//! ```

#[macro_use]
extern crate lazy_static;

pub mod error;
pub mod fs;
mod locate;
mod persist;
mod template;
mod version;


pub use error::{Field, ParseError, PersistError};
pub use fs::{Filesystem, MemoryFs, StdFs};
pub use locate::{Located, VersionFileLocator};
pub use template::{Token, VersionTemplate};
pub use version::SemanticVersion;

/// Default template, rendering versions such as `v1.2.3` and `v1.2.3-rc.1`.
pub const TAG_FORMAT: &str = "v%M.%m.%p%s";

/// Name of the version file searched for by [`VersionFileLocator`].
pub const FILE_NAME: &str = ".semver";
