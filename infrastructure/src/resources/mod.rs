//! Packaged default configuration files
//!
//! Defaults either come compiled into the binary ([`EmbeddedResources`]) or
//! from a directory holding an unpacked plugin jar ([`DirectoryResources`]).

mod directory;
mod embedded;

pub use directory::DirectoryResources;
pub use embedded::EmbeddedResources;
