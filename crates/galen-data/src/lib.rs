#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/galenlabs/galen/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod clean;
pub mod error;
pub mod integrate;
pub mod load;
pub mod model;
pub mod schema;
pub mod store;

pub use clean::CoercePolicy;
pub use error::{DataError, Result};
pub use integrate::{integrate, integrate_with_policy};
pub use load::{RawTables, load_dir};
pub use model::PharmaModel;
pub use store::DataStore;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
