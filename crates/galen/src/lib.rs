#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/galenlabs/galen/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export the sub-crates behind one facade.
pub use galen_data as data;
pub use galen_output as output;

// Re-export the types most consumers start from.
pub use galen_data::{CoercePolicy, DataError, DataStore, PharmaModel};
pub use galen_output::SalesFilter;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
