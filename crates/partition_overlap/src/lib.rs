//! # Partition Overlap
//!
//! Classify elements by the exact combination of named sets they belong to,
//! and track how stable those classes are across daily snapshots.
//!
//! ## Key Features
//!
//! - **Exact partition**: N named sets become 2^N - 1 disjoint classes whose
//!   union is the union of the sets
//! - **Lazy and frozen**: partitions are computed on the first query and the
//!   classifier rejects input afterwards
//! - **Overlap tracking**: per class, elements retained from one date to the
//!   next, absolute and as a percentage
//! - **Snapshot ingestion**: scope and dependency dimensions built from
//!   control-plane vs. data-plane ranking comparisons
//!
//! ## Example
//!
//! ```rust
//! use partition_overlap::classifier::PartitionClassifier;
//! use partition_overlap::overlap::OverlapTracker;
//!
//! let mut tracker = OverlapTracker::new();
//! for (date, eq) in [("2021-03-01", vec![1, 2, 3]), ("2021-03-02", vec![2, 3, 4])] {
//!     let mut classifier = PartitionClassifier::new();
//!     classifier.register("eq", eq).unwrap();
//!     tracker.record(date, classifier.partitions()).unwrap();
//! }
//!
//! let report = tracker.compute().unwrap();
//! let eq = report.get(&"eq".into()).unwrap();
//! assert_eq!(eq.absolute, vec![2]);
//! ```

// Module declarations
pub mod classifier;
pub mod conf;
pub mod dataframe;
pub mod error;
pub mod label;
pub mod overlap;
pub mod partition;
pub mod ratios;
pub mod relation;
pub mod snapshot;
pub mod validation;

pub use classifier::PartitionClassifier;
pub use error::{ClassifierError, IntegrityError, OverlapError};
pub use label::ClassLabel;
pub use overlap::{OverlapReport, OverlapTracker};
pub use partition::{Element, Partition};
