//! errors raised while loading, selecting and comparing sketches.
//!
//! Every error is fatal to the whole invocation, the binary prints it prefixed by `ERROR:`
//! and exits with a non zero status.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    /// single query mode, nothing in the query file matches ksize/moltype
    #[error("cannot find query sketch at ksize={ksize}/moltype={moltype}")]
    NoQuerySketch { ksize: u32, moltype: String },

    /// multi query mode, no query file contains a matching sketch
    #[error("cannot find any query sketches at ksize={ksize}/moltype={moltype}")]
    NoQuerySketches { ksize: u32, moltype: String },

    #[error("can only have one query; {0} found.")]
    TooManyQueries(usize),

    #[error("cannot find sketch at ksize={ksize}/moltype={moltype} in '{filename}'")]
    NoTargetSketch {
        filename: String,
        ksize: u32,
        moltype: String,
    },

    #[error("expected exactly one sketch in '{filename}'; {count} found")]
    TooManyTargets { filename: String, count: usize },

    /// asked scaled is finer than the query native resolution
    #[error("cannot downsample query '{name}' from scaled={from} to scaled={to}")]
    CannotDownsample { name: String, from: u64, to: u64 },

    #[error("'{0}' must have abundance information")]
    MissingAbundance(String),

    #[error("Unable to run comparison for '{query}' vs '{target}': {reason}")]
    Incompatible {
        query: String,
        target: String,
        reason: String,
    },

    #[error("could not load signatures from '{filename}': {reason}")]
    Load { filename: String, reason: String },

    #[error("csv output failed: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
} // end of SearchError

pub type Result<T> = std::result::Result<T, SearchError>;
