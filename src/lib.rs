//! Search for genomes in metagenomes, with containment and abundance weighted statistics.
//!
//! Sketches are sourmash signatures. Loading, selection of sketches by kmer size and molecule type,
//! downsampling and set intersection are done by the sourmash crate.

pub mod ani;
pub mod answer;
pub mod errors;
pub mod matcher;
pub mod query;
pub mod search;
pub mod utils;

pub use errors::SearchError;
