//!  A module to quantify containment of a genome sketch in a metagenome sketch.
//!
//! Set statistics are computed on the flattened metagenome (abundances ignored) by sourmash.
//! If the metagenome was sketched with abundance tracking we also compute the abundance of the
//! genome hashes found in the metagenome, and the fraction of metagenome weighted hashes they represent.


use std::collections::HashMap;
use std::path::Path;

use sourmash::signature::SigsTrait;

use crate::ani::ContainmentAni;
use crate::errors::{Result, SearchError};
use crate::utils::*;


/// Statistics on metagenome abundances of the hashes shared with the genome
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AbundanceStats {
    /// mean abundance of shared hashes
    pub mean: f64,
    pub median: f64,
    /// population standard deviation
    pub std: f64,
    /// sum of abundances of shared hashes
    pub sum_weighted_found: u64,
    /// sum of all metagenome abundances
    pub total_weighted_hashes: u64,
    /// sum_weighted_found / total_weighted_hashes
    pub f_match_weighted: f64,
}


impl AbundanceStats {
    /// abunds are abundances of shared hashes, total the sum of all metagenome abundances.
    /// An empty intersection gives null statistics.
    pub fn new(abunds: &[u64], total_weighted_hashes: u64) -> Self {
        let sum_weighted_found: u64 = abunds.iter().sum();
        let f_match_weighted = if total_weighted_hashes > 0 {
            sum_weighted_found as f64 / total_weighted_hashes as f64
        } else {
            0.
        };
        let values: Vec<f64> = abunds.iter().map(|a| *a as f64).collect();
        AbundanceStats {
            mean: mean(&values),
            median: median(&values),
            std: std_dev(&values),
            sum_weighted_found,
            total_weighted_hashes,
            f_match_weighted,
        }
    }
} // end of impl AbundanceStats


fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.;
    }
    values.iter().sum::<f64>() / values.len() as f64
}


fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.
    } else {
        sorted[mid]
    }
}


// population standard deviation (divide by n)
fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}


//====================================================================


/// Result of comparison of a query genome with one metagenome.
#[derive(Clone, Debug)]
pub struct ContainmentMatch {
    /// the metagenome sketch
    target: SketchRecord,
    /// kmer size as asked by user
    ksize: u32,
    intersect_size: usize,
    union_size: u64,
    query_n_hashes: usize,
    match_n_hashes: usize,
    /// fraction of query hashes found in metagenome
    f_query: f64,
    /// fraction of metagenome hashes found in query
    f_match: f64,
    jaccard: f64,
    ani: ContainmentAni,
    /// None if metagenome has no abundance
    abundance: Option<AbundanceStats>,
} // end of ContainmentMatch


impl ContainmentMatch {
    pub fn get_target(&self) -> &SketchRecord {
        &self.target
    }

    pub fn get_ksize(&self) -> u32 {
        self.ksize
    }

    pub fn get_scaled(&self) -> u64 {
        self.target.get_minhash().scaled()
    }

    /// number of bp of query estimated to be in metagenome
    pub fn intersect_bp(&self) -> u64 {
        self.intersect_size as u64 * self.get_scaled()
    }

    pub fn get_intersect_size(&self) -> usize {
        self.intersect_size
    }

    pub fn get_union_size(&self) -> u64 {
        self.union_size
    }

    pub fn get_query_n_hashes(&self) -> usize {
        self.query_n_hashes
    }

    pub fn get_match_n_hashes(&self) -> usize {
        self.match_n_hashes
    }

    pub fn get_f_query(&self) -> f64 {
        self.f_query
    }

    pub fn get_f_match(&self) -> f64 {
        self.f_match
    }

    pub fn get_jaccard(&self) -> f64 {
        self.jaccard
    }

    pub fn get_ani(&self) -> &ContainmentAni {
        &self.ani
    }

    pub fn get_abundance(&self) -> Option<&AbundanceStats> {
        self.abundance.as_ref()
    }

    pub fn has_abundance(&self) -> bool {
        self.abundance.is_some()
    }
} // end of impl ContainmentMatch


//====================================================================


/// compare query to an already loaded metagenome sketch.
pub fn compare(query: &SketchRecord, target: SketchRecord, ksize: u32) -> Result<ContainmentMatch> {
    let query_mh = query.get_minhash();
    let target_mh = target.get_minhash();
    //
    let incompatible = |reason: String| SearchError::Incompatible {
        query: query.get_location().to_string(),
        target: target.get_location().to_string(),
        reason,
    };
    if query_mh.scaled() == 0 || target_mh.scaled() == 0 {
        return Err(incompatible("comparison needs scaled sketches".to_string()));
    }
    // intersection checks ksize, moltype, seed and scaled compatibility
    let (common, union_size) = query_mh.intersection(target_mh).map_err(|e| incompatible(e.to_string()))?;
    //
    let query_n_hashes = query_mh.size();
    let match_n_hashes = target_mh.size();
    let intersect_size = common.len();
    let fraction = |n: usize, d: usize| if d > 0 { n as f64 / d as f64 } else { 0. };
    let f_query = fraction(intersect_size, query_n_hashes);
    let f_match = fraction(intersect_size, match_n_hashes);
    let jaccard = if union_size > 0 { intersect_size as f64 / union_size as f64 } else { 0. };
    //
    let ani = ContainmentAni::estimate(f_query, f_match, ksize, target_mh.scaled(), query_n_hashes, match_n_hashes);
    //
    let abundance = if target_mh.track_abundance() {
        let mins = target_mh.mins();
        let abunds = target_mh.abunds().unwrap_or_default();
        let total: u64 = abunds.iter().sum();
        let by_hash: HashMap<u64, u64> = mins.into_iter().zip(abunds).collect();
        // inflate intersection with metagenome abundances
        let found: Vec<u64> = common.iter().filter_map(|h| by_hash.get(h).copied()).collect();
        Some(AbundanceStats::new(&found, total))
    } else {
        None
    };
    log::debug!("{} in {} : intersect {}, f_query {:.3}, f_match {:.3}, abundance : {}",
                query.get_location(), target.get_location(), intersect_size, f_query, f_match, abundance.is_some());
    //
    Ok(ContainmentMatch {
        target,
        ksize,
        intersect_size,
        union_size,
        query_n_hashes,
        match_n_hashes,
        f_query,
        f_match,
        jaccard,
        ani,
        abundance,
    })
} // end of compare


/// Do the actual search for query in a metagenome file.
/// The file must contain exactly one sketch matching params.
pub fn search_metag(query: &SketchRecord, metag_path: &Path, params: &SearchParams) -> Result<ContainmentMatch> {
    let filename = metag_path.display().to_string();
    let mut metag = load_sketches(metag_path, params)?;
    if metag.is_empty() {
        return Err(SearchError::NoTargetSketch {
            filename,
            ksize: params.get_ksize(),
            moltype: params.get_moltype().to_string(),
        });
    }
    if metag.len() > 1 {
        return Err(SearchError::TooManyTargets { filename, count: metag.len() });
    }
    let metag = metag.remove(0);
    // make sure metag has abundance!
    if params.require_abundance() && !metag.get_minhash().track_abundance() {
        return Err(SearchError::MissingAbundance(filename));
    }
    compare(query, metag, params.get_ksize())
} // end of search_metag
