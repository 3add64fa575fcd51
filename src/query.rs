//! loading of query sketches and their downsampling to the asked resolution.


use std::path::Path;

use sourmash::signature::SigsTrait;

use crate::errors::{Result, SearchError};
use crate::utils::*;


/// Loads exactly one query sketch matching params from query file.
pub fn load_single_query(path: &Path, params: &SearchParams) -> Result<SketchRecord> {
    let mut queries = load_sketches(path, params)?;
    match queries.len() {
        0 => Err(SearchError::NoQuerySketch {
            ksize: params.get_ksize(),
            moltype: params.get_moltype().to_string(),
        }),
        1 => Ok(queries.remove(0)),
        n => Err(SearchError::TooManyQueries(n)),
    }
} // end of load_single_query


/// Loads all query sketches matching params, from all files, in order of files.
pub fn load_queries<P: AsRef<Path>>(paths: &[P], params: &SearchParams) -> Result<Vec<SketchRecord>> {
    let mut queries = Vec::<SketchRecord>::new();
    for path in paths {
        let mut loaded = load_sketches(path.as_ref(), params)?;
        queries.append(&mut loaded);
    }
    if queries.is_empty() {
        return Err(SearchError::NoQuerySketches {
            ksize: params.get_ksize(),
            moltype: params.get_moltype().to_string(),
        });
    }
    log::info!("loaded {} query sketches from {} files", queries.len(), paths.len());
    Ok(queries)
} // end of load_queries


/// Downsample query to scaled if asked. We never upsample.
pub fn downsample_query(query: &mut SketchRecord, scaled: Option<u64>) -> Result<()> {
    let scaled = match scaled {
        Some(scaled) => scaled,
        None => return Ok(()),
    };
    let native = query.get_minhash().scaled();
    if native == 0 || scaled < native {
        return Err(SearchError::CannotDownsample {
            name: query.display_name(0),
            from: native,
            to: scaled,
        });
    }
    if scaled == native {
        return Ok(());
    }
    let downsampled = query.get_minhash().downsample_scaled(scaled).map_err(|e| SearchError::CannotDownsample {
        name: format!("{} ({})", query.display_name(0), e),
        from: native,
        to: scaled,
    })?;
    log::debug!("downsampled query {} from scaled {} to {}, nb hashes {} -> {}",
                query.get_location(), native, scaled, query.get_minhash().size(), downsampled.size());
    query.set_minhash(downsampled);
    Ok(())
} // end of downsample_query
