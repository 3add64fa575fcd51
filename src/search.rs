//! Search for genomes in metagenomes.
//!
//! mgsearch : one query genome against a list of metagenomes.
//! mg_multi_search : many query genomes against a list of metagenomes, one line per pair,
//! all metagenomes are processed for a query before going to the next query.
//!
//! Processing is sequential, any error stops the search. Csv rows already written are kept.


use std::io::Write;
use std::path::Path;

use crate::answer::{CsvOutput, ResultRow, ResultTable};
use crate::errors::Result;
use crate::matcher::search_metag;
use crate::query::{downsample_query, load_queries, load_single_query};
use crate::utils::*;


/// search one query genome in metagenomes, table is written on stdout.
/// Returns the number of result rows.
pub fn mgsearch<P: AsRef<Path>>(query_path: &Path, against: &[P], params: &SearchParams) -> Result<usize> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    mgsearch_to(&mut out, query_path, against, params, get_screen_width())
} // end of mgsearch


/// as mgsearch, writing table in out
pub fn mgsearch_to<P: AsRef<Path>>(out: &mut dyn Write, query_path: &Path, against: &[P],
                                   params: &SearchParams, screen_width: usize) -> Result<usize> {
    log::info!("mgsearch query {:?}, nb metagenomes {}", query_path, against.len());
    let mut query = load_single_query(query_path, params)?;
    writeln!(out, "Loaded query signature: {}", query.display_name(screen_width.saturating_sub(25)))?;
    downsample_query(&mut query, params.get_scaled())?;
    //
    let mut table = ResultTable::single(screen_width);
    search_queries(out, &[query], against, params, &mut table)
} // end of mgsearch_to


/// search many query genomes in metagenomes, table is written on stdout.
/// Returns the number of result rows.
pub fn mg_multi_search<P: AsRef<Path>, Q: AsRef<Path>>(query_paths: &[P], against: &[Q], params: &SearchParams) -> Result<usize> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    mg_multi_search_to(&mut out, query_paths, against, params, get_screen_width())
} // end of mg_multi_search


/// as mg_multi_search, writing table in out
pub fn mg_multi_search_to<P: AsRef<Path>, Q: AsRef<Path>>(out: &mut dyn Write, query_paths: &[P], against: &[Q],
                                                          params: &SearchParams, screen_width: usize) -> Result<usize> {
    log::info!("mg_multi_search nb query files {}, nb metagenomes {}", query_paths.len(), against.len());
    let mut queries = load_queries(query_paths, params)?;
    writeln!(out, "Loaded {} query signatures.", queries.len())?;
    for query in queries.iter_mut() {
        downsample_query(query, params.get_scaled())?;
    }
    //
    let mut table = ResultTable::multi(screen_width);
    search_queries(out, &queries, against, params, &mut table)
} // end of mg_multi_search_to


// query major loop on all pairs, dispatching rows to table and csv
fn search_queries<Q: AsRef<Path>>(out: &mut dyn Write, queries: &[SketchRecord], against: &[Q],
                                  params: &SearchParams, table: &mut ResultTable) -> Result<usize> {
    let mut csv_out = match params.get_output() {
        Some(path) => Some(CsvOutput::create(path)?),
        None => None,
    };
    //
    let mut nb_rows = 0;
    for query in queries {
        for metag_path in against {
            let result = search_metag(query, metag_path.as_ref(), params)?;
            let row = ResultRow::new(query, &result);
            if let Some(csv_out) = csv_out.as_mut() {
                csv_out.write_row(&row)?;
            }
            table.write_row(out, query, &result, &row)?;
            nb_rows += 1;
        }
    }
    //
    if let Some(mut csv_out) = csv_out {
        csv_out.flush()?;
    }
    out.flush()?;
    table.notify_missing(&mut std::io::stderr())?;
    log::debug!("search_queries wrote {} rows", nb_rows);
    Ok(nb_rows)
} // end of search_queries
