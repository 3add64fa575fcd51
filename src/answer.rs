//! contains output of search results : a table written on stdout and an optional csv file.
//!
//! Both sinks receive one row per (query, metagenome) pair.
//! Abundance dependent fields are blank in csv and N/A in table when metagenome has no abundance.


use std::io::Write;
use std::path::Path;

use serde::Serialize;
use sourmash::signature::SigsTrait;

use crate::errors::Result;
use crate::matcher::ContainmentMatch;
use crate::utils::*;


/// csv columns, in output order
pub const COLUMNS: [&str; 26] = [
    "intersect_bp",
    "match_filename",
    "match_name",
    "match_md5",
    "query_filename",
    "query_name",
    "query_md5",
    "ksize",
    "moltype",
    "scaled",
    "f_query",
    "f_match",
    "f_match_weighted",
    "sum_weighted_found",
    "average_abund",
    "median_abund",
    "std_abund",
    "query_n_hashes",
    "match_n_hashes",
    "match_n_weighted_hashes",
    "jaccard",
    "genome_containment_ani",
    "match_containment_ani",
    "average_containment_ani",
    "max_containment_ani",
    "potential_false_negative",
];


/// One output row. Field order must be the order of COLUMNS.
#[derive(Clone, Debug, Serialize)]
pub struct ResultRow {
    pub intersect_bp: u64,
    pub match_filename: String,
    pub match_name: String,
    pub match_md5: String,
    pub query_filename: String,
    pub query_name: String,
    pub query_md5: String,
    pub ksize: u32,
    pub moltype: String,
    pub scaled: u64,
    pub f_query: f64,
    pub f_match: f64,
    pub f_match_weighted: Option<f64>,
    pub sum_weighted_found: Option<u64>,
    pub average_abund: Option<f64>,
    pub median_abund: Option<f64>,
    pub std_abund: Option<f64>,
    pub query_n_hashes: usize,
    pub match_n_hashes: usize,
    pub match_n_weighted_hashes: Option<u64>,
    pub jaccard: f64,
    pub genome_containment_ani: f64,
    pub match_containment_ani: f64,
    pub average_containment_ani: f64,
    pub max_containment_ani: f64,
    pub potential_false_negative: bool,
} // end of ResultRow


impl ResultRow {
    pub fn new(query: &SketchRecord, result: &ContainmentMatch) -> Self {
        let target = result.get_target();
        let hash_function = target.get_minhash().hash_function();
        let moltype = match MolType::from_hash_function(&hash_function) {
            Some(moltype) => moltype.to_string(),
            None => format!("{:?}", hash_function),
        };
        let abundance = result.get_abundance();
        let ani = result.get_ani();
        ResultRow {
            intersect_bp: result.intersect_bp(),
            match_filename: target.get_location().to_string(),
            match_name: target.get_name().to_string(),
            match_md5: target.md5sum(),
            query_filename: query.get_filename().to_string(),
            query_name: query.get_name().to_string(),
            query_md5: query.md5sum(),
            ksize: result.get_ksize(),
            moltype,
            scaled: result.get_scaled(),
            f_query: result.get_f_query(),
            f_match: result.get_f_match(),
            f_match_weighted: abundance.map(|a| a.f_match_weighted),
            sum_weighted_found: abundance.map(|a| a.sum_weighted_found),
            average_abund: abundance.map(|a| a.mean),
            median_abund: abundance.map(|a| a.median),
            std_abund: abundance.map(|a| a.std),
            query_n_hashes: result.get_query_n_hashes(),
            match_n_hashes: result.get_match_n_hashes(),
            match_n_weighted_hashes: abundance.map(|a| a.total_weighted_hashes),
            jaccard: result.get_jaccard(),
            genome_containment_ani: ani.genome_containment_ani(),
            match_containment_ani: ani.match_containment_ani(),
            average_containment_ani: ani.average_containment_ani(),
            max_containment_ani: ani.max_containment_ani(),
            potential_false_negative: ani.potential_false_negative(),
        }
    } // end of new

    pub fn has_abundance(&self) -> bool {
        self.average_abund.is_some()
    }
} // end of impl ResultRow


//=========================================================================================

/// csv sink. Header is written at creation so a run without result still gets a valid csv.
pub struct CsvOutput<W: Write> {
    writer: csv::Writer<W>,
}


impl CsvOutput<std::fs::File> {
    pub fn create(path: &Path) -> Result<Self> {
        log::info!("writing csv output in {:?}", path);
        let writer = csv::WriterBuilder::new().has_headers(false).from_path(path)?;
        CsvOutput::new(writer)
    }
}


impl<W: Write> CsvOutput<W> {
    pub fn from_writer(out: W) -> Result<Self> {
        let writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);
        CsvOutput::new(writer)
    }

    fn new(mut writer: csv::Writer<W>) -> Result<Self> {
        writer.write_record(COLUMNS)?;
        Ok(CsvOutput { writer })
    }

    pub fn write_row(&mut self, row: &ResultRow) -> Result<()> {
        self.writer.serialize(row)?;
        Ok(())
    }

    /// flush and give back the underlying writer
    pub fn into_inner(self) -> Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error().into())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
} // end of impl CsvOutput


//=========================================================================================

/// displayed table. In multi query mode each line begins with query name.
pub struct ResultTable {
    /// true if we display query name
    multi_query: bool,
    /// width allocated to metagenome name
    name_width: usize,
    /// false until header is written
    header_done: bool,
    /// set if some metagenome had no abundance
    missed_abundance: bool,
}


/// width of query column in multi query mode
const QUERY_NAME_WIDTH: usize = 17;


impl ResultTable {
    /// table for one query
    pub fn single(screen_width: usize) -> Self {
        ResultTable { multi_query: false, name_width: screen_width.saturating_sub(41), header_done: false, missed_abundance: false }
    }

    /// table for multi query mode
    pub fn multi(screen_width: usize) -> Self {
        ResultTable { multi_query: true, name_width: screen_width.saturating_sub(21), header_done: false, missed_abundance: false }
    }

    pub fn header(&self) -> String {
        if self.multi_query {
            "query             p_genome avg_abund   p_metag   metagenome name\n\
             --------          -------- ---------   -------   ---------------".to_string()
        } else {
            "p_genome avg_abund   p_metag   metagenome name\n\
             -------- ---------   -------   ---------------".to_string()
        }
    }

    /// formats one line. query_name is used only in multi query mode.
    pub fn format_line(&self, row: &ResultRow, query_name: &str, match_name: &str) -> String {
        let pct_genome = format!("{:.1}", row.f_query * 100.);
        let (avg_abund, pct_metag) = match (row.average_abund, row.f_match_weighted) {
            (Some(avg), Some(f_weighted)) => (format!("{:.1}", avg), format!("{:.1}%", f_weighted * 100.)),
            _ => ("N/A".to_string(), "N/A".to_string()),
        };
        let line = format!("{:>6}%  {:>6}     {:>6}     {}", pct_genome, avg_abund, pct_metag, match_name);
        if self.multi_query {
            format!("{:>width$} {}", query_name, line, width = QUERY_NAME_WIDTH)
        } else {
            line
        }
    } // end of format_line

    /// write a result line, preceded by header if it is the first one
    pub fn write_row(&mut self, out: &mut dyn Write, query: &SketchRecord, result: &ContainmentMatch, row: &ResultRow) -> std::io::Result<()> {
        if !self.header_done {
            writeln!(out)?;
            writeln!(out, "{}", self.header())?;
            self.header_done = true;
        }
        if !row.has_abundance() {
            self.missed_abundance = true;
        }
        let query_name = query.display_name(QUERY_NAME_WIDTH);
        let match_name = result.get_target().display_name(self.name_width);
        writeln!(out, "{}", self.format_line(row, &query_name, &match_name))
    } // end of write_row

    pub fn missed_abundance(&self) -> bool {
        self.missed_abundance
    }

    /// notify user that there were columns that were not filled in
    pub fn notify_missing(&self, err: &mut dyn Write) -> std::io::Result<()> {
        if self.missed_abundance {
            writeln!(err)?;
            writeln!(err, "** Note: N/A in column values indicate metagenomes w/o abundance tracking.")?;
        }
        Ok(())
    }
} // end of impl ResultTable
