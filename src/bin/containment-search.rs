//! containment-search : search for genomes in metagenomes, with improved output.
//!
//! containment-search mgsearch query_genome metagenome [metagenomes ...] \[options\]
//!
//! containment-search mgmanysearch --queries q1 [q2 ...] --against metagenome [metagenomes ...] \[options\]
//!
//! options :
//!
//! -o, --output : csv output file, one row for each (query, metagenome) pair.
//!
//! --require-abundance : fail if a metagenome was sketched without abundance tracking.
//!
//! -k, --ksize : kmer size of sketches to select (default 31). For amino acid sketches give the number of amino acids.
//!
//! --dna | --protein | --dayhoff | --hp : molecule type of sketches to select (default DNA).
//!
//! --scaled : downsample queries to this scaled value. It must not be smaller than the query scaled.
//!
//! The table displayed gives, for each metagenome, the percentage of genome hashes found, the mean abundance of these hashes
//! and the fraction of metagenome weighted hashes they represent. The two last columns are N/A for metagenomes without abundance.
//!
//! Logging is done with env_logger, set RUST_LOG to debug or trace to get details.


use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgGroup, ArgMatches, Command};

// for logging (debug mostly, switched at compile time in cargo.toml)
use env_logger::Builder;

// our crate
use containment_search::search::{mg_multi_search, mgsearch};
use containment_search::utils::*;


// install a logger facility
pub fn init_log() -> u64 {
    Builder::from_default_env().init();
    log::debug!("logger initialized");
    1
}


// arguments common to mgsearch and mgmanysearch
fn add_search_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("output")
            .short('o')
            .long("output")
            .value_name("FILE")
            .help("output CSV")
            .value_parser(clap::value_parser!(PathBuf)))
        .arg(Arg::new("require_abundance")
            .long("require-abundance")
            .action(ArgAction::SetTrue)
            .help("require that metagenomes be sketched with abundance"))
        .arg(Arg::new("ksize")
            .short('k')
            .long("ksize")
            .value_name("INT")
            .help("k-mer size to select")
            .default_value("31")
            .value_parser(clap::value_parser!(u32).range(1..)))
        .arg(Arg::new("dna")
            .long("dna")
            .visible_alias("nucleotide")
            .action(ArgAction::SetTrue)
            .help("choose a nucleotide signature (default)"))
        .arg(Arg::new("protein")
            .long("protein")
            .action(ArgAction::SetTrue)
            .help("choose a protein signature"))
        .arg(Arg::new("dayhoff")
            .long("dayhoff")
            .action(ArgAction::SetTrue)
            .help("choose Dayhoff-encoded amino acid signatures"))
        .arg(Arg::new("hp")
            .long("hp")
            .visible_alias("hydrophobic-polar")
            .action(ArgAction::SetTrue)
            .help("choose hydrophobic-polar-encoded amino acid signatures"))
        .group(ArgGroup::new("moltype")
            .args(["dna", "protein", "dayhoff", "hp"])
            .multiple(false))
        .arg(Arg::new("scaled")
            .long("scaled")
            .value_name("INT")
            .help("downsample queries to this scaled value")
            .value_parser(clap::value_parser!(u64).range(1..)))
} // end of add_search_args


fn build_cli() -> Command {
    let mgsearch_cmd = Command::new("mgsearch")
        .about("Search for a genome in metagenomes")
        .arg(Arg::new("query_genome")
            .help("sketch to look for")
            .required(true)
            .value_parser(clap::value_parser!(PathBuf)))
        .arg(Arg::new("metagenomes")
            .help("metagenomes to search")
            .required(true)
            .num_args(1..)
            .value_parser(clap::value_parser!(PathBuf)));

    let mgmanysearch_cmd = Command::new("mgmanysearch")
        .about("Search for many genomes in metagenomes")
        .visible_alias("mgmultisearch")
        .arg(Arg::new("queries")
            .long("queries")
            .visible_alias("query")
            .value_name("FILE")
            .help("sketches to look for")
            .required(true)
            .num_args(1..)
            .value_parser(clap::value_parser!(PathBuf)))
        .arg(Arg::new("against")
            .long("against")
            .visible_aliases(["db", "metagenomes"])
            .value_name("FILE")
            .help("metagenomes to search")
            .required(true)
            .num_args(1..)
            .value_parser(clap::value_parser!(PathBuf)));

    Command::new("containment-search")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Search for genomes in metagenomes, containment and abundance weighted containment of sourmash sketches")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(add_search_args(mgsearch_cmd))
        .subcommand(add_search_args(mgmanysearch_cmd))
} // end of build_cli


// decode options common to both commands
fn parse_search_params(matches: &ArgMatches) -> SearchParams {
    let ksize = *matches.get_one::<u32>("ksize").unwrap_or(&31);
    let moltype = if matches.get_flag("protein") {
        MolType::Protein
    } else if matches.get_flag("dayhoff") {
        MolType::Dayhoff
    } else if matches.get_flag("hp") {
        MolType::Hp
    } else {
        MolType::Dna
    };
    let scaled = matches.get_one::<u64>("scaled").copied();
    let require_abundance = matches.get_flag("require_abundance");
    let output = matches.get_one::<PathBuf>("output").cloned();
    log::info!("ksize {}, moltype {}, scaled {:?}, require abundance {}, output {:?}", ksize, moltype, scaled, require_abundance, output);
    SearchParams::new(ksize, moltype, scaled, require_abundance, output)
} // end of parse_search_params


fn run(matches: &ArgMatches) -> anyhow::Result<usize> {
    let nb_rows = match matches.subcommand() {
        Some(("mgsearch", sub_m)) => {
            let params = parse_search_params(sub_m);
            let query = sub_m.get_one::<PathBuf>("query_genome").ok_or_else(|| anyhow::anyhow!("query_genome is mandatory"))?;
            let against: Vec<PathBuf> = sub_m.get_many::<PathBuf>("metagenomes").into_iter().flatten().cloned().collect();
            mgsearch(query, &against, &params)?
        }
        Some(("mgmanysearch", sub_m)) => {
            let params = parse_search_params(sub_m);
            let queries: Vec<PathBuf> = sub_m.get_many::<PathBuf>("queries").into_iter().flatten().cloned().collect();
            let against: Vec<PathBuf> = sub_m.get_many::<PathBuf>("against").into_iter().flatten().cloned().collect();
            mg_multi_search(&queries, &against, &params)?
        }
        Some((other, _)) => anyhow::bail!("unknown command {}", other),
        None => anyhow::bail!("a command is required"),
    };
    Ok(nb_rows)
} // end of run


fn main() {
    let _ = init_log();
    //
    let matches = build_cli().get_matches();
    //
    let start_t = chrono::Local::now();
    log::info!("containment-search begins at time : {:#?}", start_t);
    match run(&matches) {
        Ok(nb_rows) => {
            let elapsed = chrono::Local::now() - start_t;
            log::info!("containment-search done, {} rows, elapsed {} ms", nb_rows, elapsed.num_milliseconds());
        }
        Err(e) => {
            log::error!("containment-search failed : {:#}", e);
            eprintln!("ERROR: {:#}", e);
            std::process::exit(1);
        }
    }
} // end of main
