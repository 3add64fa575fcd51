//! structures related to search parameters


use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use sourmash::encodings::HashFunctions;


/// molecule type of sketches we select.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MolType {
    Dna,
    Protein,
    Dayhoff,
    Hp,
}


impl Default for MolType {
    fn default() -> Self {
        MolType::Dna
    }
} // end of default for MolType


impl MolType {
    /// the sourmash hash function corresponding to this molecule type
    pub fn hash_function(&self) -> HashFunctions {
        match self {
            MolType::Dna => HashFunctions::Murmur64Dna,
            MolType::Protein => HashFunctions::Murmur64Protein,
            MolType::Dayhoff => HashFunctions::Murmur64Dayhoff,
            MolType::Hp => HashFunctions::Murmur64Hp,
        }
    }

    /// returns None for hash functions we do not handle
    pub fn from_hash_function(hash_function: &HashFunctions) -> Option<Self> {
        match hash_function {
            HashFunctions::Murmur64Dna => Some(MolType::Dna),
            HashFunctions::Murmur64Protein => Some(MolType::Protein),
            HashFunctions::Murmur64Dayhoff => Some(MolType::Dayhoff),
            HashFunctions::Murmur64Hp => Some(MolType::Hp),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }

    /// Amino acid sketches store 3 times the kmer size asked on the command line.
    pub fn sketch_ksize(&self, ksize: u32) -> usize {
        match self {
            MolType::Dna => ksize as usize,
            _ => 3 * ksize as usize,
        }
    }
} // end of impl MolType


impl fmt::Display for MolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MolType::Dna => "DNA",
            MolType::Protein => "protein",
            MolType::Dayhoff => "dayhoff",
            MolType::Hp => "hp",
        };
        write!(f, "{}", s)
    }
} // end of Display for MolType


//=========================================================================================

/// Gathers parameters shared by single and multi query searches.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchParams {
    /// kmer size as given on command line (not multiplied by 3 for amino acids)
    ksize: u32,
    moltype: MolType,
    /// if set, queries are downsampled to this scaled value
    scaled: Option<u64>,
    /// fail if a metagenome was sketched without abundance
    require_abundance: bool,
    /// csv output
    output: Option<PathBuf>,
} // end of SearchParams


impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            ksize: 31,
            moltype: MolType::Dna,
            scaled: None,
            require_abundance: false,
            output: None,
        }
    }
}


impl SearchParams {
    pub fn new(ksize: u32, moltype: MolType, scaled: Option<u64>, require_abundance: bool, output: Option<PathBuf>) -> Self {
        SearchParams { ksize, moltype, scaled, require_abundance, output }
    }

    pub fn get_ksize(&self) -> u32 {
        self.ksize
    }

    pub fn get_moltype(&self) -> MolType {
        self.moltype
    }

    pub fn get_scaled(&self) -> Option<u64> {
        self.scaled
    }

    pub fn require_abundance(&self) -> bool {
        self.require_abundance
    }

    pub fn get_output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    /// true if a sketch with these characteristics is one we search with/in
    pub fn selects(&self, ksize: usize, hash_function: &HashFunctions) -> bool {
        ksize == self.moltype.sketch_ksize(self.ksize) && *hash_function == self.moltype.hash_function()
    }
} // end of impl SearchParams


//=====================================================================================

/// width of terminal used to truncate names in display.
/// We follow the COLUMNS convention, defaulting to 80.
pub fn get_screen_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|w| *w > 0)
        .unwrap_or(80)
} // end of get_screen_width
