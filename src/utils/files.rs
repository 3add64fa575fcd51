//! This file contains signature file loading and sketch selection


use std::collections::HashSet;
use std::path::Path;

use sourmash::collection::Collection;
use sourmash::signature::{Signature, SigsTrait};
use sourmash::storage::Storage;
use sourmash::sketch::minhash::KmerMinHash;
use sourmash::sketch::Sketch;

use crate::errors::{Result, SearchError};
use crate::utils::parameters::SearchParams;


/// A minhash sketch extracted from a signature, with what we need to identify it in output.
#[derive(Clone, Debug)]
pub struct SketchRecord {
    /// path of file the sketch was loaded from
    location: String,
    /// name recorded in signature, empty if none
    name: String,
    /// filename recorded in signature at sketching time, can be empty
    filename: String,
    ///
    minhash: KmerMinHash,
}


impl SketchRecord {
    pub fn new(location: String, name: String, filename: String, minhash: KmerMinHash) -> Self {
        SketchRecord { location, name, filename, minhash }
    }

    pub fn get_location(&self) -> &str {
        &self.location
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// filename recorded in signature, or location if signature did not record it
    pub fn get_filename(&self) -> &str {
        if self.filename.is_empty() {
            &self.location
        } else {
            &self.filename
        }
    }

    pub fn get_minhash(&self) -> &KmerMinHash {
        &self.minhash
    }

    pub fn md5sum(&self) -> String {
        self.minhash.md5sum()
    }

    /// replace the sketch, used after downsampling
    pub fn set_minhash(&mut self, minhash: KmerMinHash) {
        self.minhash = minhash;
    }

    /// Name used in display: signature name, else recorded filename, else first 8 chars of md5.
    /// If max_len > 0 and the name is longer it is truncated and terminated by "..."
    pub fn display_name(&self, max_len: usize) -> String {
        let name = if !self.name.is_empty() {
            self.name.clone()
        } else if !self.filename.is_empty() {
            self.filename.clone()
        } else {
            self.md5sum().chars().take(8).collect()
        };
        truncate_name(&name, max_len)
    } // end of display_name
} // end of impl SketchRecord


/// truncate name to max_len chars, replacing the end by "..."
pub fn truncate_name(name: &str, max_len: usize) -> String {
    let nb_chars = name.chars().count();
    if max_len == 0 || nb_chars <= max_len {
        return name.to_string();
    }
    let mut truncated: String = name.chars().take(max_len.saturating_sub(3)).collect();
    truncated.push_str("...");
    truncated
} // end of truncate_name


//=============================================================================

/// load all signatures in a file: json (possibly gzipped) or a zip collection with a manifest
pub fn load_signatures(path: &Path) -> Result<Vec<Signature>> {
    log::debug!("loading signatures from {:?}", path);
    let location = path.display().to_string();
    let loaded = if location.ends_with(".zip") {
        load_zip_signatures(&location)
    } else {
        Signature::from_path(path)
    };
    let sigs = loaded.map_err(|e| SearchError::Load {
        filename: location.clone(),
        reason: e.to_string(),
    })?;
    log::debug!("loaded {} signatures from {:?}", sigs.len(), path);
    Ok(sigs)
} // end of load_signatures


// The manifest has one record per sketch, several records can point to the same signature file
// inside the archive so we load each internal location once.
fn load_zip_signatures(location: &str) -> std::result::Result<Vec<Signature>, sourmash::Error> {
    let collection = Collection::from_zipfile(location)?;
    log::debug!("zip collection {} has {} records", location, collection.len());
    let mut seen = HashSet::<&str>::new();
    let mut sigs = Vec::<Signature>::new();
    for internal in collection.manifest().internal_locations() {
        if !seen.insert(internal) {
            continue;
        }
        let sig: Signature = collection.storage().load_sig(internal)?.into();
        sigs.push(sig);
    }
    Ok(sigs)
} // end of load_zip_signatures


/// extracts from signatures all minhash sketches matching ksize and moltype of params
pub fn select_sketches(location: &str, sigs: Vec<Signature>, params: &SearchParams) -> Vec<SketchRecord> {
    let mut selected = Vec::<SketchRecord>::new();
    for mut sig in sigs {
        // Signature::name falls back on filename then on md5sum, an empty filename
        // leaves us with the recorded name only.
        let filename = sig.filename();
        sig.set_filename("");
        let name = sig.name();
        for sketch in sig.sketches() {
            if let Sketch::MinHash(mh) = sketch {
                if params.selects(mh.ksize(), &mh.hash_function()) {
                    selected.push(SketchRecord::new(location.to_string(), name.clone(), filename.clone(), mh));
                } else {
                    log::trace!("skipping sketch ksize {} in {}", mh.ksize(), location);
                }
            }
        }
    }
    log::debug!("selected {} sketches in {} at ksize={}/moltype={}", selected.len(), location,
                params.get_ksize(), params.get_moltype());
    selected
} // end of select_sketches


/// load a file and keep sketches matching params
pub fn load_sketches(path: &Path, params: &SearchParams) -> Result<Vec<SketchRecord>> {
    let sigs = load_signatures(path)?;
    let location = path.display().to_string();
    Ok(select_sketches(&location, sigs, params))
} // end of load_sketches
