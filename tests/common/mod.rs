//! signature fixtures written at test time

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use sourmash::encodings::HashFunctions;
use sourmash::manifest::{Manifest, Record};
use sourmash::signature::Signature;
use sourmash::sketch::minhash::KmerMinHash;
use sourmash::sketch::Sketch;

pub const GENOME_A: &str = "CP001472.1 Acidobacterium capsulatum ATCC 51196";
pub const GENOME_B: &str = "CP001941.1 Aciduliprofundum boonei T469";
pub const METAG: &str = "SRR606249";

pub fn minhash(hashes: &[(u64, u64)], ksize: u32, scaled: u64, abund: bool) -> KmerMinHash {
    let mut mh = KmerMinHash::new(scaled, ksize, HashFunctions::Murmur64Dna, 42, abund, 0);
    for (h, a) in hashes {
        mh.add_hash_with_abundance(*h, *a);
    }
    mh
}

pub fn signature(name: &str, mh: KmerMinHash) -> Signature {
    let mut sig = Signature::default();
    sig.set_name(name);
    sig.set_filename(&format!("{}.fa.gz", name.split(' ').next().unwrap_or(name)));
    sig.push(Sketch::MinHash(mh));
    sig
}

/// writes a json signature file containing one signature per (name, sketch)
pub fn write_sigs(path: &Path, sigs: Vec<(&str, KmerMinHash)>) -> PathBuf {
    let sigs: Vec<Signature> = sigs.into_iter().map(|(name, mh)| signature(name, mh)).collect();
    write_signatures(path, &sigs)
}

pub fn write_signatures(path: &Path, sigs: &[Signature]) -> PathBuf {
    let file = File::create(path).expect("cannot create signature file");
    serde_json::to_writer(file, sigs).expect("cannot write signatures");
    path.to_path_buf()
}


//============================================================================
// zip collections as written by sourmash: one json entry per signature and a csv manifest.
// Entries are stored uncompressed.

struct ZipEntry {
    name: String,
    crc: u32,
    size: u32,
    offset: u32,
}

// msdos date for 1980-01-01
const ZIP_DATE: u16 = (1 << 5) | 1;
const ZIP_UTF8_FLAG: u16 = 1 << 11;

fn zip_entry(out: &mut Vec<u8>, name: &str, data: &[u8]) -> ZipEntry {
    let entry = ZipEntry {
        name: name.to_string(),
        crc: crc32fast::hash(data),
        size: data.len() as u32,
        offset: out.len() as u32,
    };
    out.extend_from_slice(&0x04034b50u32.to_le_bytes());
    out.extend_from_slice(&20u16.to_le_bytes());
    out.extend_from_slice(&ZIP_UTF8_FLAG.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes()); // stored
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&ZIP_DATE.to_le_bytes());
    out.extend_from_slice(&entry.crc.to_le_bytes());
    out.extend_from_slice(&entry.size.to_le_bytes());
    out.extend_from_slice(&entry.size.to_le_bytes());
    out.extend_from_slice(&(name.len() as u16).to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(name.as_bytes());
    out.extend_from_slice(data);
    entry
}

fn zip_central_directory(out: &mut Vec<u8>, entries: &[ZipEntry]) {
    let start = out.len() as u32;
    for entry in entries {
        out.extend_from_slice(&0x02014b50u32.to_le_bytes());
        out.extend_from_slice(&20u16.to_le_bytes());
        out.extend_from_slice(&20u16.to_le_bytes());
        out.extend_from_slice(&ZIP_UTF8_FLAG.to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(&ZIP_DATE.to_le_bytes());
        out.extend_from_slice(&entry.crc.to_le_bytes());
        out.extend_from_slice(&entry.size.to_le_bytes());
        out.extend_from_slice(&entry.size.to_le_bytes());
        out.extend_from_slice(&(entry.name.len() as u16).to_le_bytes());
        // extra, comment, disk, internal attributes
        for _ in 0..4 {
            out.extend_from_slice(&0u16.to_le_bytes());
        }
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&entry.offset.to_le_bytes());
        out.extend_from_slice(entry.name.as_bytes());
    }
    let size = out.len() as u32 - start;
    out.extend_from_slice(&0x06054b50u32.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    out.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    out.extend_from_slice(&size.to_le_bytes());
    out.extend_from_slice(&start.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
}

/// writes a sourmash zip collection, one signature per entry
pub fn write_zip(path: &Path, sigs: &[Signature]) -> PathBuf {
    let mut out = Vec::<u8>::new();
    let mut entries = Vec::<ZipEntry>::new();
    let mut records = Vec::<Record>::new();
    for (i, sig) in sigs.iter().enumerate() {
        let internal = format!("sig{}.sig", i);
        let data = serde_json::to_vec(&vec![sig]).expect("cannot serialize signature");
        entries.push(zip_entry(&mut out, &internal, &data));
        records.extend(Record::from_sig(sig, &internal));
    }
    let mut manifest = Vec::<u8>::new();
    Manifest::from(records).to_writer(&mut manifest).expect("cannot write manifest");
    entries.push(zip_entry(&mut out, "SOURMASH-MANIFEST.csv", &manifest));
    zip_central_directory(&mut out, &entries);
    //
    let mut file = File::create(path).expect("cannot create zip file");
    file.write_all(&out).expect("cannot write zip file");
    path.to_path_buf()
}

pub fn write_sig(dir: &Path, filename: &str, name: &str, mh: KmerMinHash) -> PathBuf {
    write_sigs(&dir.join(filename), vec![(name, mh)])
}

/// hashes 1..=40, fully contained in metagenome
pub fn genome_a(dir: &Path) -> PathBuf {
    let hashes: Vec<(u64, u64)> = (1..=40).map(|h| (h, 1)).collect();
    write_sig(dir, "genome_a.sig", GENOME_A, minhash(&hashes, 31, 1000, false))
}

/// hashes 41..=50 and 1000..=1009, half contained in metagenome
pub fn genome_b(dir: &Path) -> PathBuf {
    let hashes: Vec<(u64, u64)> = (41..=50).chain(1000..=1009).map(|h| (h, 1)).collect();
    write_sig(dir, "genome_b.sig", GENOME_B, minhash(&hashes, 31, 1000, false))
}

/// hashes 1..=50 with abundances 10 to 50 and 2000..=2099 with abundance 1.
/// Sum of abundances is 1600, genome A hashes weight 1200.
pub fn metagenome(dir: &Path) -> PathBuf {
    let hashes: Vec<(u64, u64)> = (1..=50u64)
        .map(|h| (h, (h % 5 + 1) * 10))
        .chain((2000..=2099).map(|h| (h, 1)))
        .collect();
    write_sig(dir, "metag.sig", METAG, minhash(&hashes, 31, 1000, true))
}

/// the metagenome above in a zip collection, with a 21-mer sketch that searches must skip
pub fn metagenome_zip(dir: &Path) -> PathBuf {
    let json = metagenome(dir);
    let metag = Signature::from_path(&json).expect("cannot reload metagenome").swap_remove(0);
    let other = signature("SRR606249 k21", minhash(&[(7, 2), (8, 3)], 21, 1000, true));
    write_zip(&dir.join("metag.sig.zip"), &[metag, other])
}

/// metagenome sketched without abundance, contains hashes 1..=20 of genome A
pub fn flat_metagenome(dir: &Path) -> PathBuf {
    let hashes: Vec<(u64, u64)> = (1..=20).chain(500..=519).map(|h| (h, 1)).collect();
    write_sig(dir, "flat.sig", "flat", minhash(&hashes, 31, 1000, false))
}

/// abundance metagenome with no name recorded
pub fn unnamed_metagenome(dir: &Path) -> PathBuf {
    let hashes: Vec<(u64, u64)> = (1..=10).map(|h| (h, 2)).collect();
    let mut sig = Signature::default();
    sig.push(Sketch::MinHash(minhash(&hashes, 31, 1000, true)));
    write_signatures(&dir.join("noname.sig"), &[sig])
}

/// metagenome at scaled 2000, not comparable with our genomes
pub fn coarse_metagenome(dir: &Path) -> PathBuf {
    let hashes: Vec<(u64, u64)> = (1..=10).map(|h| (h, 3)).collect();
    write_sig(dir, "coarse.sig", "coarse", minhash(&hashes, 31, 2000, true))
}
