//! Average nucleotide identity estimated from FracMinHash containment.
//!
//! For a containment c between two sketches at kmer size k, the mutation rate point estimate is
//! d = 1 - c^(1/k) and ANI = 1 - d.
//! With a sketch of n hashes at scaled s, the dataset has about L = n*s distinct kmers, L*(1-d)^k are expected
//! to be conserved and each one is sampled with probability 1/s. So the probability that the sketches share nothing
//! is (1 - 1/s)^(L*(1-d)^k). When this probability is not negligible a low ANI may be a false negative.


use sourmash::ani_utils::ani_from_containment;


/// probability of sharing nothing above which we flag a potential false negative
pub const ANI_FN_THRESHOLD: f64 = 1.0e-3;

// below (resp. above) these containments we clamp ANI to 0 (resp. 1)
const CONTAINMENT_LOW: f64 = 0.0001;
const CONTAINMENT_HIGH: f64 = 0.9999;


/// ANI from one containment direction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AniEstimate {
    /// point estimate of ANI in [0,1]
    ani: f64,
    /// probability that no conserved kmer is sampled in sketches
    p_nothing_in_common: f64,
}


impl AniEstimate {
    pub fn get_ani(&self) -> f64 {
        self.ani
    }

    pub fn get_p_nothing_in_common(&self) -> f64 {
        self.p_nothing_in_common
    }

    pub fn potential_false_negative(&self) -> bool {
        self.p_nothing_in_common >= ANI_FN_THRESHOLD
    }
} // end of impl AniEstimate


/// estimate ANI from containment of a sketch of n_hashes hashes
pub fn containment_to_ani(containment: f64, ksize: u32, scaled: u64, n_hashes: usize) -> AniEstimate {
    let dist = if containment <= CONTAINMENT_LOW {
        1.0
    } else if containment >= CONTAINMENT_HIGH {
        0.0
    } else {
        1.0 - ani_from_containment(containment, ksize as f64)
    };
    let n_unique_kmers = n_hashes as f64 * scaled as f64;
    let p_nothing_in_common = prob_nothing_in_common(dist, ksize, scaled, n_unique_kmers);
    log::trace!("containment {:.3e} dist {:.3e} p_nothing_in_common {:.3e}", containment, dist, p_nothing_in_common);
    AniEstimate { ani: 1.0 - dist, p_nothing_in_common }
} // end of containment_to_ani


/// probability that sketches at scaled share no hash when mutation rate is dist
pub fn prob_nothing_in_common(dist: f64, ksize: u32, scaled: u64, n_unique_kmers: f64) -> f64 {
    if dist >= 1.0 || n_unique_kmers <= 0.0 {
        return 1.0;
    }
    if dist <= 0.0 || scaled <= 1 {
        return 0.0;
    }
    let n_conserved = n_unique_kmers * (1.0 - dist).powi(ksize as i32);
    let log_not_sampled = (1.0 - 1.0 / scaled as f64).ln();
    (n_conserved * log_not_sampled).exp()
} // end of prob_nothing_in_common


//==========================================================================

/// ANI estimated in both directions of a comparison between a genome and a metagenome
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainmentAni {
    /// from containment of genome in metagenome
    genome: AniEstimate,
    /// from containment of metagenome in genome
    matched: AniEstimate,
}


impl ContainmentAni {
    pub fn estimate(f_query: f64, f_match: f64, ksize: u32, scaled: u64, query_n_hashes: usize, match_n_hashes: usize) -> Self {
        let genome = containment_to_ani(f_query, ksize, scaled, query_n_hashes);
        let matched = containment_to_ani(f_match, ksize, scaled, match_n_hashes);
        ContainmentAni { genome, matched }
    }

    pub fn genome_containment_ani(&self) -> f64 {
        self.genome.ani
    }

    pub fn match_containment_ani(&self) -> f64 {
        self.matched.ani
    }

    pub fn average_containment_ani(&self) -> f64 {
        (self.genome.ani + self.matched.ani) / 2.0
    }

    pub fn max_containment_ani(&self) -> f64 {
        self.genome.ani.max(self.matched.ani)
    }

    pub fn potential_false_negative(&self) -> bool {
        self.genome.potential_false_negative() || self.matched.potential_false_negative()
    }
} // end of impl ContainmentAni
