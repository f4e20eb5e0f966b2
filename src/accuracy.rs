//! Empirical measurement of the false positive rate of a [`SpellFilter`].

use std::collections::HashSet;

use rand::Rng;
use tracing::debug;

use crate::{Bitmap, Error, HashCount, Result, SpellFilter};

/// The length of generated probe words.
pub const PROBE_WORD_LEN: usize = 5;

const ASCII_LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const ASCII_LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Generate a random, word-shaped probe.
///
/// The first character is any ASCII letter, the rest are lowercase ASCII
/// letters, all chosen uniformly. This mimics the shape of entries in a
/// typical system dictionary rather than sampling arbitrary strings.
pub fn random_word<R>(rng: &mut R) -> String
where
    R: Rng,
{
    let mut word = String::with_capacity(PROBE_WORD_LEN);
    word.push(ASCII_LETTERS[rng.random_range(0..ASCII_LETTERS.len())] as char);
    for _ in 1..PROBE_WORD_LEN {
        word.push(ASCII_LOWER[rng.random_range(0..ASCII_LOWER.len())] as char);
    }
    word
}

/// Return the theoretical false positive probability `(1 - e^(-kn/m))^k` of a
/// filter with `num_bits` bits holding `num_words` words, using `hashes`
/// hashes per word.
pub fn expected_false_positive_rate(num_bits: usize, num_words: usize, hashes: HashCount) -> f64 {
    let k = hashes.get() as f64;
    let load = num_words as f64 / num_bits as f64;

    (1.0 - (-k * load).exp()).powf(k)
}

impl<B> SpellFilter<B>
where
    B: Bitmap,
{
    /// Estimate the false positive rate of the filter by checking
    /// `probe_count` random words (see [`random_word`]).
    ///
    /// A probe reported as present that is not in `ground_truth` counts as a
    /// false positive. The result is the fraction of probes that were false
    /// positives. False negatives cannot occur and are not measured.
    ///
    /// Returns [`Error::EmptyProbeCount`] if `probe_count` is 0.
    pub fn estimate_false_positive_rate(
        &self,
        ground_truth: &HashSet<String>,
        probe_count: usize,
        hashes: HashCount,
    ) -> Result<f64> {
        self.estimate_false_positive_rate_with_rng(
            ground_truth,
            probe_count,
            hashes,
            &mut rand::rng(),
        )
    }

    /// Like [`estimate_false_positive_rate`](Self::estimate_false_positive_rate)
    /// but drawing probe words from `rng`.
    pub fn estimate_false_positive_rate_with_rng<R>(
        &self,
        ground_truth: &HashSet<String>,
        probe_count: usize,
        hashes: HashCount,
        rng: &mut R,
    ) -> Result<f64>
    where
        R: Rng,
    {
        if probe_count == 0 {
            return Err(Error::EmptyProbeCount);
        }

        let mut false_positives = 0_usize;
        for _ in 0..probe_count {
            let word = random_word(rng);
            if self.check(&word, hashes) && !ground_truth.contains(&word) {
                false_positives += 1;
            }
        }

        debug!(probe_count, false_positives, %hashes, "estimated false positive rate");

        Ok(false_positives as f64 / probe_count as f64)
    }
}
