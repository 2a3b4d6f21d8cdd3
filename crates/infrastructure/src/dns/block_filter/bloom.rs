//! Fixed-size bloom filter used to gate the blocklist's sorted-array lookup.
//!
//! Built once by [`super::loader`] and frozen: there is no mutation after
//! publication, so the read path needs no locking and no atomics.

const NUM_HASHES: usize = 5;
const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

/// `m` bits addressed as `u64` words, with `k = 5` independent probes derived
/// from two base hashes via the standard double-hashing trick. Hashing
/// happens over the UTF-8 byte sequence directly, so the result is the same
/// on any platform regardless of native endianness.
pub struct BloomFilter {
    bits: Vec<u64>,
    num_bits: usize,
}

impl BloomFilter {
    /// Size the filter for `capacity` entries at target false-positive rate
    /// `fp_rate`: `m = ceil(-n * ln(p) / (ln 2)^2)`.
    pub fn new(capacity: usize, fp_rate: f64) -> Self {
        let n = capacity.max(1) as f64;
        let num_bits = (-n * fp_rate.ln() / std::f64::consts::LN_2.powi(2))
            .ceil()
            .max(64.0) as usize;
        let num_words = num_bits.div_ceil(64);
        Self {
            bits: vec![0u64; num_words],
            num_bits,
        }
    }

    pub fn add(&mut self, s: &str) {
        for bit_idx in self.probe_indices(s) {
            let word = bit_idx / 64;
            let bit = bit_idx % 64;
            self.bits[word] |= 1u64 << bit;
        }
    }

    /// Returns `false` iff any of the k probed bits is clear — a guaranteed
    /// "definitely absent". Returns `true` ("maybe present") otherwise; the
    /// caller must still consult the authoritative sorted array.
    #[inline]
    pub fn test(&self, s: &str) -> bool {
        self.probe_indices(s)
            .all(|bit_idx| (self.bits[bit_idx / 64] >> (bit_idx % 64)) & 1 != 0)
    }

    pub fn size_bytes(&self) -> usize {
        self.bits.len() * 8
    }

    fn probe_indices(&self, s: &str) -> impl Iterator<Item = usize> + '_ {
        let bytes = s.as_bytes();
        let h1 = fnv1a(bytes, 0);
        let h2 = fnv1a(bytes, 1) | 1;
        let num_bits = self.num_bits;
        (0..NUM_HASHES).map(move |i| ((h1.wrapping_add((i as u64).wrapping_mul(h2))) as usize) % num_bits)
    }
}

fn fnv1a(bytes: &[u8], seed: u64) -> u64 {
    let mut hash = FNV_OFFSET_BASIS ^ seed;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}
