// Gene pool PRNG.
//
// `PoolRng` is xoshiro256++ with its 256-bit state filled by SplitMix64. It
// backs every random choice in the workspace: genome randomization, crossover
// and mutation in `genepool_genetics`, and utterance composition in
// `genepool_music`. There is no global generator; callers own and pass one.
//
// Utterances are seeded from genome bytes, not from a number, so this crate
// also owns `seed_from_bytes`: SHA-256 over the bytes, with the first eight
// digest bytes read as a little-endian u64.
//
// Output for a given state must be identical on every platform and build.
// The generator is pure integer arithmetic; floats are derived from it by
// exact conversion.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Xoshiro256++ state. Serializable so a half-used stream can be resumed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolRng {
    s: [u64; 4],
}

impl PoolRng {
    pub fn new(seed: u64) -> Self {
        let mut sm = seed;
        let s = [(); 4].map(|()| splitmix64(&mut sm));
        PoolRng { s }
    }

    pub fn next_u64(&mut self) -> u64 {
        let [s0, s1, s2, s3] = self.s;
        let out = s0.wrapping_add(s3).rotate_left(23).wrapping_add(s0);

        let s2 = s2 ^ s0;
        let s3 = s3 ^ s1;
        let s1 = s1 ^ s2;
        let s0 = s0 ^ s3;
        self.s = [s0, s1, s2 ^ (self.s[1] << 17), s3.rotate_left(45)];

        out
    }

    /// Uniform in [0, 1) with 53 bits of precision.
    pub fn next_f64(&mut self) -> f64 {
        const SCALE: f64 = 1.0 / (1u64 << 53) as f64;
        (self.next_u64() >> 11) as f64 * SCALE
    }

    /// Uniform byte, taken from the high bits.
    pub fn next_u8(&mut self) -> u8 {
        (self.next_u64() >> 56) as u8
    }

    /// `floor(next_f64() * len)`: the "pick one entry of this table" draw.
    /// Returns 0 for an empty table, leaving the bad index to the caller.
    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        ((self.next_f64() * len as f64) as usize).min(len - 1)
    }

    /// True with probability `p`. Always consumes one draw, so the stream
    /// position does not depend on `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// First eight bytes (little-endian) of SHA-256 over `bytes`.
pub fn seed_from_bytes(bytes: &[u8]) -> u64 {
    let digest = Sha256::digest(bytes);
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(head)
}

fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_seeds_give_equal_streams() {
        let mut a = PoolRng::new(2021);
        let mut b = PoolRng::new(2021);
        let xs: Vec<u64> = (0..500).map(|_| a.next_u64()).collect();
        let ys: Vec<u64> = (0..500).map(|_| b.next_u64()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn neighbouring_seeds_diverge() {
        let first: Vec<u64> = (0..4u64).map(|seed| PoolRng::new(seed).next_u64()).collect();
        for i in 0..first.len() {
            for j in i + 1..first.len() {
                assert_ne!(first[i], first[j], "seeds {i} and {j}");
            }
        }
    }

    #[test]
    fn zero_seed_state_is_not_all_zero() {
        // xoshiro is stuck forever on an all-zero state.
        let rng = PoolRng::new(0);
        assert!(rng.s.iter().any(|&w| w != 0));
    }

    #[test]
    fn unit_floats_never_reach_one() {
        let mut rng = PoolRng::new(8);
        let mut sum = 0.0;
        for _ in 0..20_000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v), "{v}");
            sum += v;
        }
        let mean = sum / 20_000.0;
        assert!((0.48..0.52).contains(&mean), "mean {mean}");
    }

    #[test]
    fn index_reaches_every_slot_of_a_table() {
        let mut rng = PoolRng::new(31);
        let mut counts = [0usize; 9];
        for _ in 0..9_000 {
            counts[rng.index(counts.len())] += 1;
        }
        assert!(counts.iter().all(|&c| c > 700), "{counts:?}");
        assert_eq!(rng.index(0), 0);
        assert_eq!(rng.index(1), 0);
    }

    #[test]
    fn bytes_span_the_gene_range() {
        let mut rng = PoolRng::new(9);
        let mut seen = [false; 256];
        for _ in 0..50_000 {
            seen[rng.next_u8() as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn chance_hits_at_roughly_its_rate() {
        let mut rng = PoolRng::new(77);
        let hits = (0..10_000).filter(|_| rng.chance(0.2)).count();
        assert!((1_800..2_200).contains(&hits), "{hits} hits");
        assert!((0..100).all(|_| !rng.chance(0.0)));
        assert!((0..100).all(|_| rng.chance(1.0)));
    }

    #[test]
    fn byte_seed_depends_on_every_byte() {
        let genes = [0u8; 6];
        let base = seed_from_bytes(&genes);
        assert_eq!(base, seed_from_bytes(&genes));
        for i in 0..genes.len() {
            let mut changed = genes;
            changed[i] = 1;
            assert_ne!(base, seed_from_bytes(&changed), "byte {i} ignored");
        }
    }

    #[test]
    fn empty_byte_seed_is_the_sha256_prefix() {
        // SHA-256("") begins e3 b0 c4 42 98 fc 1c 14.
        let expected = u64::from_le_bytes([0xe3, 0xb0, 0xc4, 0x42, 0x98, 0xfc, 0x1c, 0x14]);
        assert_eq!(seed_from_bytes(&[]), expected);
    }

    #[test]
    fn resumed_stream_continues_where_it_left_off() {
        let mut rng = PoolRng::new(5);
        rng.index(10);
        let json = serde_json::to_string(&rng).unwrap();
        let mut resumed: PoolRng = serde_json::from_str(&json).unwrap();
        assert_eq!(
            (0..50).map(|_| rng.next_u64()).collect::<Vec<_>>(),
            (0..50).map(|_| resumed.next_u64()).collect::<Vec<_>>()
        );
    }
}
