//! The word-pair catalog.
//!
//! Each pair is two related-but-distinct words. Civilians all receive the
//! first; the imposter receives the second and has to blend in without
//! knowing which word the majority holds.

use rand::Rng;
use rand::seq::IndexedRandom;

/// One civilian/imposter word pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordPair {
    pub civilian: &'static str,
    pub imposter: &'static str,
}

/// The built-in catalog. Pairs are close enough that descriptions overlap
/// but far enough that a careful listener can tell the camps apart.
const CATALOG: &[WordPair] = &[
    WordPair { civilian: "coffee", imposter: "tea" },
    WordPair { civilian: "piano", imposter: "guitar" },
    WordPair { civilian: "beach", imposter: "pool" },
    WordPair { civilian: "cat", imposter: "dog" },
    WordPair { civilian: "pizza", imposter: "burger" },
    WordPair { civilian: "train", imposter: "bus" },
    WordPair { civilian: "winter", imposter: "autumn" },
    WordPair { civilian: "movie", imposter: "play" },
    WordPair { civilian: "doctor", imposter: "nurse" },
    WordPair { civilian: "mountain", imposter: "hill" },
    WordPair { civilian: "painting", imposter: "photograph" },
    WordPair { civilian: "butter", imposter: "margarine" },
    WordPair { civilian: "violin", imposter: "cello" },
    WordPair { civilian: "castle", imposter: "palace" },
    WordPair { civilian: "river", imposter: "lake" },
    WordPair { civilian: "soccer", imposter: "rugby" },
    WordPair { civilian: "helicopter", imposter: "airplane" },
    WordPair { civilian: "library", imposter: "bookstore" },
    WordPair { civilian: "moon", imposter: "sun" },
    WordPair { civilian: "chess", imposter: "checkers" },
    WordPair { civilian: "honey", imposter: "jam" },
    WordPair { civilian: "snowboard", imposter: "ski" },
    WordPair { civilian: "tent", imposter: "cabin" },
    WordPair { civilian: "submarine", imposter: "ship" },
];

/// Draws a random pair from the catalog.
pub fn draw(rng: &mut impl Rng) -> WordPair {
    // The catalog is a non-empty constant.
    *CATALOG.choose(rng).expect("word catalog is non-empty")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_catalog_words_are_distinct_within_pairs() {
        for pair in CATALOG {
            assert_ne!(pair.civilian, pair.imposter, "degenerate pair: {pair:?}");
        }
    }

    #[test]
    fn test_draw_returns_catalog_pair() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let pair = draw(&mut rng);
            assert!(CATALOG.contains(&pair));
        }
    }
}
