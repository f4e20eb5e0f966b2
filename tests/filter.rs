use std::collections::HashSet;

use rand::{rngs::StdRng, SeedableRng};
use spellbloom::{
    expected_false_positive_rate, random_word, ByteBitmap, FilterBuilder, HashCount, SpellFilter,
};

/// Fixed value words to insert into the filter.
fn dictionary() -> Vec<String> {
    (0..500).map(|i| format!("entry-{}\n", i)).collect()
}

fn built_filter(size_bytes: usize, hashes: HashCount) -> SpellFilter {
    let mut f = FilterBuilder::with_size(size_bytes).unwrap().build();
    f.build(dictionary(), hashes);
    f
}

/// Generate tests for a specific hash count asserting the filter behaves the
/// same after being saved to, and loaded from, a file.
macro_rules! test_hash_count {
    (
		$name:ident, // Test name suffix.
		$hashes:expr // The HashCount to build and check with.
	) => {
        paste::paste! {
            #[test]
            fn [<test_no_false_negatives_ $name>]() {
                let f = built_filter(1024, $hashes);

                for w in dictionary() {
                    assert!(f.check(w.trim_end(), $hashes), "false negative for {}", w);
                }
            }

            #[test]
            fn [<test_file_round_trip_ $name>]() {
                let dir = tempfile::tempdir().unwrap();
                let path = dir.path().join("bitmap.bin");

                let f = built_filter(1024, $hashes);
                f.save(&path).unwrap();

                assert_eq!(std::fs::metadata(&path).unwrap().len(), 1024);

                let loaded = FilterBuilder::from_file(&path).unwrap().build();
                assert_eq!(loaded, f);

                let mut rng = StdRng::seed_from_u64(42);
                for _ in 0..2000 {
                    let w = random_word(&mut rng);
                    assert_eq!(loaded.check(&w, $hashes), f.check(&w, $hashes));
                }
            }
        }
    };
}

test_hash_count!(one, HashCount::ONE);
test_hash_count!(two, HashCount::TWO);
test_hash_count!(three, HashCount::MAX);

#[test]
fn test_apple() {
    let mut f = FilterBuilder::with_size(128).unwrap().build();
    f.build(vec!["apple"], HashCount::ONE);

    assert_eq!(f.num_bits(), 1024);
    assert!(f.check("apple", HashCount::ONE));
}

#[test]
fn test_build_twice_is_idempotent() {
    let once = built_filter(512, HashCount::TWO);

    let mut twice = once.clone();
    twice.build(dictionary(), HashCount::TWO);

    assert_eq!(twice, once);
}

#[test]
fn test_load_bitmap_written_elsewhere() {
    // 1024 bits with "apple" inserted using md5, sha256 and crc32.
    let mut raw = vec![0_u8; 128];
    raw[47] |= 0b0100_0000;
    raw[99] |= 0b0000_0100;
    raw[9] |= 0b1000_0000;

    let f = FilterBuilder::from_bytes(raw).unwrap().build();
    assert!(f.check("apple", HashCount::MAX));
    assert!(f.check("apple", HashCount::ONE));
    assert!(!f.check("banana", HashCount::ONE));
}

#[test]
fn test_false_positive_rate_matches_theory() {
    let hashes = HashCount::TWO;
    let f = built_filter(1024, hashes);
    let ground_truth: HashSet<String> = dictionary()
        .into_iter()
        .map(|w| w.trim_end().to_owned())
        .collect();

    let mut rng = StdRng::seed_from_u64(1234);
    let got = f
        .estimate_false_positive_rate_with_rng(&ground_truth, 20_000, hashes, &mut rng)
        .unwrap();

    // (1 - e^(-2 * 500 / 8192))^2 ~= 0.0132
    let want = expected_false_positive_rate(f.num_bits(), ground_truth.len(), hashes);
    assert!((got - want).abs() < 0.01, "got {}, want {}", got, want);

    // The observed rate also tracks the actual load of the bitmap.
    let by_load = f.fill_ratio().powi(2);
    assert!((got - by_load).abs() < 0.01, "got {}, want {}", got, by_load);
}

#[test]
fn test_saturated_file_matches_everything() {
    let bitmap = ByteBitmap::from_bytes(vec![0xff; 16]).unwrap();
    let f = FilterBuilder::with_bitmap(bitmap).build();

    let rate = f
        .estimate_false_positive_rate(&HashSet::new(), 100, HashCount::MAX)
        .unwrap();
    assert_eq!(rate, 1.0);
}
