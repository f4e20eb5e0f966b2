#![cfg(feature = "serde")]

use std::fmt::Debug;

use spellbloom::{
    hash::digit_count_for, ByteBitmap, FilterBuilder, HashCount, HashVariant, SpellFilter,
};

/// Fixed words to insert into the filter.
const WORDS: &[&str] = &["apple", "banana", "cherry", "damson", "elderberry"];

fn new_filter() -> SpellFilter<ByteBitmap> {
    let mut f = FilterBuilder::with_size(64)
        .unwrap()
        .hash_limit(HashCount::TWO)
        .build();
    f.build(WORDS.iter(), HashCount::TWO);
    f
}

/// Assert `t` survives a JSON and a bincode round trip unchanged.
#[track_caller]
fn assert_round_trip<T>(t: &T)
where
    for<'a> T: serde::Serialize + serde::Deserialize<'a> + PartialEq + Debug,
{
    let json = serde_json::to_string_pretty(t).expect("must serialise");
    let got: T = serde_json::from_str(&json).expect("must deserialise from serialised form");
    assert_eq!(*t, got, "must round-trip through json");

    let bin = bincode::serialize(t).expect("must serialise");
    let got: T = bincode::deserialize(&bin).expect("must deserialise from serialised form");
    assert_eq!(*t, got, "must round-trip through bincode");
}

#[test]
fn test_serde_filter() {
    let f = new_filter();
    assert_round_trip(&f);

    let json = serde_json::to_string(&f).unwrap();
    let restored: SpellFilter = serde_json::from_str(&json).unwrap();

    // Unlike the raw bitmap file, the serialised form carries the filter
    // configuration.
    assert_eq!(restored.hash_limit(), HashCount::TWO);
    assert_eq!(restored.digit_count(), f.digit_count());
    for w in WORDS {
        assert!(restored.check(w, HashCount::TWO));
    }
}

#[test]
fn test_serde_filter_derives_digit_count() {
    // The digit count is not serialised; any value in the input is ignored
    // and recomputed from the bitmap size.
    let json = serde_json::to_string(&new_filter()).unwrap();
    assert!(!json.contains("digit_count"));

    let json = format!(
        r#"{{"bitmap":{:?},"digit_count":0,"hash_limit":3}}"#,
        vec![0_u8; 16]
    );
    let f: SpellFilter = serde_json::from_str(&json).unwrap();
    assert_eq!(f.num_bits(), 128);
    assert_eq!(f.digit_count(), digit_count_for(128));
    assert_eq!(f.hash_limit(), HashCount::MAX);
    assert!(!f.check("apple", HashCount::MAX));
}

#[test]
fn test_serde_filter_empty_bitmap() {
    let json = r#"{"bitmap":[],"digit_count":3,"hash_limit":3}"#;
    assert!(serde_json::from_str::<SpellFilter>(json).is_err());
}

#[test]
fn test_serde_bitmap() {
    assert_round_trip(new_filter().bitmap());

    assert_eq!(
        serde_json::to_string(&ByteBitmap::from_bytes(vec![1_u8, 128]).unwrap()).unwrap(),
        "[1,128]"
    );
    assert!(serde_json::from_str::<ByteBitmap>("[]").is_err());
}

#[test]
fn test_serde_hash_variant() {
    for v in HashVariant::ALL.iter() {
        assert_round_trip(v);
    }
    assert_eq!(
        serde_json::to_string(&HashVariant::Sha256).unwrap(),
        r#""Sha256""#
    );
}

#[test]
fn test_serde_hash_count() {
    assert_eq!(serde_json::to_string(&HashCount::TWO).unwrap(), "2");
    assert_eq!(
        serde_json::from_str::<HashCount>("7").unwrap(),
        HashCount::MAX
    );
    assert!(serde_json::from_str::<HashCount>("0").is_err());
}
