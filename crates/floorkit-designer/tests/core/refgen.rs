use floorkit_designer::RefGenerator;
use proptest::prelude::*;
use std::collections::HashSet;

fn all_short_refs() -> Vec<String> {
    ('A'..='Z')
        .flat_map(|l| (0..10).map(move |d| format!("{l}{d}")))
        .collect()
}

fn short_ref_strategy() -> impl Strategy<Value = String> {
    (0u8..26, 0u8..10).prop_map(|(l, d)| format!("{}{}", (b'A' + l) as char, d))
}

proptest! {
    #[test]
    fn generated_ref_is_never_taken(
        taken in prop::collection::hash_set(short_ref_strategy(), 0..260),
        seed in any::<u64>(),
    ) {
        let mut gen = RefGenerator::seeded(seed);
        let r = gen.generate(taken.iter().map(String::as_str));
        prop_assert!(!taken.contains(&r));
    }
}

#[test]
fn test_many_refs_past_short_space() {
    let mut gen = RefGenerator::seeded(5);
    let mut refs: HashSet<String> = HashSet::new();
    for _ in 0..400 {
        let r = gen.generate(refs.iter().map(String::as_str));
        assert!(refs.insert(r));
    }
    assert!(all_short_refs().iter().all(|r| refs.contains(r)));
    assert_eq!(refs.len(), 400);
}
