//! Property-based tests for ranking, filtering and index invariants.

use std::collections::BTreeSet;
use std::sync::Arc;

use proptest::prelude::*;

use vitrine::{
    Catalog, Filter, FilterEvaluator, InvertedIndex, LexicalSearcher, Predicate, RawRecord,
    RawValue, Recommender, SimpleAnalyzer,
};

const KEYS: &[&str] = &["Type", "Brand", "Color", "Weight"];
const WORDS: &[&str] = &["car", "vacuum", "blender", "red", "blue", "steel", "x"];

fn arb_value() -> impl Strategy<Value = RawValue> {
    prop_oneof![
        prop::collection::vec(prop::sample::select(WORDS), 1..4)
            .prop_map(|words| RawValue::Text(words.join(" "))),
        (0i64..20).prop_map(RawValue::from),
    ]
}

/// Catalogs with unique ids and a small shared vocabulary, so that queries,
/// filters and similarities actually overlap.
fn arb_records() -> impl Strategy<Value = Vec<RawRecord>> {
    prop::collection::vec(
        prop::collection::btree_map(prop::sample::select(KEYS), arb_value(), 0..4),
        0..12,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, attributes)| {
                attributes
                    .into_iter()
                    .fold(RawRecord::new(format!("p{i}")), |record, (key, value)| {
                        record.add_field(key, value)
                    })
            })
            .collect()
    })
}

fn arb_predicate() -> impl Strategy<Value = (String, Predicate)> {
    let key = prop::sample::select(KEYS).prop_map(str::to_string);
    let predicate = prop_oneof![
        prop::sample::select(WORDS).prop_map(Predicate::equals),
        prop::sample::select(WORDS).prop_map(Predicate::contains),
        (0.0f64..10.0, 0.0f64..10.0).prop_map(|(a, b)| Predicate::range(a.min(b), a.max(b))),
    ];
    (key, predicate)
}

fn build(records: Vec<RawRecord>) -> (Catalog, InvertedIndex) {
    let catalog = Catalog::build(records).expect("ids are unique");
    let index = InvertedIndex::build(&catalog, Arc::new(SimpleAnalyzer::new()));
    (catalog, index)
}

proptest! {
    #[test]
    fn search_respects_limit_and_order(
        records in arb_records(),
        query in prop::collection::vec(prop::sample::select(WORDS), 1..4),
        limit in 0usize..8,
    ) {
        let (_catalog, index) = build(records);
        let hits = LexicalSearcher::new(&index)
            .search(&query.join(" "), limit)
            .expect("query has tokens");

        prop_assert!(hits.len() <= limit);
        for pair in hits.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                prop_assert!(pair[0].product_id < pair[1].product_id);
            }
        }
    }

    #[test]
    fn extra_predicate_narrows_filter(
        records in arb_records(),
        base in prop::collection::vec(arb_predicate(), 0..3),
        extra in arb_predicate(),
    ) {
        let (catalog, _index) = build(records);
        let evaluator = FilterEvaluator::new(&catalog);

        let base_filter: Filter = base.into_iter().collect();
        let narrowed = base_filter.clone().with(extra.0, extra.1);

        let wide: BTreeSet<String> = evaluator.evaluate(&base_filter).expect("valid").into_iter().collect();
        let narrow: BTreeSet<String> = evaluator.evaluate(&narrowed).expect("valid").into_iter().collect();
        prop_assert!(narrow.is_subset(&wide));
    }

    #[test]
    fn recommend_excludes_seed_and_bounds_similarity(
        records in arb_records().prop_filter("non-empty", |r| !r.is_empty()),
        seed in 0usize..12,
        limit in 0usize..15,
    ) {
        let seed_id = format!("p{}", seed % records.len());
        let (catalog, _index) = build(records);
        let recs = Recommender::new(&catalog).recommend(&seed_id, limit).expect("seed exists");

        prop_assert!(recs.len() <= limit);
        prop_assert_eq!(recs.len(), limit.min(catalog.len() - 1));
        for rec in &recs {
            prop_assert_ne!(&rec.product_id, &seed_id);
            prop_assert!((0.0..=1.0).contains(&rec.similarity));
        }
    }

    #[test]
    fn index_rebuild_is_deterministic(records in arb_records()) {
        let (catalog, first) = build(records);
        let second = InvertedIndex::build(&catalog, Arc::new(SimpleAnalyzer::new()));

        prop_assert_eq!(&first, &second);
        for term in first.terms() {
            prop_assert_eq!(first.postings(term), second.postings(term));
            prop_assert_eq!(first.doc_freq(term), second.doc_freq(term));
        }
    }
}
