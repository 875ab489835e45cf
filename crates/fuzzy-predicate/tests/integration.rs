//! End-to-end behavior of predicates over realistic collections.

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

use fuzzy_predicate::{fuzzy, Arg, Candidate, FuzzyPredicate, Haystack, Key, Metric, PredicateError};
use serde_json::{json, Value};

fn records() -> Vec<Value> {
    vec![
        json!({"id": "abc123", "name": "Foo Bar", "age": 42}),
        json!({"id": "abc420", "name": "John Doe", "age": 1234}),
        json!({"foo": "bar"}),
        json!({"bar": "foo"}),
        json!({"key": "I-Would_eat!FOOD*42/times+per{day}"}),
    ]
}

fn mixed() -> Vec<Value> {
    let mut values = records();
    values.extend([
        json!("John Doe"),
        json!("john-doe"),
        json!("jdoe"),
        json!("Jane Smith"),
        json!(42),
        json!(4),
        json!("420"),
        json!("4JOHN2DOE!"),
        json!(["john", "doe", "is 42"]),
    ]);
    values
}

fn select<'a>(values: &'a [Value], indices: &[usize]) -> Vec<&'a Value> {
    indices.iter().map(|&i| &values[i]).collect()
}

// ============================================================================
// Predicate generation
// ============================================================================

#[test]
fn only_strings_or_numbers_are_queries() {
    assert!(fuzzy("valid query", Arg::Absent, None).is_ok());
    assert!(fuzzy(42, Arg::Absent, None).is_ok());

    for bad in [
        Arg::List(vec![]),
        Arg::Map(vec![]),
        Arg::from(f64::NAN),
        Arg::Absent,
    ] {
        assert!(
            matches!(
                fuzzy(bad.clone(), Arg::Absent, None),
                Err(PredicateError::InvalidQuery { .. })
            ),
            "{bad:?} should be rejected"
        );
    }
}

#[test]
fn keys_are_strings_lists_or_a_threshold() {
    assert!(fuzzy("anything", "string", None).is_ok());
    assert!(fuzzy("anything", ["array", "of", "string"], None).is_ok());
    assert!(fuzzy("anything", 42, None).is_ok());

    for bad in [Arg::Map(vec![]), Arg::from(f64::NAN)] {
        assert!(
            matches!(
                fuzzy("anything", bad.clone(), None),
                Err(PredicateError::InvalidKeys { .. })
            ),
            "{bad:?} should be rejected"
        );
    }
}

#[test]
fn predicate_can_be_used_multiple_times() {
    let predicate = fuzzy("foo", Arg::Absent, None).unwrap();

    let first = ["food", "foo", "bar"];
    assert_eq!(predicate.filter(&first), [&"food", &"foo"]);

    let second = ["food", "is", "delicious"];
    assert_eq!(predicate.filter(&second), [&"food"]);
}

// ============================================================================
// Candidate shapes
// ============================================================================

struct Callback;

impl Haystack for Callback {
    fn candidate(&self) -> Candidate<'_> {
        Candidate::Unsupported
    }
}

#[test]
fn assorted_types_match_only_numbers_and_text() {
    let haystack = vec![json!(null), json!(true), json!(42), json!("42"), json!({})];
    let predicate = fuzzy(42, Arg::Absent, None).unwrap();

    assert_eq!(predicate.filter(&haystack), [&json!(42), &json!("42")]);
    assert!(!predicate.matches(&Callback));
}

#[test]
fn strings_containing_the_query() {
    let haystack = [
        "John Doe",
        "To John Doe",
        "jdoe",
        "john-doe",
        "Jane Smith",
        "DOE, JOHN",
    ];

    let jane = fuzzy("Jane", Arg::Absent, None).unwrap();
    assert_eq!(jane.filter(&haystack), [&"Jane Smith"]);

    let doe = fuzzy("Doe", Arg::Absent, None).unwrap();
    assert_eq!(
        doe.filter(&haystack),
        [&"John Doe", &"To John Doe", &"jdoe", &"john-doe", &"DOE, JOHN"]
    );

    for query in ["John Doe", "JOHN_DOE"] {
        let predicate = fuzzy(query, Arg::Absent, None).unwrap();
        assert_eq!(
            predicate.filter(&haystack),
            [&"John Doe", &"To John Doe", &"john-doe"],
            "query {query:?}"
        );
    }
}

#[test]
fn non_ascii_characters_are_ignored() {
    let elodie = fuzzy("Élodie", Arg::Absent, None).unwrap();
    assert!(elodie.matches("Elodie"));
    assert!(elodie.matches("Mélodie"));
    assert!(!elodie.matches("Eloise"));

    // Nothing is left of the query, so every text contains it.
    let tokyo = fuzzy("東京", Arg::Absent, None).unwrap();
    assert!(tokyo.matches("Osaka"));
    assert!(tokyo.matches(""));
    assert!(!tokyo.matches(&json!(42)));
}

#[test]
fn numbers_only_match_exactly() {
    let haystack = [4, 42, 420, 444];

    assert_eq!(fuzzy(4, Arg::Absent, None).unwrap().filter(&haystack), [&4]);
    assert_eq!(fuzzy("4", Arg::Absent, None).unwrap().filter(&haystack), [&4]);
}

#[test]
fn objects_are_searched_by_value() {
    let haystack = records();

    let foo = fuzzy("foo", Arg::Absent, None).unwrap();
    assert_eq!(foo.filter(&haystack), select(&haystack, &[0, 3, 4]));

    let forty_two = fuzzy("42", Arg::Absent, None).unwrap();
    assert_eq!(forty_two.filter(&haystack), select(&haystack, &[0, 1, 4]));
}

#[test]
fn objects_are_searched_only_under_given_keys() {
    let haystack = records();

    let by_name = fuzzy("foo", "name", None).unwrap();
    assert_eq!(by_name.filter(&haystack), select(&haystack, &[0]));

    let by_name_or_bar = fuzzy("foo", ["name", "bar"], None).unwrap();
    assert_eq!(by_name_or_bar.filter(&haystack), select(&haystack, &[0, 3]));

    let by_id = fuzzy("foo", "id", None).unwrap();
    assert!(!by_id.matches(&haystack[0]));
}

#[test]
fn mixed_values_follow_the_same_rules() {
    let haystack = mixed();

    let john_doe = fuzzy("john_doe", Arg::Absent, None).unwrap();
    assert_eq!(john_doe.filter(&haystack), select(&haystack, &[1, 5, 6]));

    let text_42 = fuzzy("42", Arg::Absent, None).unwrap();
    assert_eq!(
        text_42.filter(&haystack),
        select(&haystack, &[0, 1, 4, 9, 11, 13])
    );

    let number_4 = fuzzy(4, Arg::Absent, None).unwrap();
    assert_eq!(
        number_4.filter(&haystack),
        select(&haystack, &[1, 4, 10, 11, 12, 13])
    );
}

#[test]
fn rust_collections_are_haystacks() {
    let mut contact = HashMap::new();
    contact.insert("name".to_string(), "Foo Bar".to_string());
    contact.insert("city".to_string(), "Lisbon".to_string());

    assert!(fuzzy("lisbon", Arg::Absent, None).unwrap().matches(&contact));
    assert!(!fuzzy("lisbon", "name", None).unwrap().matches(&contact));

    let nested: Vec<Vec<Option<i64>>> = vec![vec![None, Some(7)], vec![]];
    assert!(fuzzy(7, Arg::Absent, None).unwrap().matches(&nested));
    assert!(!fuzzy(8, Arg::Absent, None).unwrap().matches(&nested));
}

struct Account {
    owner: String,
    tags: Vec<String>,
    balance: f64,
}

impl Haystack for Account {
    fn candidate(&self) -> Candidate<'_> {
        Candidate::composite([
            (Key::Name("owner"), &self.owner as &dyn Haystack),
            (Key::Name("tags"), &self.tags as &dyn Haystack),
            (Key::Name("balance"), &self.balance as &dyn Haystack),
        ])
    }
}

#[test]
fn custom_records_are_haystacks() {
    let accounts = vec![
        Account {
            owner: "Ada Lovelace".into(),
            tags: vec!["vip".into(), "early-adopter".into()],
            balance: 10.5,
        },
        Account {
            owner: "Grace Hopper".into(),
            tags: vec![],
            balance: 0.0,
        },
    ];

    let adopter = fuzzy("Early Adopter", Arg::Absent, None).unwrap();
    assert_eq!(adopter.position(&accounts), Some(0));

    // Restriction names the container; its indices are then filtered too.
    let tags_only = fuzzy("vip", "tags", None).unwrap();
    assert_eq!(tags_only.count(&accounts), 0);
    let tags_and_first = fuzzy("vip", ["tags", "0"], None).unwrap();
    assert_eq!(tags_and_first.count(&accounts), 1);

    let broke = fuzzy("0", "balance", None).unwrap();
    assert_eq!(broke.position(&accounts), Some(1));
}

// ============================================================================
// Similarity mode
// ============================================================================

#[test]
fn similarity_threshold_allows_typos() {
    let haystack = ["John Doe", "Jon Dough", "Jane Smith"];

    let substring = fuzzy("jon doe", Arg::Absent, None).unwrap();
    assert!(substring.filter(&haystack).is_empty());

    let similar = fuzzy("jon doe", 0.6, None).unwrap();
    assert_eq!(similar.filter(&haystack), [&"John Doe", &"Jon Dough"]);
}

#[test]
fn zero_threshold_means_substring_mode() {
    let haystack = ["John Doe", "Jane Smith"];
    let predicate = fuzzy("doe", Arg::Absent, Some(0.0)).unwrap();
    assert!(!predicate.uses_similarity());
    assert_eq!(predicate.filter(&haystack), [&"John Doe"]);
}

#[test]
fn metrics_can_be_swapped() {
    for metric in Metric::ALL {
        let predicate = FuzzyPredicate::builder("johndoe")
            .threshold(0.99)
            .metric(metric)
            .build()
            .unwrap();
        assert!(predicate.matches("John Doe"), "{metric}");
        assert!(!predicate.matches("Jane Smith"), "{metric}");
    }
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn one_predicate_shared_across_threads() {
    let predicate = Arc::new(fuzzy("doe", Arg::Absent, None).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let predicate = Arc::clone(&predicate);
            thread::spawn(move || {
                let values = vec![json!(format!("doe #{i}")), json!("smith"), json!(i)];
                predicate.count(&values)
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 1);
    }
}
