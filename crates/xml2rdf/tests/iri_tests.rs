use xml2rdf::model::iri::{escape, IdAllocator, IdStrategy, IdTransform};
use xml2rdf::model::vocabulary::is_blank_node;

// --- Sequential ---

#[test]
fn sequential_ids_count_up_from_zero() {
    let mut ids = IdAllocator::new(IdStrategy::Sequential);
    assert_eq!(ids.allocate("http://ignored/"), "_:n0");
    assert_eq!(ids.allocate(""), "_:n1");
    assert_eq!(ids.allocate(""), "_:n2");
    assert_eq!(ids.allocated(), 3);
}

#[test]
fn fresh_allocator_restarts_the_sequence() {
    let mut first = IdAllocator::new(IdStrategy::Sequential);
    first.allocate("");
    first.allocate("");
    let mut second = IdAllocator::new(IdStrategy::Sequential);
    assert_eq!(second.allocate(""), "_:n0");
}

#[test]
fn sequential_ids_are_blank_nodes() {
    let mut ids = IdAllocator::new(IdStrategy::Sequential);
    assert!(is_blank_node(&ids.allocate("")));
}

// --- Random ---

#[test]
fn random_ids_use_namespace_and_uuid() {
    let mut ids = IdAllocator::new(IdStrategy::RandomUnique);
    let a = ids.allocate("http://example.org/ns/");
    let b = ids.allocate("http://example.org/ns/");
    assert!(a.starts_with("http://example.org/ns/"));
    assert_eq!(a.len(), "http://example.org/ns/".len() + 36);
    assert_ne!(a, b);
    assert!(!is_blank_node(&a));
    assert_eq!(ids.allocated(), 0);
}

// --- Attribute transforms ---

#[test]
fn verbatim_transform_keeps_value() {
    assert_eq!(
        IdTransform::Verbatim.apply("http://example.org/item/1"),
        "http://example.org/item/1"
    );
}

#[test]
fn prefix_transform_percent_encodes_value() {
    let t = IdTransform::Prefix {
        prefix: "http://example.org/item/".to_string(),
    };
    assert_eq!(t.apply("a b/c"), "http://example.org/item/a%20b%2Fc");
}

#[test]
fn escape_keeps_unreserved_characters() {
    assert_eq!(escape("abc-_.~123"), "abc-_.~123");
    assert_eq!(escape("x:y#z"), "x%3Ay%23z");
}
