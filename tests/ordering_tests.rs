use prep_portal::models::ExamCategory;
use prep_portal::ordering::{POPULARITY, sort_by_popularity, sort_categories};
use uuid::Uuid;

fn category(name: &str, slug: &str) -> ExamCategory {
    ExamCategory {
        id: Uuid::new_v4(),
        name: name.to_string(),
        slug: slug.to_string(),
        description: None,
        is_active: true,
        child_count: 0,
    }
}

#[test]
fn test_ssc_ranks_first() {
    assert_eq!(POPULARITY.first(), Some(&"ssc"));
}

#[test]
fn test_ranked_before_unranked() {
    // Alphabetical input: every unranked name sorts before "SSC" by name,
    // but the popularity rank must win.
    let mut categories = vec![
        category("Aviation", "aviation"),
        category("Medical Entrance", "medical"),
        category("SSC Exams", "ssc"),
        category("Banking", "banking"),
    ];

    sort_categories(&mut categories);

    let slugs: Vec<&str> = categories.iter().map(|c| c.slug.as_str()).collect();
    assert_eq!(slugs, vec!["ssc", "banking", "aviation", "medical"]);
}

#[test]
fn test_ranked_items_keep_rank_order_not_alphabetical() {
    let mut categories = vec![
        category("Banking", "banking"),
        category("Defence", "defence"),
        category("UPSC", "upsc"),
        category("Railways", "railways"),
    ];

    sort_categories(&mut categories);

    let slugs: Vec<&str> = categories.iter().map(|c| c.slug.as_str()).collect();
    // Rank order from the popularity list, not alphabetical.
    assert_eq!(slugs, vec!["upsc", "banking", "railways", "defence"]);
}

#[test]
fn test_unranked_tail_is_alphabetical_by_name() {
    let mut categories = vec![
        category("Zoology Olympiad", "zoology"),
        category("Aviation", "aviation"),
        category("Medical Entrance", "medical"),
    ];

    sort_categories(&mut categories);

    let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Aviation", "Medical Entrance", "Zoology Olympiad"]);
}

#[test]
fn test_sort_is_stable_for_equal_keys() {
    // Two entries with the same (unranked) slug and name keep their
    // relative input order.
    let first = category("Duplicate", "dup");
    let second = category("Duplicate", "dup");
    let first_id = first.id;
    let second_id = second.id;

    let mut categories = vec![first, second];
    sort_categories(&mut categories);

    assert_eq!(categories[0].id, first_id);
    assert_eq!(categories[1].id, second_id);
}

#[test]
fn test_generic_sort_with_custom_keys() {
    let mut pairs = vec![
        ("beta", "unranked-b"),
        ("ssc", "SSC"),
        ("alpha", "unranked-a"),
    ];

    sort_by_popularity(&mut pairs, |p| p.0, |p| p.1);

    assert_eq!(pairs[0].0, "ssc");
    assert_eq!(pairs[1].1, "unranked-a");
    assert_eq!(pairs[2].1, "unranked-b");
}

#[test]
fn test_empty_and_single_element_inputs() {
    let mut empty: Vec<ExamCategory> = vec![];
    sort_categories(&mut empty);
    assert!(empty.is_empty());

    let mut single = vec![category("Banking", "banking")];
    sort_categories(&mut single);
    assert_eq!(single[0].slug, "banking");
}
