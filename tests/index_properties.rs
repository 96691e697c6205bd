//! Property tests for the heap and both trees.
//!
//! Arbitrary insert sequences must keep heap order, search-tree order and
//! AVL balance.

mod fixtures;

use std::collections::{BTreeSet, HashMap};

use proptest::prelude::*;

use civic_index::issue::{Category, Issue};
use civic_index::priority_queue::PriorityQueue;
use civic_index::recency_index::RecencyIndex;
use civic_index::ticket_index::{TicketIndex, compare_tickets};

use fixtures::issue;

fn category() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

/// Issues with random tickets, categories and update offsets.
fn issues(max: usize) -> impl Strategy<Value = Vec<Issue>> {
    prop::collection::vec(("[A-Fa-f0-9]{1,4}", category(), -600i64..600), 0..max).prop_map(|rows| {
        rows.into_iter()
            .map(|(suffix, category, minutes)| {
                let mut issue = issue(&format!("MS-{}", suffix), category, "Ward A", minutes);
                issue.assign_priority();
                issue
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn extract_min_never_exceeds_remaining(items in issues(64)) {
        let mut queue = PriorityQueue::new();
        for item in items {
            queue.insert(item);
        }
        while let Some(min) = queue.extract_min() {
            prop_assert!(queue.iter().all(|rest| min.priority <= rest.priority));
        }
    }

    #[test]
    fn build_heap_matches_sorted_priorities(items in issues(64)) {
        let mut expected: Vec<u8> = items.iter().map(|i| i.priority).collect();
        expected.sort_unstable();

        let mut queue = PriorityQueue::from_items(items);
        let drained: Vec<u8> = std::iter::from_fn(|| queue.extract_min()).map(|i| i.priority).collect();
        prop_assert_eq!(drained, expected);
    }

    #[test]
    fn ticket_search_returns_first_insert(items in issues(64)) {
        let mut index = TicketIndex::new();
        let mut first: HashMap<String, Issue> = HashMap::new();
        for item in &items {
            first.entry(item.ticket.to_uppercase()).or_insert_with(|| item.clone());
            index.insert(item.clone());
        }

        prop_assert_eq!(index.count(), first.len());
        for (key, original) in &first {
            prop_assert_eq!(index.search(key), Some(original));
        }
        prop_assert!(index.search("MS-ZZZZZ").is_none());

        let ordered = index.in_order_list();
        prop_assert!(ordered
            .windows(2)
            .all(|w| compare_tickets(&w[0].ticket, &w[1].ticket).is_lt()));
    }

    #[test]
    fn recency_stays_balanced_after_every_insert(items in issues(128)) {
        let mut index = RecencyIndex::new();
        let mut stamps = BTreeSet::new();
        for item in items {
            stamps.insert(item.last_updated);
            index.insert(item);
            prop_assert!(index.is_balanced());
        }

        prop_assert_eq!(index.len(), stamps.len());
        let ordered: Vec<_> = index.in_order_list().iter().map(|i| i.last_updated).collect();
        prop_assert_eq!(ordered, stamps.into_iter().collect::<Vec<_>>());
    }
}

#[test]
fn duplicate_ticket_leaves_count_and_original() {
    let mut index = TicketIndex::new();
    let original = issue("MS-1A2B3C4D", Category::Water, "Ward A", 0);
    index.insert(original.clone());
    index.insert(issue("ms-1a2b3c4d", Category::Roads, "Ward C", 5));

    assert_eq!(index.count(), 1);
    assert_eq!(index.search("MS-1A2B3C4D"), Some(&original));
}

#[test]
fn build_heap_on_descending_priorities() {
    let items: Vec<Issue> = (1..=10u8)
        .rev()
        .map(|p| issue(&format!("MS-{:08}", p), Category::Other, "Ward A", i64::from(p)).with_priority(p))
        .collect();

    let mut queue = PriorityQueue::new();
    queue.build_heap(items);
    let order: Vec<u8> = std::iter::from_fn(|| queue.extract_min()).map(|i| i.priority).collect();
    assert_eq!(order, (1..=10).collect::<Vec<_>>());
}
