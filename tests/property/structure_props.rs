//! Invariants of the segment map, the article cache, and the line parser.

use std::collections::BTreeSet;
use std::sync::Arc;

use proptest::prelude::*;

use wikidex::archive::parse_line;
use wikidex::{Article, ArticleCache, SegmentMap};

fn article(title: &str) -> Arc<Article> {
    Arc::new(Article {
        title: title.to_string(),
        content: String::new(),
        categories: Vec::new(),
    })
}

proptest! {
    #[test]
    fn segment_sizes_reach_next_offset(offsets in prop::collection::vec(0u64..1_000_000, 1..50)) {
        let map = SegmentMap::from_offsets(offsets.iter().copied(), 4096);
        let sorted: Vec<u64> = offsets.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();

        prop_assert_eq!(map.len(), sorted.len());
        for pair in sorted.windows(2) {
            prop_assert_eq!(map.size_for(pair[0]), pair[1] - pair[0]);
        }
        prop_assert_eq!(map.size_for(*sorted.last().unwrap()), 4096);
    }

    #[test]
    fn unknown_offsets_get_default_window(offsets in prop::collection::vec(0u64..1000, 0..20), unknown in 1000u64..2000) {
        let map = SegmentMap::from_offsets(offsets, 777);
        prop_assert_eq!(map.size_for(unknown), 777);
    }

    #[test]
    fn cache_never_exceeds_capacity(capacity in 1u32..8, titles in prop::collection::vec("[a-e]", 0..60)) {
        let cache = ArticleCache::new(capacity);
        for title in &titles {
            cache.put(title.clone(), article(title));
            prop_assert!(cache.len() <= capacity as usize);
        }
        if let Some(last) = titles.last() {
            prop_assert!(cache.contains(last));
        }
    }

    #[test]
    fn cache_evicts_least_recent(capacity in 1u32..6) {
        let cache = ArticleCache::new(capacity);
        for i in 0..=capacity {
            cache.put(format!("T{i}"), article(&format!("T{i}")));
        }
        prop_assert!(!cache.contains("T0"));
        for i in 1..=capacity {
            let title = format!("T{i}");
            prop_assert!(cache.contains(&title));
        }
    }

    #[test]
    fn title_keeps_everything_after_second_colon(
        offset in any::<u64>(),
        page_id in any::<u64>(),
        title in "[A-Za-z][A-Za-z :]{0,20}[A-Za-z]",
    ) {
        let entry = parse_line(&format!("{offset}:{page_id}:{title}")).unwrap();
        prop_assert_eq!(entry.offset, offset);
        prop_assert_eq!(entry.page_id, page_id);
        prop_assert_eq!(entry.title, title);
    }
}
