//! Reserved namespaces stay out of search but resolve by exact title.

use crate::common::{memory_source, titles};
use wikidex::{Config, IndexOutcome, Library};

#[test]
fn hidden_from_search_but_in_catalog() {
    let library = Library::new(Config::default());
    let report = library
        .indexer_from(memory_source(
            "100:1:Fruit\n100:2:Template:Fruit\n100:3:Portal:Fruit\n100:4:Talk:Fruit\n",
        ))
        .run()
        .unwrap();

    assert_eq!(report.outcome, IndexOutcome::Completed);
    assert_eq!(report.titles, 4);
    assert_eq!(library.search_index().len(), 1);

    assert_eq!(titles(&library.search("fruit")), vec!["Fruit"]);
    assert!(library.search("template").is_empty());
    assert!(library.catalog().contains("Template:Fruit"));
    assert!(library.catalog().contains("Talk:Fruit"));
}
