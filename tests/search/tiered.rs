//! Tier assignment and ordering across the five tiers.

use crate::common::{index_of, tiers, titles};
use wikidex::{search, Tier};

#[test]
fn every_tier_in_one_result_list() {
    let index = index_of(&["Rock", "Rockets", "Punk rock", "Bedrock", "rock and roll"]);
    let hits = search(&index, "rock", 50);

    assert_eq!(
        titles(&hits),
        vec!["Rock", "rock and roll", "Rockets", "Punk rock", "Bedrock"]
    );
    assert_eq!(
        tiers(&hits),
        vec![Tier::Exact, Tier::Prefix, Tier::Prefix, Tier::Word, Tier::Fragment]
    );
}

#[test]
fn substring_outside_prefix_bucket_is_a_fragment() {
    // "urban" never lands in the "ban" bucket, so only the vocabulary scan finds it.
    let index = index_of(&["Urban"]);
    let hits = search(&index, "ban", 50);
    assert_eq!(titles(&hits), vec!["Urban"]);
    assert_eq!(tiers(&hits), vec![Tier::Fragment]);
}

#[test]
fn two_char_query_uses_two_char_bucket() {
    let index = index_of(&["Abba", "Abe", "Crab"]);
    let hits = search(&index, "ab", 50);
    assert_eq!(titles(&hits), vec!["Abba", "Abe", "Crab"]);
    assert_eq!(tiers(&hits), vec![Tier::Prefix, Tier::Prefix, Tier::Fragment]);
}

#[test]
fn word_tier_runs_only_below_limit() {
    let index = index_of(&["Pie", "Pie chart", "Apple pie"]);

    let hits = search(&index, "pie", 2);
    assert_eq!(titles(&hits), vec!["Pie", "Pie chart"]);

    let hits = search(&index, "pie", 3);
    assert_eq!(titles(&hits), vec!["Pie", "Pie chart", "Apple pie"]);
    assert_eq!(hits[2].tier, Tier::Word);
}

#[test]
fn accented_prefix() {
    let index = index_of(&["École", "Éclair", "Ecology"]);
    let hits = search(&index, "éc", 50);
    assert_eq!(titles(&hits), vec!["Éclair", "École"]);
    assert!(hits.iter().all(|hit| hit.tier == Tier::Prefix));
}

#[test]
fn query_case_does_not_matter() {
    let index = index_of(&["Banana", "Banana Split"]);
    assert_eq!(search(&index, "BAN", 50), search(&index, "ban", 50));
    assert_eq!(search(&index, "BaNaNa", 50)[0].tier, Tier::Exact);
}

#[test]
fn prefix_scan_stops_at_twice_the_limit() {
    // Four substring hits fill the 2 × 2 ceiling before the bucket reaches
    // the true prefix match, which would otherwise sort first.
    let index = index_of(&[
        "Abcxabcq1",
        "Abcxabcq2",
        "Abcxabcq3",
        "Abcxabcq4",
        "Abcxabcq5",
        "Abcxabcq6",
        "Abcqz",
    ]);
    let hits = search(&index, "abcq", 2);
    assert_eq!(titles(&hits), vec!["Abcxabcq1", "Abcxabcq2"]);
    assert_eq!(tiers(&hits), vec![Tier::Substring, Tier::Substring]);

    let hits = search(&index, "abcq", 50);
    assert_eq!(hits[0].title, "Abcqz");
    assert_eq!(hits[0].tier, Tier::Prefix);
}

#[test]
fn word_bucket_is_read_three_times_the_limit_deep() {
    // Only the first 3 × 1 titles holding "zeta" are considered.
    let index = index_of(&["Xa zeta", "Xb zeta", "Xc zeta", "Aa zeta"]);
    let hits = search(&index, "zeta", 1);
    assert_eq!(titles(&hits), vec!["Xa zeta"]);
    assert_eq!(tiers(&hits), vec![Tier::Word]);

    let hits = search(&index, "zeta", 2);
    assert_eq!(titles(&hits), vec!["Aa zeta", "Xa zeta"]);
}

#[test]
fn fragment_takes_limit_titles_per_word() {
    // "beta" is the only word containing "eta"; one title is taken from it.
    let index = index_of(&["Zb beta", "Zc beta", "Ab beta"]);
    let hits = search(&index, "eta", 1);
    assert_eq!(titles(&hits), vec!["Zb beta"]);
    assert_eq!(tiers(&hits), vec![Tier::Fragment]);

    let hits = search(&index, "eta", 3);
    assert_eq!(titles(&hits), vec!["Ab beta", "Zb beta", "Zc beta"]);
}

#[test]
fn fragment_scan_stops_at_twice_the_limit() {
    // Words are scanned in order: beta, geta, meta. Two hits reach the
    // 2 × 1 ceiling before "meta" is read.
    let index = index_of(&["Zb beta", "Zg geta", "Am meta"]);
    let hits = search(&index, "eta", 1);
    assert_eq!(titles(&hits), vec!["Zb beta"]);

    let hits = search(&index, "eta", 3);
    assert_eq!(titles(&hits), vec!["Am meta", "Zb beta", "Zg geta"]);
}
