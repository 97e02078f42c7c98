use apple_dict_reader::appledict::markup::{find_at_least_one, find_at_most_one, find_exactly_one, MarkupTree, Query};
use apple_dict_reader::AppleDictError;

const SAMPLE: &str = concat!(
    r#"<d:entry d:title="caf&#233;"><span class="hg top"><span class="hw">café</span></span>"#,
    r#"<span class="sg"><span class="msDict"><span class="gg">local</span><span class="df">a small restaurant</span></span>"#,
    r#"<span class="gg">global</span><span class="msDict"><span class="df">a bar</span></span></span></d:entry>"#,
);

#[test]
fn elements_expose_tag_attributes_and_classes() {
    let tree = MarkupTree::parse(SAMPLE).expect("markup parses");
    let entry = find_exactly_one(tree.root(), &Query::tag("d:entry")).expect("entry root");
    assert_eq!(entry.tag(), Some("d:entry"));
    assert_eq!(entry.attr("d:title"), Some("café"));
    assert_eq!(entry.attr("missing"), None);

    let head = find_exactly_one(entry, &Query::span("hg")).expect("head group");
    assert!(head.has_class("top"));
    assert_eq!(head.classes().collect::<Vec<_>>(), vec!["hg", "top"]);
    assert_eq!(head.parent(), Some(entry));
}

#[test]
fn text_is_recursive_and_entities_are_resolved() {
    let tree = MarkupTree::parse(r#"<p>fish &amp; chips<b>&nbsp;x</b> &#x263A;</p>"#).expect("markup parses");
    let text = tree.plain_text();
    assert!(text.starts_with("fish & chips\u{a0}x"), "got {:?}", text);
    assert!(text.contains('\u{263a}'), "got {:?}", text);
}

#[test]
fn unknown_entities_are_kept_verbatim() {
    let tree = MarkupTree::parse("<p>a &madeup; b</p>").expect("markup parses");
    assert_eq!(tree.plain_text(), "a &madeup; b");
}

#[test]
fn html_named_entities_are_resolved() {
    let tree = MarkupTree::parse("<p>caf&eacute; &aacute;cido na&iuml;ve</p>").expect("markup parses");
    assert_eq!(tree.plain_text(), "café ácido naïve");
}

#[test]
fn unknown_entity_does_not_block_its_neighbours() {
    let tree = MarkupTree::parse("<p>AT&amp;T &madeup; x &#233;</p>").expect("markup parses");
    assert_eq!(tree.plain_text(), "AT&T &madeup; x é");
}

#[test]
fn bare_ampersands_are_kept() {
    let tree = MarkupTree::parse("<p>salt & pepper &amp oil &lt;</p>").expect("markup parses");
    assert_eq!(tree.plain_text(), "salt & pepper &amp oil <");
}

#[test]
fn attribute_entities_are_resolved() {
    let tree = MarkupTree::parse(r#"<d:entry d:title="na&iuml;ve &amp; &bogus;">x</d:entry>"#).expect("markup parses");
    let entry = find_exactly_one(tree.root(), &Query::tag("d:entry")).expect("entry root");
    assert_eq!(entry.attr("d:title"), Some("naïve & &bogus;"));
}

#[test]
fn plain_text_without_tags_is_accepted() {
    let tree = MarkupTree::parse("rock &amp; roll").expect("text parses");
    assert_eq!(tree.plain_text(), "rock & roll");
}

#[test]
fn direct_text_runs_skip_nested_elements() {
    let tree = MarkupTree::parse(r#"<span class="hw">lead<span class="tg_hw">2</span> pipe</span>"#).expect("markup parses");
    let headword = find_exactly_one(tree.root(), &Query::span("hw")).expect("headword");
    assert_eq!(headword.direct_text_runs().collect::<Vec<_>>(), vec!["lead", " pipe"]);
    assert_eq!(headword.text(), "lead2 pipe");

    let kinds: Vec<(bool, bool)> = headword.children().map(|c| (c.is_element(), c.is_text())).collect();
    assert_eq!(kinds, vec![(false, true), (true, false), (false, true)]);
    assert!(!tree.root().is_element());
}

#[test]
fn exactly_one_fails_on_zero_or_many() {
    let tree = MarkupTree::parse(SAMPLE).expect("markup parses");
    let root = tree.root();

    let zero = find_exactly_one(root, &Query::span("etym"));
    assert!(matches!(zero, Err(AppleDictError::ParseAssumption(_))));

    let many = find_exactly_one(root, &Query::span("msDict"));
    assert!(matches!(many, Err(AppleDictError::ParseAssumption(_))));

    let one = find_exactly_one(root, &Query::span("sg")).expect("one definition group");
    assert_eq!(one.tag(), Some("span"));
}

#[test]
fn at_most_one_returns_none_for_zero_and_fails_for_many() {
    let tree = MarkupTree::parse(SAMPLE).expect("markup parses");
    let root = tree.root();

    assert!(find_at_most_one(root, &Query::span("etym")).expect("zero is fine").is_none());
    assert!(find_at_most_one(root, &Query::span("hw")).expect("one is fine").is_some());
    assert!(matches!(
        find_at_most_one(root, &Query::span("df")),
        Err(AppleDictError::ParseAssumption(_))
    ));
}

#[test]
fn at_least_one_preserves_document_order() {
    let tree = MarkupTree::parse(SAMPLE).expect("markup parses");
    let definitions = find_at_least_one(tree.root(), &Query::span("df")).expect("definitions");
    let texts: Vec<String> = definitions.iter().map(|d| d.text()).collect();
    assert_eq!(texts, vec!["a small restaurant", "a bar"]);

    assert!(matches!(
        find_at_least_one(tree.root(), &Query::span("xr")),
        Err(AppleDictError::ParseAssumption(_))
    ));
}

#[test]
fn direct_queries_ignore_grandchildren() {
    let tree = MarkupTree::parse(SAMPLE).expect("markup parses");
    let group = find_exactly_one(tree.root(), &Query::span("sg")).expect("definition group");

    assert_eq!(group.find_all(&Query::span("gg")).len(), 2);
    let direct = group.find_all(&Query::span("gg").direct());
    assert_eq!(direct.len(), 1);
    assert_eq!(direct[0].text(), "global");
}

#[test]
fn barrier_class_hides_nested_matches() {
    let tree = MarkupTree::parse(SAMPLE).expect("markup parses");
    let group = find_exactly_one(tree.root(), &Query::span("sg")).expect("definition group");

    let outside = group.find_all(&Query::span("gg").outside("msDict"));
    assert_eq!(outside.len(), 1);
    assert_eq!(outside[0].text(), "global");
}

#[test]
fn self_closing_elements_become_leaves() {
    let tree = MarkupTree::parse(r#"<p>one<br/>two<img src="x.png"/></p>"#).expect("markup parses");
    let images = tree.root().find_all(&Query::tag("img"));
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].attr("src"), Some("x.png"));
    assert_eq!(images[0].children().count(), 0);
    assert_eq!(tree.plain_text(), "onetwo");
}
