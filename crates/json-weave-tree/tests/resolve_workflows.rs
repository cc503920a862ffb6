use json_weave_path::parse_path;
use json_weave_tree::{
    annotate, clean_dangling, extract_references, get, link, locate, set, strip, uid_of,
    RefStyle, Resolver, SequenceUidGenerator,
};
use serde_json::json;

#[test]
fn annotate_locate_get_agree() {
    let mut gen = SequenceUidGenerator::new("n");
    let tree = annotate(
        &json!({"docs": [{"title": "a"}, {"title": "b"}], "meta": {"lang": "en"}}),
        &mut gen,
    );

    for probe in ["docs[0]", "docs[1]", "meta"] {
        let node = get(&tree, probe).unwrap();
        let uid = uid_of(node).unwrap();
        let located = locate(&tree, uid).unwrap();
        assert_eq!(get(&tree, located.as_slice()), Some(node), "probing {probe}");
    }
}

#[test]
fn link_then_resolve_dedupes_shared_content() {
    let mut gen = SequenceUidGenerator::new("n");
    let tree = annotate(
        &json!({
            "assets": {"logo": {"kind": "image", "url": "https://x/logo.png"}},
            "pages": [{"title": "home"}, {"title": "about"}]
        }),
        &mut gen,
    );
    let logo_uid = uid_of(&tree["assets"]["logo"]).unwrap().to_string();

    let tree = link(&tree, "pages[0].hero", &logo_uid, RefStyle::Object).unwrap();
    let tree = link(&tree, "pages[1].hero", &logo_uid, RefStyle::Object).unwrap();

    let mut resolver = Resolver::new(&tree);
    let out = resolver.resolve(&tree, &tree);

    // The canonical copy stays where the content lives; both pages point
    // at it by path.
    assert_eq!(out["assets"]["logo"], tree["assets"]["logo"]);
    assert_eq!(out["pages"][0]["hero"], json!({"$ref": "assets.logo"}));
    assert_eq!(out["pages"][1]["hero"], json!({"$ref": "assets.logo"}));
    assert_eq!(
        resolver.first_occurrences().get(&logo_uid),
        Some(&parse_path("assets.logo"))
    );
}

#[test]
fn self_and_ancestor_edges_are_rejected() {
    let mut gen = SequenceUidGenerator::new("n");
    let tree = annotate(&json!({"a": {"b": {"c": 1}}}), &mut gen);
    let a_uid = uid_of(&tree["a"]).unwrap().to_string();

    // Writing a's marker under a itself would nest the node in itself.
    assert!(link(&tree, "a.b.loop", &a_uid, RefStyle::Object).is_err());
    // Writing it elsewhere is fine.
    assert!(link(&tree, "elsewhere", &a_uid, RefStyle::Object).is_ok());
}

#[test]
fn deleting_a_target_leaves_a_dangling_marker_that_cleans_to_null() {
    let mut gen = SequenceUidGenerator::new("n");
    let tree = annotate(&json!({"lib": {"n": 1}, "doc": {}}), &mut gen);
    let lib_uid = uid_of(&tree["lib"]).unwrap().to_string();
    let tree = link(&tree, "doc.uses", &lib_uid, RefStyle::Object).unwrap();

    // Drop the target; the marker now dangles.
    let tree = set(&tree, "lib", json!(null)).unwrap();
    assert_eq!(extract_references(&tree).len(), 1);

    let cleaned = clean_dangling(&tree, &tree);
    assert_eq!(cleaned["doc"]["uses"], json!(null));
}

#[test]
fn legacy_markers_resolve_like_object_markers() {
    let tree = json!({
        "lib": {"$uid": "u1", "n": 1},
        "doc": {"uses": "$ref:u1"}
    });
    let mut resolver = Resolver::new(&tree);
    let out = resolver.resolve(&tree, &tree);
    assert_eq!(out["doc"]["uses"], json!({"$ref": "lib"}));
}

#[test]
fn strip_removes_uids_at_every_depth_after_a_session() {
    let mut gen = SequenceUidGenerator::new("n");
    let original = json!({"a": [{"b": 1}], "c": {"d": {"e": 2}}});
    let tree = annotate(&original, &mut gen);
    let tree = set(&tree, "c.d.f", json!(3)).unwrap();

    let out = strip(&tree);
    assert_eq!(out, json!({"a": [{"b": 1}], "c": {"d": {"e": 2, "f": 3}}}));
}

#[test]
fn resolved_path_references_read_back_with_the_path_grammar() {
    let tree = json!({
        "lib": {"$uid": "u1", "n": 1},
        "xs": [{"$ref": "u1"}, {"$ref": "u1"}]
    });
    let mut resolver = Resolver::new(&tree);
    let out = resolver.resolve(&tree, &tree);

    let pointer = out["xs"][1]["$ref"].as_str().unwrap();
    let target = get(&out, parse_path(pointer).as_slice()).unwrap();
    assert_eq!(target, &tree["lib"]);
}
