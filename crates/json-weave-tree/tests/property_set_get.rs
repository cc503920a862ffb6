use json_weave_path::PathStep;
use json_weave_tree::{get, set};
use proptest::prelude::*;
use serde_json::{json, Value};

fn key_step() -> impl Strategy<Value = PathStep> {
    "[a-d]{1,3}".prop_map(PathStep::Key)
}

// Paths start at a key (the root fixture is a mapping) and use index 0
// so that the vivified element is the one read back.
fn step() -> impl Strategy<Value = PathStep> {
    prop_oneof![
        3 => key_step(),
        1 => Just(PathStep::Index(0)),
    ]
}

fn path() -> impl Strategy<Value = Vec<PathStep>> {
    (key_step(), proptest::collection::vec(step(), 0..6)).prop_map(|(first, mut rest)| {
        rest.insert(0, first);
        rest
    })
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        "[a-z]{0,8}".prop_map(Value::String),
    ]
}

proptest! {
    #[test]
    fn set_then_get_round_trips(path in path(), value in scalar()) {
        let updated = set(&json!({}), path.clone(), value.clone()).unwrap();
        prop_assert_eq!(get(&updated, path.as_slice()), Some(&value));
    }

    #[test]
    fn second_write_wins(path in path(), a in scalar(), b in scalar()) {
        let once = set(&json!({}), path.clone(), a).unwrap();
        let twice = set(&once, path.clone(), b.clone()).unwrap();
        prop_assert_eq!(get(&twice, path.as_slice()), Some(&b));
    }

    #[test]
    fn set_never_mutates_its_input(path in path(), value in scalar()) {
        let original = json!({"pinned": {"n": 1}});
        let before = original.clone();
        let _ = set(&original, path, value);
        prop_assert_eq!(original, before);
    }
}
