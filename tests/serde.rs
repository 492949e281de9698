use immap::{IMap, ISet};

#[test]
fn map_serializes_as_object() {
    let map = IMap::from([("a".to_string(), 1)]);
    let json = serde_json::to_string(&map).expect("serialize");
    assert_eq!(json, r#"{"a":1}"#);
}

#[test]
fn map_deserializes_from_object() {
    let map: IMap<String, u32> = serde_json::from_str(r#"{"x":1,"y":2}"#).expect("deserialize");
    assert_eq!(map, IMap::from([("x".to_string(), 1), ("y".to_string(), 2)]));
}

#[test]
fn set_round_trips_through_array() {
    let set = ISet::from([3_u8, 1, 2]);
    let json = serde_json::to_string(&set).expect("serialize");
    let back: ISet<u8> = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, set);
}

#[test]
fn set_deserialization_drops_duplicates() {
    let set: ISet<u8> = serde_json::from_str("[1,1,2]").expect("deserialize");
    assert_eq!(set.len(), 2);
}
