use sprite_packer_core::prelude::*;

#[test]
fn json_array_and_hash_shapes() {
    let out = pack_layout(
        vec![("a", 10, 10), ("b", 10, 10), ("c", 20, 10)],
        PackerConfig::default(),
    )
    .unwrap();

    let arr = to_json_array(&out);
    let rects = arr["rects"].as_array().unwrap();
    assert_eq!(rects.len(), 3);
    assert_eq!(rects[0]["id"], "c");
    assert_eq!(rects[0]["frame"]["w"], 20);
    assert_eq!(arr["meta"]["size"]["w"], 20);
    assert_eq!(arr["meta"]["size"]["h"], 20);

    let hash = to_json_hash(&out);
    assert_eq!(hash["frames"]["a"]["frame"]["x"], 0);
    assert_eq!(hash["frames"]["a"]["frame"]["y"], 10);
    assert_eq!(hash["frames"]["b"]["frame"]["x"], 10);
    assert_eq!(hash["meta"]["app"], "sprite-packer");
}

#[test]
fn placement_serde_roundtrip() {
    let out = pack_layout(vec![(String::from("x"), 3, 4)], PackerConfig::default()).unwrap();
    let text = serde_json::to_string(&out).unwrap();
    let back: Placement<String> = serde_json::from_str(&text).unwrap();
    assert_eq!(out, back);
}
