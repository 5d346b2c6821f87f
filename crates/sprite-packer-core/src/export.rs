use crate::model::Placement;
use serde::Serialize;
use serde_json::{Value, json};

fn meta<K>(placement: &Placement<K>) -> Value {
    json!({
        "app": "sprite-packer",
        "version": env!("CARGO_PKG_VERSION"),
        "size": {"w": placement.canvas_width, "h": placement.canvas_height},
    })
}

/// Serialize a placement as `{ rects: [...], meta }`, rects in processing order.
pub fn to_json_array<K: Serialize>(placement: &Placement<K>) -> Value {
    let rects: Vec<Value> = placement
        .rects
        .iter()
        .map(|r| {
            json!({
                "id": &r.id,
                "frame": {"x": r.x, "y": r.y, "w": r.width, "h": r.height},
            })
        })
        .collect();
    json!({"rects": rects, "meta": meta(placement)})
}

/// Flatten placements keyed by id.
/// Shape: `{ frames: { id: { frame: {x, y, w, h} } }, meta }`.
/// With duplicate ids the last placement wins.
pub fn to_json_hash<K: ToString>(placement: &Placement<K>) -> Value {
    let mut frames = serde_json::Map::new();
    for r in &placement.rects {
        frames.insert(
            r.id.to_string(),
            json!({"frame": {"x": r.x, "y": r.y, "w": r.width, "h": r.height}}),
        );
    }
    json!({"frames": frames, "meta": meta(placement)})
}
