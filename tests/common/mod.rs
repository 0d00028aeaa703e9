//! In-memory glTF fixtures.

use base64::Engine as _;

/// A two-node model: `Body` carries a mesh spanning (-1,0,-1)..(1,2,1), its
/// child `Head` sits at (0,1,0). Every clip name gets a one-second
/// translation track moving `Head` from y=1 to y=2.
pub fn model_gltf(clip_names: &[&str]) -> Vec<u8> {
    model_gltf_with_keys(clip_names, &[0.0, 1.0], &[[0.0, 1.0, 0.0], [0.0, 2.0, 0.0]])
}

/// Same model, with every clip's sampler using the given key times and
/// translations. The two lists may disagree in length.
pub fn model_gltf_with_keys(clip_names: &[&str], times: &[f32], translations: &[[f32; 3]]) -> Vec<u8> {
    let mut buffer = Vec::new();
    for t in times {
        buffer.extend_from_slice(&t.to_le_bytes());
    }
    for v in translations.iter().flatten() {
        buffer.extend_from_slice(&v.to_le_bytes());
    }
    for v in [-1.0_f32, 0.0, -1.0, 1.0, 0.0, 1.0, 0.0, 2.0, 0.0] {
        buffer.extend_from_slice(&v.to_le_bytes());
    }
    let times_len = times.len() * 4;
    let values_len = translations.len() * 12;
    let first = times.first().copied().unwrap_or(0.0);
    let last = times.last().copied().unwrap_or(0.0);
    let uri = format!(
        "data:application/octet-stream;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(&buffer)
    );

    let animations: Vec<serde_json::Value> = clip_names
        .iter()
        .map(|name| {
            serde_json::json!({
                "name": name,
                "channels": [{ "sampler": 0, "target": { "node": 1, "path": "translation" } }],
                "samplers": [{ "input": 0, "output": 1, "interpolation": "LINEAR" }]
            })
        })
        .collect();

    let document = serde_json::json!({
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [{ "nodes": [0] }],
        "nodes": [
            { "name": "Body", "mesh": 0, "children": [1] },
            { "name": "Head", "translation": [0.0, 1.0, 0.0] }
        ],
        "meshes": [{ "primitives": [{ "attributes": { "POSITION": 2 } }] }],
        "animations": animations,
        "buffers": [{ "byteLength": buffer.len(), "uri": uri }],
        "bufferViews": [
            { "buffer": 0, "byteOffset": 0, "byteLength": times_len },
            { "buffer": 0, "byteOffset": times_len, "byteLength": values_len },
            { "buffer": 0, "byteOffset": times_len + values_len, "byteLength": 36 }
        ],
        "accessors": [
            { "bufferView": 0, "componentType": 5126, "count": times.len(), "type": "SCALAR",
              "min": [first], "max": [last] },
            { "bufferView": 1, "componentType": 5126, "count": translations.len(), "type": "VEC3" },
            { "bufferView": 2, "componentType": 5126, "count": 3, "type": "VEC3",
              "min": [-1.0, 0.0, -1.0], "max": [1.0, 2.0, 1.0] }
        ]
    });

    serde_json::to_vec(&document).unwrap()
}
