use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine as _;
use glam::{Quat, Vec3};
use gltf::animation::util::ReadOutputs;

use crate::animation::{
    AnimationClip, InterpolationMode, KeyframeTrack, MorphWeightData, TargetPath, Track, TrackData,
    TrackMeta,
};
use crate::errors::{NodError, Result};
use crate::scene::{BoundingBox, Node, NodeHandle, Scene, Transform};

/// A node as read from the file, before it enters a [`Scene`].
#[derive(Debug, Clone)]
pub struct NodeData {
    pub name: String,
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    /// Indices into [`ModelData::nodes`].
    pub children: Vec<usize>,
    /// Local-space bounds of the node's mesh.
    pub bounds: Option<BoundingBox>,
    /// Initial morph target weights of the node's mesh.
    pub morph_weights: Vec<f32>,
}

/// Scene-independent result of loading a glTF asset.
///
/// Produced off the frame thread and turned into scene nodes with
/// [`ModelData::instantiate`].
#[derive(Debug, Clone, Default)]
pub struct ModelData {
    pub nodes: Vec<NodeData>,
    /// Top-level nodes of the default scene.
    pub roots: Vec<usize>,
    pub clips: Vec<AnimationClip>,
}

impl ModelData {
    /// Adds the model's nodes under a new root node named `root_name`.
    pub fn instantiate(&self, scene: &mut Scene, root_name: &str) -> NodeHandle {
        let root = scene.create_node_with_name(root_name);

        let handles: Vec<NodeHandle> = self
            .nodes
            .iter()
            .map(|data| {
                let mut node = Node::new(data.name.clone());
                node.transform = Transform::from_trs(data.translation, data.rotation, data.scale);
                node.bounds = data.bounds;
                node.morph_weights.clone_from(&data.morph_weights);
                scene.add_node(node)
            })
            .collect();

        for (index, data) in self.nodes.iter().enumerate() {
            for &child in &data.children {
                if let Some(&child_handle) = handles.get(child) {
                    scene.attach(child_handle, handles[index]);
                }
            }
        }

        for &index in &self.roots {
            if let Some(&handle) = handles.get(index) {
                scene.attach(handle, root);
            }
        }

        root
    }

    #[must_use]
    pub fn clip_names(&self) -> Vec<&str> {
        self.clips.iter().map(|c| c.name.as_str()).collect()
    }
}

pub struct GltfLoader;

impl GltfLoader {
    /// Loads a `.gltf` or `.glb` file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<ModelData> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(NodError::AssetNotFound(path.display().to_string()));
        }
        let bytes = fs::read(path)?;
        let base_dir = path.parent().map(Path::to_path_buf);
        Self::load_from_slice(&bytes, base_dir.as_deref())
    }

    /// Parses a glTF document from memory.
    ///
    /// External buffers are resolved against `base_dir`; without it only
    /// GLB chunks and data URIs can be read.
    pub fn load_from_slice(bytes: &[u8], base_dir: Option<&Path>) -> Result<ModelData> {
        let gltf = gltf::Gltf::from_slice_without_validation(bytes)?;

        let required: Vec<&str> = gltf.extensions_required().collect();
        if !required.is_empty() {
            log::warn!("glTF requires extensions {required:?}; bounds and animation may be incomplete");
        }

        let buffers = load_buffers(&gltf, base_dir)?;
        let nodes = gltf.nodes().map(read_node).collect();

        let roots = gltf
            .default_scene()
            .or_else(|| gltf.scenes().next())
            .map(|scene| scene.nodes().map(|n| n.index()).collect())
            .unwrap_or_default();

        let clips = load_animations(&gltf, &buffers);
        log::info!(
            "Parsed glTF: {} nodes, {} animation clips",
            gltf.nodes().count(),
            clips.len()
        );

        Ok(ModelData { nodes, roots, clips })
    }
}

fn load_buffers(gltf: &gltf::Gltf, base_dir: Option<&Path>) -> Result<Vec<Vec<u8>>> {
    gltf.buffers()
        .map(|buffer| {
            let index = buffer.index();
            match buffer.source() {
                gltf::buffer::Source::Bin => {
                    gltf.blob.clone().ok_or_else(|| NodError::BufferUnavailable {
                        index,
                        reason: "missing GLB binary chunk".to_string(),
                    })
                }
                gltf::buffer::Source::Uri(uri) if uri.starts_with("data:") => decode_data_uri(uri),
                gltf::buffer::Source::Uri(uri) => {
                    let dir: PathBuf = base_dir.map_or_else(|| PathBuf::from("."), Path::to_path_buf);
                    let buffer_path = dir.join(uri);
                    fs::read(&buffer_path).map_err(|err| NodError::BufferUnavailable {
                        index,
                        reason: format!("{}: {err}", buffer_path.display()),
                    })
                }
            }
        })
        .collect()
}

fn decode_data_uri(uri: &str) -> Result<Vec<u8>> {
    let (_, payload) = uri
        .split_once(";base64,")
        .ok_or_else(|| NodError::DataUriError("only base64 data URIs are supported".to_string()))?;
    Ok(base64::engine::general_purpose::STANDARD.decode(payload)?)
}

fn read_node(node: gltf::Node) -> NodeData {
    let name = node
        .name()
        .map_or_else(|| format!("Node_{}", node.index()), str::to_string);
    let (t, r, s) = node.transform().decomposed();

    let mut bounds = None;
    let mut morph_weights = Vec::new();
    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            // bounding_box() panics without POSITION min/max
            let has_extent = primitive
                .get(&gltf::Semantic::Positions)
                .is_some_and(|a| a.min().is_some() && a.max().is_some());
            if !has_extent {
                continue;
            }
            let bb = primitive.bounding_box();
            let primitive_bounds = BoundingBox::new(Vec3::from_array(bb.min), Vec3::from_array(bb.max));
            bounds = Some(bounds.map_or(primitive_bounds, |acc: BoundingBox| acc.union(&primitive_bounds)));
        }

        let target_count = mesh
            .primitives()
            .map(|p| p.morph_targets().count())
            .max()
            .unwrap_or(0);
        morph_weights = node
            .weights()
            .or_else(|| mesh.weights())
            .map_or_else(|| vec![0.0; target_count], <[f32]>::to_vec);
    }

    NodeData {
        name,
        translation: Vec3::from_array(t),
        rotation: Quat::from_array(r),
        scale: Vec3::from_array(s),
        children: node.children().map(|c| c.index()).collect(),
        bounds,
        morph_weights,
    }
}

fn load_animations(gltf: &gltf::Gltf, buffers: &[Vec<u8>]) -> Vec<AnimationClip> {
    gltf.animations()
        .map(|anim| {
            let name = anim.name().unwrap_or("anim");
            let tracks = anim
                .channels()
                .filter_map(|channel| {
                    let track = read_channel(&channel, buffers);
                    if track.is_none() {
                        log::debug!("Clip '{name}': skipped a channel without readable samples");
                    }
                    track
                })
                .collect();
            AnimationClip::new(name, tracks)
        })
        .collect()
}

fn read_channel(channel: &gltf::animation::Channel, buffers: &[Vec<u8>]) -> Option<Track> {
    let reader = channel.reader(|buffer| buffers.get(buffer.index()).map(Vec::as_slice));
    let target = channel.target();
    let target_node = target.node();
    let node_name = target_node
        .name()
        .map_or_else(|| format!("Node_{}", target_node.index()), str::to_string);

    let times: Vec<f32> = reader.read_inputs()?.collect();
    let interpolation = match channel.sampler().interpolation() {
        gltf::animation::Interpolation::Linear => InterpolationMode::Linear,
        gltf::animation::Interpolation::Step => InterpolationMode::Step,
        gltf::animation::Interpolation::CubicSpline => InterpolationMode::CubicSpline,
    };

    let (target, data) = match reader.read_outputs()? {
        ReadOutputs::Translations(iter) => (
            TargetPath::Translation,
            TrackData::Vector3(KeyframeTrack::new(times, iter.map(Vec3::from_array).collect(), interpolation)),
        ),
        ReadOutputs::Rotations(iter) => (
            TargetPath::Rotation,
            TrackData::Quaternion(KeyframeTrack::new(
                times,
                iter.into_f32().map(Quat::from_array).collect(),
                interpolation,
            )),
        ),
        ReadOutputs::Scales(iter) => (
            TargetPath::Scale,
            TrackData::Vector3(KeyframeTrack::new(times, iter.map(Vec3::from_array).collect(), interpolation)),
        ),
        ReadOutputs::MorphTargetWeights(iter) => {
            let flat: Vec<f32> = iter.into_f32().collect();
            // Cubic splines carry three entries (in, value, out) per key.
            let entries = match interpolation {
                InterpolationMode::CubicSpline => times.len() * 3,
                _ => times.len(),
            };
            if entries == 0 || flat.len() % entries != 0 {
                log::warn!(
                    "Channel on '{node_name}': {} morph weights do not split into {entries} keys; dropped",
                    flat.len()
                );
                return None;
            }
            let per_entry = flat.len() / entries;
            let values = if per_entry == 0 {
                Vec::new()
            } else {
                flat.chunks(per_entry).map(MorphWeightData::from_slice).collect()
            };
            (
                TargetPath::Weights,
                TrackData::MorphWeights(KeyframeTrack::new(times, values, interpolation)),
            )
        }
    };

    let consistent = match &data {
        TrackData::Vector3(track) => track.is_consistent(),
        TrackData::Quaternion(track) => track.is_consistent(),
        TrackData::Scalar(track) => track.is_consistent(),
        TrackData::MorphWeights(track) => track.is_consistent(),
    };
    if !consistent {
        log::warn!("Channel on '{node_name}': sampler output count does not match its keyframes; dropped");
        return None;
    }

    Some(Track {
        meta: TrackMeta { node_name, target },
        data,
    })
}
