pub mod camera;
pub mod commands;
pub mod drawlist;
pub mod effects;
pub mod entry;
pub mod lighting;
pub mod loading;
pub mod markers;
pub mod models;
pub mod movement;
pub mod panels;
pub mod picking;
pub mod session;
pub mod shapes;

pub use camera::{pixel_to_ndc, FirstPersonCamera};
pub use commands::{CueId, UiCommand};
pub use entry::EntryScene;
pub use lighting::{LightKind, SceneLight};
pub use loading::AssetKind;
pub use markers::{MarkerSet, MarkerVisual};
pub use models::{decode_gltf, AssetError};
pub use session::{SceneSession, SessionConfig};
pub use shapes::{CrystalShape, MeshData};

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../../shaders/scene.wgsl");
pub static POST_WGSL: &str = include_str!("../../shaders/post.wgsl");
