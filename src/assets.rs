use crate::core::drawlist::MeshKey;
use crate::core::{decode_gltf, AssetError, AssetKind, MeshData};
use crate::frame::FrameContext;
use crate::overlay;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

fn fetch_error(url: &str, e: impl std::fmt::Debug) -> AssetError {
    AssetError::Fetch {
        url: url.to_string(),
        reason: format!("{:?}", e),
    }
}

pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>, AssetError> {
    let window = web::window().ok_or_else(|| fetch_error(url, "no window"))?;
    let resp_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| fetch_error(url, e))?;
    let resp: web::Response = resp_value.dyn_into().map_err(|e| fetch_error(url, e))?;
    if !resp.ok() {
        return Err(fetch_error(url, format!("HTTP {}", resp.status())));
    }
    let buf = JsFuture::from(resp.array_buffer().map_err(|e| fetch_error(url, e))?)
        .await
        .map_err(|e| fetch_error(url, e))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

pub async fn load_mesh(url: &str) -> Result<MeshData, AssetError> {
    let bytes = fetch_bytes(url).await?;
    decode_gltf(&bytes)
}

fn mesh_key(kind: AssetKind) -> MeshKey {
    match kind {
        AssetKind::MainModel => MeshKey::MainModel,
        AssetKind::Logo => MeshKey::Logo,
        AssetKind::MarkerModel => MeshKey::MarkerModel,
    }
}

/// Start one fetch+decode task per gated asset. Each settles the session's
/// load latch on success or failure.
pub fn load_scene_assets(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    for kind in AssetKind::GATED {
        let frame_ctx = frame_ctx.clone();
        spawn_local(async move {
            let result = load_mesh(kind.url()).await;
            let mut ctx = frame_ctx.borrow_mut();
            let mesh = match result {
                Ok(mesh) => {
                    log::info!(
                        "[assets] {} ok vertices={}",
                        kind.url(),
                        mesh.vertex_count()
                    );
                    if let Some(g) = &mut ctx.gpu {
                        g.upload_mesh(mesh_key(kind), &mesh);
                    }
                    Some(mesh)
                }
                Err(e) => {
                    log::warn!("[assets] {}: {}", kind.url(), e);
                    None
                }
            };
            ctx.session
                .borrow_mut()
                .asset_settled(kind, mesh.as_ref(), Instant::now());
            overlay::flush(&ctx.session, &ctx.canvas);
        });
    }
}
