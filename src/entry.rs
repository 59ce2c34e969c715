use crate::assets;
use crate::constants::{color_from_hex, LOGO_MODEL_URL};
use crate::core::drawlist::{DrawItem, MeshKey};
use crate::core::entry::{ENTRY_BACKGROUND, ENTRY_CAMERA_EYE};
use crate::core::EntryScene;
use crate::frame::{self, LoopHandle};
use crate::render::{self, SceneView};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// Fog far enough out that nothing in the entry scene is tinted.
const ENTRY_FOG_NEAR: f32 = 500.0;
const ENTRY_FOG_FAR: f32 = 1000.0;

pub struct EntryContext {
    scene: EntryScene,
    canvas: web::HtmlCanvasElement,
    gpu: Option<render::GpuState<'static>>,
    started: Instant,
    last_instant: Instant,
}

impl EntryContext {
    fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = now.duration_since(self.last_instant).as_secs_f32();
        self.last_instant = now;
        self.scene
            .update(now.duration_since(self.started).as_secs_f32());

        let Some(g) = &mut self.gpu else {
            return;
        };
        g.resize_if_needed(self.canvas.width(), self.canvas.height());
        let mut draws = Vec::with_capacity(1);
        if self.scene.show_logo && g.has_mesh(MeshKey::Logo) {
            draws.push(DrawItem {
                mesh: MeshKey::Logo,
                model: self.scene.logo_transform(),
                color: color_from_hex(0xc0c0c0),
                emissive: 0.1,
                unlit: false,
            });
        }
        let view = SceneView {
            view_proj: EntryScene::view_proj(g.aspect()),
            eye: ENTRY_CAMERA_EYE,
            background: ENTRY_BACKGROUND,
            fog_color: ENTRY_BACKGROUND,
            fog_near: ENTRY_FOG_NEAR,
            fog_far: ENTRY_FOG_FAR,
            lights: &self.scene.lights,
        };
        match g.render(dt_sec, &view, &draws) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => g.reconfigure(),
            Err(e) => log::error!("[entry] render error: {:?}", e),
        }
    }
}

/// The running entry screen: its context and render loop.
pub struct EntryHandle {
    ctx: Rc<RefCell<EntryContext>>,
    frame_loop: LoopHandle,
}

impl EntryHandle {
    /// Stop the loop and release the GPU resources.
    pub fn teardown(self) {
        self.frame_loop.stop();
        let mut ctx = self.ctx.borrow_mut();
        ctx.gpu = None;
        log::info!("[entry] torn down");
    }
}

pub async fn start(canvas: web::HtmlCanvasElement, mobile: bool) -> EntryHandle {
    let gpu = frame::init_gpu(&canvas).await;
    let now = Instant::now();
    let ctx = Rc::new(RefCell::new(EntryContext {
        scene: EntryScene::new(mobile),
        canvas,
        gpu,
        started: now,
        last_instant: now,
    }));

    if mobile {
        log::info!("[entry] mobile, skipping logo");
    } else {
        let ctx_logo = ctx.clone();
        spawn_local(async move {
            match assets::load_mesh(LOGO_MODEL_URL).await {
                Ok(mesh) => {
                    let mut c = ctx_logo.borrow_mut();
                    if let Some(g) = &mut c.gpu {
                        g.upload_mesh(MeshKey::Logo, &mesh);
                    } else {
                        log::warn!("[entry] logo arrived after teardown");
                    }
                }
                Err(e) => log::warn!("[entry] logo: {}", e),
            }
        });
    }

    let ctx_tick = ctx.clone();
    let frame_loop = frame::start_loop(move || ctx_tick.borrow_mut().frame());
    EntryHandle { ctx, frame_loop }
}
