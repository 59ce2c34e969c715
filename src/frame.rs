use crate::core::drawlist::{builtin_meshes, scene_draw_list, MeshKey};
use crate::core::SceneSession;
use crate::overlay;
use crate::render::{self, SceneView};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

/// State the main-scene frame loop needs between animation frames.
pub struct FrameContext<'a> {
    pub session: Rc<RefCell<SceneSession>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn new(
        session: Rc<RefCell<SceneSession>>,
        canvas: web::HtmlCanvasElement,
        mut gpu: Option<render::GpuState<'a>>,
    ) -> Self {
        if let Some(g) = &mut gpu {
            for (key, mesh) in builtin_meshes() {
                g.upload_mesh(key, &mesh);
            }
        }
        Self {
            session,
            canvas,
            gpu,
            last_instant: Instant::now(),
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = now.duration_since(self.last_instant).as_secs_f32();
        self.last_instant = now;

        // The container is hidden until load completes, so size is picked up late
        crate::dom::sync_canvas_backing_size(&self.canvas);
        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            self.session.borrow_mut().set_aspect(g.aspect());
        }

        self.session.borrow_mut().tick(now);
        overlay::flush(&self.session, &self.canvas);

        let Some(g) = &mut self.gpu else {
            return;
        };
        let session = self.session.borrow();
        let env = session.environment();
        let lights = session.frame_lights();
        let draws = scene_draw_list(
            &session,
            g.has_mesh(MeshKey::MainModel),
            g.has_mesh(MeshKey::Logo),
        );
        let view = SceneView {
            view_proj: session.camera.view_proj(session.aspect()),
            eye: session.camera.position,
            background: env.background,
            fog_color: env.fog_color,
            fog_near: env.fog_near,
            fog_far: env.fog_far,
            lights: &lights,
        };
        match g.render(dt_sec, &view, &draws) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("[gpu] surface lost, reconfiguring");
                g.reconfigure();
            }
            Err(e) => log::error!("render error: {:?}", e),
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

/// Handle to a running requestAnimationFrame loop.
#[derive(Clone)]
pub struct LoopHandle {
    alive: Rc<Cell<bool>>,
}

impl LoopHandle {
    /// The loop stops scheduling itself at the next frame.
    pub fn stop(&self) {
        self.alive.set(false);
    }
}

pub fn start_loop(mut on_frame: impl FnMut() + 'static) -> LoopHandle {
    let alive = Rc::new(Cell::new(true));
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let alive_tick = alive.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !alive_tick.get() {
            return;
        }
        on_frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
    LoopHandle { alive }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
