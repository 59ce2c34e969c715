use crate::core::drawlist::{DrawItem, MeshKey};
use crate::core::MeshData;
use fnv::FnvHashMap;
use web_sys as web;

mod helpers;
mod mesh;
mod post;
mod scene;
mod targets;

use mesh::{GpuMesh, InstanceData};
use post::{PostBindGroups, PostResources};
use scene::ScenePipeline;
pub use scene::SceneView;
use targets::{RenderTargets, HDR_FORMAT};

const INITIAL_INSTANCE_CAPACITY: usize = 64;

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    scene: ScenePipeline,
    targets: RenderTargets,
    post: PostResources,
    post_groups: PostBindGroups,
    meshes: FnvHashMap<MeshKey, GpuMesh>,
    instance_vb: wgpu::Buffer,
    instance_capacity: usize,
    width: u32,
    height: u32,
    time_accum: f32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        device.set_device_lost_callback(|reason, message| {
            if matches!(reason, wgpu::DeviceLostReason::Destroyed) {
                return;
            }
            log::error!("[gpu] device lost: {:?} {}", reason, message);
            crate::on_context_lost();
        });

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let scene = scene::create_scene_pipeline(&device, HDR_FORMAT);
        let targets = RenderTargets::new(&device, width, height);
        let post = post::create_post_resources(&device, HDR_FORMAT, format);
        let post_groups = post::create_bind_groups(&device, &post, &targets);
        let instance_vb = create_instance_buffer(&device, INITIAL_INSTANCE_CAPACITY);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            scene,
            targets,
            post,
            post_groups,
            meshes: FnvHashMap::default(),
            instance_vb,
            instance_capacity: INITIAL_INSTANCE_CAPACITY,
            width,
            height,
            time_accum: 0.0,
        })
    }

    pub fn upload_mesh(&mut self, key: MeshKey, data: &MeshData) {
        if data.is_empty() {
            return;
        }
        let label = format!("{:?}", key);
        self.meshes
            .insert(key, GpuMesh::upload(&self.device, &label, data));
    }

    pub fn has_mesh(&self, key: MeshKey) -> bool {
        self.meshes.contains_key(&key)
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.reconfigure();
        }
    }

    /// Reconfigure the surface and rebuild size-dependent targets.
    pub fn reconfigure(&mut self) {
        self.config.width = self.width;
        self.config.height = self.height;
        self.surface.configure(&self.device, &self.config);
        self.targets.recreate(&self.device, self.width, self.height);
        self.post_groups = post::create_bind_groups(&self.device, &self.post, &self.targets);
    }

    fn ensure_instance_capacity(&mut self, needed: usize) {
        if needed <= self.instance_capacity {
            return;
        }
        let cap = needed.next_power_of_two();
        self.instance_vb = create_instance_buffer(&self.device, cap);
        self.instance_capacity = cap;
    }

    pub fn render(
        &mut self,
        dt_sec: f32,
        view: &SceneView<'_>,
        draws: &[DrawItem],
    ) -> Result<(), wgpu::SurfaceError> {
        self.time_accum += dt_sec.max(0.0);

        // Group draws by mesh so each mesh is one instanced call
        let mut sorted: Vec<&DrawItem> = draws
            .iter()
            .filter(|d| self.meshes.contains_key(&d.mesh))
            .collect();
        sorted.sort_by_key(|d| d.mesh);
        let instances: Vec<InstanceData> = sorted.iter().map(|d| InstanceData::from(*d)).collect();
        self.ensure_instance_capacity(instances.len());
        if !instances.is_empty() {
            self.queue
                .write_buffer(&self.instance_vb, 0, bytemuck::cast_slice(&instances));
        }
        self.queue.write_buffer(
            &self.scene.uniform_buffer,
            0,
            bytemuck::bytes_of(&view.uniforms()),
        );
        let half = [
            (self.width / 2).max(1) as f32,
            (self.height / 2).max(1) as f32,
        ];
        post::write_post_uniforms(&self.queue, &self.post, half, self.time_accum);

        let frame = self.surface.get_current_texture()?;
        let swap_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let bg = view.background;
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: bg.x as f64,
                            g: bg.y as f64,
                            b: bg.z as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.scene.pipeline);
            rpass.set_bind_group(0, &self.scene.bind_group, &[]);
            rpass.set_vertex_buffer(1, self.instance_vb.slice(..));
            let mut start = 0usize;
            while start < sorted.len() {
                let key = sorted[start].mesh;
                let end = start
                    + sorted[start..]
                        .iter()
                        .take_while(|d| d.mesh == key)
                        .count();
                if let Some(m) = self.meshes.get(&key) {
                    rpass.set_vertex_buffer(0, m.vb.slice(..));
                    rpass.set_index_buffer(m.ib.slice(..), wgpu::IndexFormat::Uint32);
                    rpass.draw_indexed(0..m.index_count, 0, start as u32..end as u32);
                }
                start = end;
            }
        }

        post::blit(
            &mut encoder,
            "bright_pass",
            &self.targets.bloom_a_view,
            &self.post.bright_pipeline,
            &self.post_groups.from_hdr,
            None,
        );
        post::blit(
            &mut encoder,
            "blur_h",
            &self.targets.bloom_b_view,
            &self.post.blur_pipeline,
            &self.post_groups.from_bloom_a,
            None,
        );
        post::blit(
            &mut encoder,
            "blur_v",
            &self.targets.bloom_a_view,
            &self.post.blur_pipeline,
            &self.post_groups.from_bloom_b,
            None,
        );
        post::blit(
            &mut encoder,
            "composite",
            &swap_view,
            &self.post.composite_pipeline,
            &self.post_groups.from_hdr,
            Some(&self.post_groups.bloom_a_only),
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("instance_vb"),
        size: (std::mem::size_of::<InstanceData>() * capacity) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
