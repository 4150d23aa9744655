//! WebGPU renderer: instanced particles into an HDR target, then an
//! afterimage/bloom/film post chain driven by each frame's `RenderCommand`.

use glam::{Mat4, Vec3};
use scene_core::{Camera, ParticleVertex, RenderCommand, PARTICLES_WGSL, POST_WGSL};
use web_sys as web;
use wgpu;

// Base particle footprint in pixels before the gray and scale factors.
const POINT_SIZE_PX: f32 = 3.0;

const HDR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    resolution: [f32; 2],
    point_size: f32,
    particle_scale: f32,
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct PostUniforms {
    resolution: [f32; 2],
    time: f32,
    bloom_strength: f32,
    blur_dir: [f32; 2],
    threshold: f32,
    afterimage_damp: f32,
    film_noise: f32,
    film_scanline_intensity: f32,
    film_scanline_count: f32,
    light_intensity: f32,
    film_grayscale: f32,
    exposure: f32,
    _pad: [f32; 2],
}

pub struct RenderTargets {
    pub hdr_tex: wgpu::Texture,
    pub hdr_view: wgpu::TextureView,
    // Afterimage accumulation, ping-ponged between frames
    pub accum_a: wgpu::Texture,
    pub accum_a_view: wgpu::TextureView,
    pub accum_b: wgpu::Texture,
    pub accum_b_view: wgpu::TextureView,
    // Half-resolution bloom scratch
    pub bloom_a: wgpu::Texture,
    pub bloom_a_view: wgpu::TextureView,
    pub bloom_b: wgpu::Texture,
    pub bloom_b_view: wgpu::TextureView,
}

impl RenderTargets {
    fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (hdr_tex, hdr_view) = create_color_texture(device, "hdr_tex", width, height);
        let (accum_a, accum_a_view) = create_color_texture(device, "accum_a", width, height);
        let (accum_b, accum_b_view) = create_color_texture(device, "accum_b", width, height);
        let bw = (width.max(1) / 2).max(1);
        let bh = (height.max(1) / 2).max(1);
        let (bloom_a, bloom_a_view) = create_color_texture(device, "bloom_a", bw, bh);
        let (bloom_b, bloom_b_view) = create_color_texture(device, "bloom_b", bw, bh);
        Self {
            hdr_tex,
            hdr_view,
            accum_a,
            accum_a_view,
            accum_b,
            accum_b_view,
            bloom_a,
            bloom_a_view,
            bloom_b,
            bloom_b_view,
        }
    }
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    // Particle layer
    particle_pipeline: wgpu::RenderPipeline,
    scene_uniform_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    instance_vb: Option<wgpu::Buffer>,
    instance_count: u32,

    // Post-processing resources
    targets: RenderTargets,
    linear_sampler: wgpu::Sampler,
    post_bgl0: wgpu::BindGroupLayout, // texture+sampler+uniform
    post_bgl1: wgpu::BindGroupLayout, // second texture+sampler
    post_ub: wgpu::Buffer,
    post_ub_blur_h: wgpu::Buffer,
    post_ub_blur_v: wgpu::Buffer,

    bg_hdr: wgpu::BindGroup,
    bg_accum_a: wgpu::BindGroup,
    bg_accum_b: wgpu::BindGroup,
    bg_blur_from_a: wgpu::BindGroup,
    bg_blur_from_b: wgpu::BindGroup,
    bg_aux_accum_a: wgpu::BindGroup,
    bg_aux_accum_b: wgpu::BindGroup,
    bg_aux_bloom_a: wgpu::BindGroup,

    afterimage_pipeline: wgpu::RenderPipeline,
    bright_pipeline: wgpu::RenderPipeline,
    blur_pipeline: wgpu::RenderPipeline,
    composite_pipeline: wgpu::RenderPipeline,

    width: u32,
    height: u32,
    accum_flip: bool,
    time_accum: f32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

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
            .unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let targets = RenderTargets::new(&device, width, height);

        // Particle pipeline
        let particle_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("particle_shader"),
            source: wgpu::ShaderSource::Wgsl(PARTICLES_WGSL.into()),
        });
        let scene_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let scene_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &scene_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_uniform_buffer.as_entire_binding(),
            }],
        });
        let particle_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("particle_pl"),
            bind_group_layouts: &[&scene_bgl],
            push_constant_ranges: &[],
        });
        let particle_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("particle_pipeline"),
            layout: Some(&particle_pl),
            vertex: wgpu::VertexState {
                module: &particle_shader,
                entry_point: Some("vs_particle"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<ParticleVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &[
                        wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x3,
                            offset: 0,
                            shader_location: 0,
                        },
                        wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x3,
                            offset: 12,
                            shader_location: 1,
                        },
                    ],
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &particle_shader,
                entry_point: Some("fs_particle"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: HDR_FORMAT,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        // Post shader + pipelines
        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(POST_WGSL.into()),
        });
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let post_bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("post_bgl0"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    // tex
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    // sampler
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    // uniforms
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });
        let post_bgl1 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("post_bgl1"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        // Blur directions live in their own uniform buffers so both blur
        // passes in one encoder see their own direction.
        let make_ub = |label: &str| {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: std::mem::size_of::<PostUniforms>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        };
        let post_ub = make_ub("post_uniforms");
        let post_ub_blur_h = make_ub("post_uniforms_blur_h");
        let post_ub_blur_v = make_ub("post_uniforms_blur_v");

        let pl_single = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_post_single"),
            bind_group_layouts: &[&post_bgl0],
            push_constant_ranges: &[],
        });
        let pl_paired = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_post_paired"),
            bind_group_layouts: &[&post_bgl0, &post_bgl1],
            push_constant_ranges: &[],
        });
        let afterimage_pipeline = make_post_pipeline(
            &device,
            &pl_paired,
            &post_shader,
            "fs_afterimage",
            HDR_FORMAT,
            None,
        );
        let bright_pipeline = make_post_pipeline(
            &device,
            &pl_single,
            &post_shader,
            "fs_bright",
            HDR_FORMAT,
            None,
        );
        let blur_pipeline = make_post_pipeline(
            &device,
            &pl_single,
            &post_shader,
            "fs_blur",
            HDR_FORMAT,
            None,
        );
        let composite_pipeline = make_post_pipeline(
            &device,
            &pl_paired,
            &post_shader,
            "fs_composite",
            format,
            Some(wgpu::BlendState::REPLACE),
        );

        let bg_hdr = make_bg0(
            &device,
            "bg_hdr",
            &post_bgl0,
            &targets.hdr_view,
            &linear_sampler,
            &post_ub,
        );
        let bg_accum_a = make_bg0(
            &device,
            "bg_accum_a",
            &post_bgl0,
            &targets.accum_a_view,
            &linear_sampler,
            &post_ub,
        );
        let bg_accum_b = make_bg0(
            &device,
            "bg_accum_b",
            &post_bgl0,
            &targets.accum_b_view,
            &linear_sampler,
            &post_ub,
        );
        let bg_blur_from_a = make_bg0(
            &device,
            "bg_blur_from_a",
            &post_bgl0,
            &targets.bloom_a_view,
            &linear_sampler,
            &post_ub_blur_h,
        );
        let bg_blur_from_b = make_bg0(
            &device,
            "bg_blur_from_b",
            &post_bgl0,
            &targets.bloom_b_view,
            &linear_sampler,
            &post_ub_blur_v,
        );
        let bg_aux_accum_a = make_bg1(
            &device,
            "bg_aux_accum_a",
            &post_bgl1,
            &targets.accum_a_view,
            &linear_sampler,
        );
        let bg_aux_accum_b = make_bg1(
            &device,
            "bg_aux_accum_b",
            &post_bgl1,
            &targets.accum_b_view,
            &linear_sampler,
        );
        let bg_aux_bloom_a = make_bg1(
            &device,
            "bg_aux_bloom_a",
            &post_bgl1,
            &targets.bloom_a_view,
            &linear_sampler,
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            particle_pipeline,
            scene_uniform_buffer,
            scene_bind_group,
            instance_vb: None,
            instance_count: 0,
            targets,
            linear_sampler,
            post_bgl0,
            post_bgl1,
            post_ub,
            post_ub_blur_h,
            post_ub_blur_v,
            bg_hdr,
            bg_accum_a,
            bg_accum_b,
            bg_blur_from_a,
            bg_blur_from_b,
            bg_aux_accum_a,
            bg_aux_accum_b,
            bg_aux_bloom_a,
            afterimage_pipeline,
            bright_pipeline,
            blur_pipeline,
            composite_pipeline,
            width,
            height,
            accum_flip: false,
            time_accum: 0.0,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.targets = RenderTargets::new(&self.device, width, height);
            self.rebuild_post_bind_groups();
        }
    }

    /// Re-upload the instance buffer after the particle field changed. The
    /// buffer is allocated on first use, once the field size is known.
    pub fn upload_particles(&mut self, vertices: &[ParticleVertex]) {
        let needed = std::mem::size_of_val(vertices) as u64;
        let realloc = match &self.instance_vb {
            Some(buf) => buf.size() < needed,
            None => true,
        };
        if realloc {
            self.instance_vb = Some(self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("particle_instances"),
                size: needed,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
        }
        if let Some(buf) = &self.instance_vb {
            self.queue
                .write_buffer(buf, 0, bytemuck::cast_slice(vertices));
        }
        self.instance_count = vertices.len() as u32;
    }

    pub fn render(&mut self, cmd: &RenderCommand, dt_sec: f32) -> Result<(), wgpu::SurfaceError> {
        self.time_accum += dt_sec;
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        let camera = Camera {
            eye: cmd.eye,
            target: cmd.target,
            up: Vec3::Y,
            aspect: self.width as f32 / self.height.max(1) as f32,
            fovy_deg: cmd.fovy_deg,
            znear: 0.1,
            zfar: 1000.0,
        };
        let model = Mat4::from_rotation_y(cmd.particle_rotation);
        let scene = SceneUniforms {
            view_proj: (camera.view_proj() * model).to_cols_array_2d(),
            resolution: [self.width as f32, self.height as f32],
            point_size: POINT_SIZE_PX,
            particle_scale: cmd.particle_scale,
        };
        self.queue
            .write_buffer(&self.scene_uniform_buffer, 0, bytemuck::bytes_of(&scene));

        let mut post = PostUniforms {
            resolution: [self.width as f32, self.height as f32],
            time: self.time_accum,
            bloom_strength: cmd.bloom_strength,
            blur_dir: [0.0, 0.0],
            threshold: cmd.bloom_threshold,
            afterimage_damp: cmd.afterimage_damp,
            film_noise: cmd.film_noise,
            film_scanline_intensity: cmd.film_scanline_intensity,
            film_scanline_count: cmd.film_scanline_count,
            light_intensity: cmd.light_intensity,
            film_grayscale: if cmd.film_grayscale { 1.0 } else { 0.0 },
            exposure: cmd.bloom_exposure,
            _pad: [0.0; 2],
        };
        self.queue
            .write_buffer(&self.post_ub, 0, bytemuck::bytes_of(&post));
        post.resolution = [
            (self.width.max(1) / 2).max(1) as f32,
            (self.height.max(1) / 2).max(1) as f32,
        ];
        post.blur_dir = [cmd.bloom_radius.max(0.01), 0.0];
        self.queue
            .write_buffer(&self.post_ub_blur_h, 0, bytemuck::bytes_of(&post));
        post.blur_dir = [0.0, cmd.bloom_radius.max(0.01)];
        self.queue
            .write_buffer(&self.post_ub_blur_v, 0, bytemuck::bytes_of(&post));

        // Pass 1: particles into HDR
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("particle_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.005,
                            g: 0.006,
                            b: 0.01,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if let Some(instances) = &self.instance_vb {
                if self.instance_count > 0 {
                    rpass.set_pipeline(&self.particle_pipeline);
                    rpass.set_bind_group(0, &self.scene_bind_group, &[]);
                    rpass.set_vertex_buffer(0, instances.slice(..));
                    rpass.draw(0..6, 0..self.instance_count);
                }
            }
        }

        let (accum_cur_view, bg_accum_cur, bg_aux_prev) = if self.accum_flip {
            (
                &self.targets.accum_a_view,
                &self.bg_accum_a,
                &self.bg_aux_accum_b,
            )
        } else {
            (
                &self.targets.accum_b_view,
                &self.bg_accum_b,
                &self.bg_aux_accum_a,
            )
        };

        // Pass 2: afterimage blend with the previous accumulation
        self.blit(
            &mut encoder,
            "afterimage",
            accum_cur_view,
            &self.afterimage_pipeline,
            &self.bg_hdr,
            Some(bg_aux_prev),
        );

        // Pass 3: bright extraction -> bloom_a
        self.blit(
            &mut encoder,
            "bright_pass",
            &self.targets.bloom_a_view,
            &self.bright_pipeline,
            bg_accum_cur,
            None,
        );

        // Pass 4: horizontal blur bloom_a -> bloom_b
        self.blit(
            &mut encoder,
            "blur_h",
            &self.targets.bloom_b_view,
            &self.blur_pipeline,
            &self.bg_blur_from_a,
            None,
        );

        // Pass 5: vertical blur bloom_b -> bloom_a
        self.blit(
            &mut encoder,
            "blur_v",
            &self.targets.bloom_a_view,
            &self.blur_pipeline,
            &self.bg_blur_from_b,
            None,
        );

        // Pass 6: composite to the swapchain
        self.blit(
            &mut encoder,
            "composite",
            &view,
            &self.composite_pipeline,
            bg_accum_cur,
            Some(&self.bg_aux_bloom_a),
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        self.accum_flip = !self.accum_flip;
        Ok(())
    }

    fn rebuild_post_bind_groups(&mut self) {
        self.bg_hdr = make_bg0(
            &self.device,
            "bg_hdr",
            &self.post_bgl0,
            &self.targets.hdr_view,
            &self.linear_sampler,
            &self.post_ub,
        );
        self.bg_accum_a = make_bg0(
            &self.device,
            "bg_accum_a",
            &self.post_bgl0,
            &self.targets.accum_a_view,
            &self.linear_sampler,
            &self.post_ub,
        );
        self.bg_accum_b = make_bg0(
            &self.device,
            "bg_accum_b",
            &self.post_bgl0,
            &self.targets.accum_b_view,
            &self.linear_sampler,
            &self.post_ub,
        );
        self.bg_blur_from_a = make_bg0(
            &self.device,
            "bg_blur_from_a",
            &self.post_bgl0,
            &self.targets.bloom_a_view,
            &self.linear_sampler,
            &self.post_ub_blur_h,
        );
        self.bg_blur_from_b = make_bg0(
            &self.device,
            "bg_blur_from_b",
            &self.post_bgl0,
            &self.targets.bloom_b_view,
            &self.linear_sampler,
            &self.post_ub_blur_v,
        );
        self.bg_aux_accum_a = make_bg1(
            &self.device,
            "bg_aux_accum_a",
            &self.post_bgl1,
            &self.targets.accum_a_view,
            &self.linear_sampler,
        );
        self.bg_aux_accum_b = make_bg1(
            &self.device,
            "bg_aux_accum_b",
            &self.post_bgl1,
            &self.targets.accum_b_view,
            &self.linear_sampler,
        );
        self.bg_aux_bloom_a = make_bg1(
            &self.device,
            "bg_aux_bloom_a",
            &self.post_bgl1,
            &self.targets.bloom_a_view,
            &self.linear_sampler,
        );
    }

    fn blit(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        label: &str,
        target: &wgpu::TextureView,
        pipeline: &wgpu::RenderPipeline,
        bg0: &wgpu::BindGroup,
        bg1: Option<&wgpu::BindGroup>,
    ) {
        let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        r.set_pipeline(pipeline);
        r.set_bind_group(0, bg0, &[]);
        if let Some(g1) = bg1 {
            r.set_bind_group(1, g1, &[]);
        }
        r.draw(0..3, 0..1);
        drop(r);
    }
}

// ---------------- construction helpers ----------------

fn create_color_texture(
    device: &wgpu::Device,
    label: &str,
    width: u32,
    height: u32,
) -> (wgpu::Texture, wgpu::TextureView) {
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: HDR_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });
    let view = tex.create_view(&wgpu::TextureViewDescriptor::default());
    (tex, view)
}

fn make_post_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    frag_entry: &str,
    color_format: wgpu::TextureFormat,
    blend: Option<wgpu::BlendState>,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(frag_entry),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_fullscreen"),
            buffers: &[],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(frag_entry),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

fn make_bg0(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::BindGroupLayout,
    view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
    uniforms: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: uniforms.as_entire_binding(),
            },
        ],
    })
}

fn make_bg1(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::BindGroupLayout,
    view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}
