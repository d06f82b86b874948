//! WebGPU render pipeline
//!
//! Draws a [`Frame`] as instanced unit quads: one gradient background quad,
//! then every draw command in order.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::error::RenderInitError;
use super::frame::Frame;
use super::vertex::{QuadInstance, UNIT_QUAD, Vertex};

/// Instance buffer capacity, background quad included
pub const MAX_INSTANCES: usize = 512;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Globals {
    view_offset: [f32; 2], // offset 0
    _pad: [f32; 2],        // offset 8 - align gradients to 16 bytes
    grad_top: [f32; 4],    // offset 16
    grad_bottom: [f32; 4], // offset 32
}

impl Globals {
    fn from_frame(frame: &Frame) -> Self {
        let [tr, tg, tb] = frame.background.top;
        let [br, bg, bb] = frame.background.bottom;
        Self {
            view_offset: frame.view_offset.to_array(),
            _pad: [0.0; 2],
            grad_top: [tr, tg, tb, 1.0],
            grad_bottom: [br, bg, bb, 1.0],
        }
    }
}

/// Collect the instance list for a frame, truncated to buffer capacity
pub fn frame_instances(frame: &Frame) -> Vec<QuadInstance> {
    let mut instances = Vec::with_capacity((frame.commands.len() + 1).min(MAX_INSTANCES));
    instances.push(QuadInstance::background());
    instances.extend(
        frame
            .commands
            .iter()
            .take(MAX_INSTANCES - 1)
            .map(QuadInstance::from),
    );
    if frame.commands.len() >= MAX_INSTANCES {
        log::debug!(
            "Dropped {} draw commands over capacity",
            frame.commands.len() + 1 - MAX_INSTANCES
        );
    }
    instances
}

/// Main render state
pub struct QuadRenderer {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,
    quad_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    globals_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    /// Viewport size in pixels
    pub size: (u32, u32),
}

impl QuadRenderer {
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        width: u32,
        height: u32,
    ) -> Result<Self, RenderInitError> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("ghost-busters-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        log::info!("Surface formats: {:?}", surface_caps.formats);

        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(RenderInitError::NoSurfaceFormat)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        log::info!("Surface config: {}x{}, format {:?}", width, height, surface_format);
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("quad_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globals"),
            contents: bytemuck::bytes_of(&Globals::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let quad_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("unit_quad"),
            contents: bytemuck::cast_slice(&UNIT_QUAD),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("quad_instances"),
            size: (std::mem::size_of::<QuadInstance>() * MAX_INSTANCES) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("quad_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("quad_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("quad_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("quad_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc(), QuadInstance::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            quad_buffer,
            instance_buffer,
            globals_buffer,
            bind_group,
            size: (width, height),
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Upload the frame and draw it
    pub fn render(&mut self, frame: &Frame) -> Result<(), wgpu::SurfaceError> {
        let instances = frame_instances(frame);
        self.queue.write_buffer(
            &self.globals_buffer,
            0,
            bytemuck::bytes_of(&Globals::from_frame(frame)),
        );
        self.queue
            .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("quad_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("quad_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.quad_buffer.slice(..));
            render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            render_pass.draw(0..UNIT_QUAD.len() as u32, 0..instances.len() as u32);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::frame::{DrawCommand, Gradient};
    use crate::renderer::vertex::FLAG_GRADIENT;
    use glam::Vec2;

    fn frame_with(n: usize) -> Frame {
        Frame {
            background: Gradient {
                top: [0.1, 0.2, 0.3],
                bottom: [0.0; 3],
            },
            view_offset: Vec2::new(0.01, -0.02),
            commands: vec![DrawCommand::new(Vec2::ZERO, Vec2::ONE, [1.0; 4], 1.0); n],
        }
    }

    #[test]
    fn test_background_comes_first() {
        let instances = frame_instances(&frame_with(3));
        assert_eq!(instances.len(), 4);
        assert_eq!(instances[0].flags, FLAG_GRADIENT);
        assert!(instances[1..].iter().all(|i| i.flags == 0));
    }

    #[test]
    fn test_instances_truncate_to_capacity() {
        let instances = frame_instances(&frame_with(MAX_INSTANCES + 40));
        assert_eq!(instances.len(), MAX_INSTANCES);
    }

    #[test]
    fn test_globals_layout() {
        assert_eq!(std::mem::size_of::<Globals>(), 48);
        let g = Globals::from_frame(&frame_with(0));
        assert_eq!(g.view_offset, [0.01, -0.02]);
        assert_eq!(g.grad_top, [0.1, 0.2, 0.3, 1.0]);
    }
}
