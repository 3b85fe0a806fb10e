//! WebGPU render pipeline setup

use glam::Vec2;

use super::vertex::{Vertex, colors};

/// Vertices the buffer holds before it first has to grow
const INITIAL_VERTEX_CAPACITY: usize = 4096;

/// Main render state
pub struct RenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    vertex_capacity: usize,
    /// Viewport size in pixels
    pub size: (u32, u32),
    /// Playfield-to-clip-space mapping for the current viewport
    pub letterbox: Letterbox,
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
        field: Vec2,
    ) -> Result<Self, wgpu::RequestDeviceError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("space-shot-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let caps = surface.get_capabilities(adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(wgpu::TextureFormat::is_srgb)
            .unwrap_or(caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let pipeline = create_pipeline(&device, format);
        let vertex_buffer = create_vertex_buffer(&device, INITIAL_VERTEX_CAPACITY);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            vertex_buffer,
            vertex_capacity: INITIAL_VERTEX_CAPACITY,
            size: (width, height),
            letterbox: Letterbox::new(field, (width, height)),
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width == 0 || new_height == 0 {
            return;
        }
        self.size = (new_width, new_height);
        self.letterbox = Letterbox::new(self.letterbox.field, self.size);
        self.config.width = new_width;
        self.config.height = new_height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Map `vertices` to clip space, upload them and present one frame
    pub fn render(&mut self, vertices: &[Vertex]) -> Result<(), wgpu::SurfaceError> {
        let mapped: Vec<Vertex> = vertices
            .iter()
            .map(|v| Vertex {
                position: self.letterbox.to_ndc(v.position),
                color: v.color,
            })
            .collect();

        if mapped.len() > self.vertex_capacity {
            self.vertex_capacity = mapped.len().next_power_of_two();
            self.vertex_buffer = create_vertex_buffer(&self.device, self.vertex_capacity);
            log::debug!("Vertex buffer grown to {}", self.vertex_capacity);
        }
        if !mapped.is_empty() {
            self.queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&mapped));
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        // Clear color fills the letterbox bars
        let [r, g, b, a] = colors::BACKGROUND.map(f64::from);
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("frame_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if !mapped.is_empty() {
                let bytes = (mapped.len() * std::mem::size_of::<Vertex>()) as wgpu::BufferAddress;
                pass.set_pipeline(&self.pipeline);
                pass.set_vertex_buffer(0, self.vertex_buffer.slice(..bytes));
                pass.draw(0..mapped.len() as u32, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

fn create_vertex_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("vertex_buffer"),
        size: (capacity * std::mem::size_of::<Vertex>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_pipeline(device: &wgpu::Device, format: wgpu::TextureFormat) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("flat_shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
    });

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("flat_layout"),
        bind_group_layouts: &[],
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("flat_pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

/// Maps playfield coordinates (origin top-left, y down) to clip space,
/// shrinking one axis so the field keeps its aspect ratio
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    pub field: Vec2,
    scale: Vec2,
}

impl Letterbox {
    pub fn new(field: Vec2, viewport: (u32, u32)) -> Self {
        let (w, h) = viewport;
        let viewport_aspect = if w > 0 && h > 0 {
            w as f32 / h as f32
        } else {
            1.0
        };
        let field_aspect = field.x / field.y;

        // Shrink the axis that has spare room
        let scale = if viewport_aspect > field_aspect {
            Vec2::new(field_aspect / viewport_aspect, 1.0)
        } else {
            Vec2::new(1.0, viewport_aspect / field_aspect)
        };
        Self { field, scale }
    }

    pub fn to_ndc(&self, position: [f32; 2]) -> [f32; 2] {
        let nx = (position[0] / self.field.x) * 2.0 - 1.0;
        let ny = 1.0 - (position[1] / self.field.y) * 2.0;
        [nx * self.scale.x, ny * self.scale.y]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELD: Vec2 = Vec2::new(700.0, 420.0);

    #[test]
    fn test_corners_fill_matching_viewport() {
        let lb = Letterbox::new(FIELD, (1400, 840));
        assert_eq!(lb.to_ndc([0.0, 0.0]), [-1.0, 1.0]);
        assert_eq!(lb.to_ndc([700.0, 420.0]), [1.0, -1.0]);
        assert_eq!(lb.to_ndc([350.0, 210.0]), [0.0, 0.0]);
    }

    #[test]
    fn test_wide_viewport_is_pillarboxed() {
        // 2:1 viewport, 5:3 field -> x shrinks
        let [x, y] = Letterbox::new(FIELD, (2000, 1000)).to_ndc([700.0, 0.0]);
        assert!(x < 1.0);
        assert_eq!(y, 1.0);
    }

    #[test]
    fn test_tall_viewport_is_letterboxed() {
        let [x, y] = Letterbox::new(FIELD, (700, 1000)).to_ndc([700.0, 0.0]);
        assert_eq!(x, 1.0);
        assert!(y < 1.0);
    }

    #[test]
    fn test_zero_viewport_does_not_nan() {
        let [x, y] = Letterbox::new(FIELD, (0, 0)).to_ndc([100.0, 100.0]);
        assert!(x.is_finite() && y.is_finite());
    }
}
