use super::camera::Camera;
use super::context::GpuContext;
use super::mesh::{Mesh, MeshData};
use super::pipeline::{RenderPipelines, Uniforms};
use crate::wrist::{WristFrames, WristJoint};
use glam::{Mat4, Vec3};

const MAX_INSTANCES: usize = 32;

const GRID_HEIGHT: f32 = -3.0;
const JOINT_RADIUS: f32 = 0.12;
const AXIS_LENGTH: f32 = 1.2;
const AXIS_RADIUS: f32 = 0.025;

const LINK_COLOR: [f32; 4] = [0.85, 0.85, 0.9, 1.0];
const BRACE_COLOR: [f32; 4] = [0.55, 0.6, 0.7, 1.0];
const ACTIVE_COLOR: [f32; 4] = [1.0, 0.8, 0.2, 1.0];
const GRID_COLOR: [f32; 4] = [0.25, 0.25, 0.3, 1.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Grid,
    WireBox,
    Sphere,
    Cylinder,
}

impl Shape {
    fn is_line(self) -> bool {
        matches!(self, Shape::Grid | Shape::WireBox)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DrawItem {
    pub shape: Shape,
    pub model: Mat4,
    pub color: [f32; 4],
}

fn joint_color(joint: WristJoint) -> [f32; 4] {
    match joint {
        WristJoint::Pronation => [0.9, 0.3, 0.3, 1.0],
        WristJoint::Deviation => [0.3, 0.85, 0.3, 1.0],
        WristJoint::Flexion => [0.3, 0.5, 0.95, 1.0],
    }
}

/// Everything to draw for one frame. Parts riding on `active` are highlighted.
pub fn draw_list(frames: &WristFrames, active: Option<WristJoint>) -> Vec<DrawItem> {
    let mut items = Vec::with_capacity(1 + frames.links.len() + 2 * frames.pivots.len());

    items.push(DrawItem {
        shape: Shape::Grid,
        model: Mat4::from_translation(Vec3::new(0.0, GRID_HEIGHT, 0.0)),
        color: GRID_COLOR,
    });

    for link in &frames.links {
        let color = if Some(link.kind.driven_by()) == active {
            ACTIVE_COLOR
        } else if link.kind.is_brace() {
            BRACE_COLOR
        } else {
            LINK_COLOR
        };
        items.push(DrawItem {
            shape: Shape::WireBox,
            model: link.model_matrix(),
            color,
        });
    }

    for pivot in &frames.pivots {
        let color = if Some(pivot.joint) == active {
            ACTIVE_COLOR
        } else {
            joint_color(pivot.joint)
        };
        items.push(DrawItem {
            shape: Shape::Sphere,
            model: Mat4::from_translation(pivot.position) * Mat4::from_scale(Vec3::splat(JOINT_RADIUS)),
            color,
        });

        let half = pivot.axis * AXIS_LENGTH * 0.5;
        items.push(DrawItem {
            shape: Shape::Cylinder,
            model: Mesh::segment_transform(pivot.position - half, pivot.position + half)
                * Mat4::from_scale(Vec3::new(AXIS_RADIUS, 1.0, AXIS_RADIUS)),
            color: joint_color(pivot.joint),
        });
    }

    items.truncate(MAX_INSTANCES);
    items
}

/// Draws the wireframe exoskeleton, joint markers and a floor grid.
pub struct WristRenderer {
    pipelines: RenderPipelines,
    grid_mesh: Mesh,
    box_mesh: Mesh,
    sphere_mesh: Mesh,
    cylinder_mesh: Mesh,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    uniform_alignment: u32,
}

impl WristRenderer {
    pub fn new(context: &GpuContext) -> Self {
        let device = &context.device;
        let pipelines = RenderPipelines::new(context);

        let grid_mesh = Mesh::upload(device, "Grid", &MeshData::grid(8.0, 16));
        let box_mesh = Mesh::upload(device, "Wire Box", &MeshData::wireframe_box(Vec3::splat(0.5)));
        let sphere_mesh = Mesh::upload(device, "Sphere", &MeshData::sphere(1.0, 16, 12));
        let cylinder_mesh = Mesh::upload(device, "Cylinder", &MeshData::cylinder(1.0, 1.0, 12));

        let uniform_alignment = device.limits().min_uniform_buffer_offset_alignment;
        let aligned_size = Self::align_to(std::mem::size_of::<Uniforms>() as u32, uniform_alignment);
        let buffer_size = (aligned_size as usize * MAX_INSTANCES) as u64;

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Dynamic Uniform Buffer"),
            size: buffer_size,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = pipelines.create_dynamic_bind_group(device, &uniform_buffer);

        Self {
            pipelines,
            grid_mesh,
            box_mesh,
            sphere_mesh,
            cylinder_mesh,
            uniform_buffer,
            bind_group,
            uniform_alignment,
        }
    }

    fn align_to(size: u32, alignment: u32) -> u32 {
        (size + alignment - 1) & !(alignment - 1)
    }

    fn mesh(&self, shape: Shape) -> &Mesh {
        match shape {
            Shape::Grid => &self.grid_mesh,
            Shape::WireBox => &self.box_mesh,
            Shape::Sphere => &self.sphere_mesh,
            Shape::Cylinder => &self.cylinder_mesh,
        }
    }

    pub fn render(
        &self,
        context: &GpuContext,
        view: &wgpu::TextureView,
        frames: &WristFrames,
        active: Option<WristJoint>,
        camera: &Camera,
    ) {
        let view_proj = camera.view_projection().to_cols_array_2d();
        let aligned_size =
            Self::align_to(std::mem::size_of::<Uniforms>() as u32, self.uniform_alignment) as usize;

        let items = draw_list(frames, active);
        let mut uniform_data = vec![0u8; aligned_size * MAX_INSTANCES];
        for (i, item) in items.iter().enumerate() {
            let uniforms = Uniforms {
                view_proj,
                model: item.model.to_cols_array_2d(),
                color: item.color,
            };
            let offset = i * aligned_size;
            let bytes = bytemuck::bytes_of(&uniforms);
            uniform_data[offset..offset + bytes.len()].copy_from_slice(bytes);
        }
        context.queue.write_buffer(&self.uniform_buffer, 0, &uniform_data);

        let mut encoder = context.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Wrist Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.0,
                            g: 0.0,
                            b: 0.0,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &context.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            for lines in [false, true] {
                let pipeline = if lines {
                    &self.pipelines.line
                } else {
                    &self.pipelines.solid
                };
                render_pass.set_pipeline(pipeline);

                for (i, item) in items.iter().enumerate() {
                    if item.shape.is_line() != lines {
                        continue;
                    }
                    let offset = (i * aligned_size) as u32;
                    render_pass.set_bind_group(0, &self.bind_group, &[offset]);
                    self.mesh(item.shape).draw(&mut render_pass);
                }
            }
        }

        context.queue.submit(std::iter::once(encoder.finish()));
    }
}
