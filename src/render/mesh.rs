use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use std::f32::consts::PI;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            wgpu::VertexAttribute {
                offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x3,
            },
        ],
    };

    fn line(position: [f32; 3]) -> Self {
        Self {
            position,
            normal: [0.0; 3],
        }
    }
}

/// CPU-side geometry, uploaded with [`Mesh::upload`].
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Triangle-list sphere.
    pub fn sphere(radius: f32, segments: u32, rings: u32) -> Self {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        for ring in 0..=rings {
            let phi = PI * ring as f32 / rings as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            for seg in 0..=segments {
                let theta = 2.0 * PI * seg as f32 / segments as f32;
                let (sin_theta, cos_theta) = theta.sin_cos();

                let x = sin_phi * cos_theta;
                let y = cos_phi;
                let z = sin_phi * sin_theta;

                vertices.push(Vertex {
                    position: [x * radius, y * radius, z * radius],
                    normal: [x, y, z],
                });
            }
        }

        for ring in 0..rings {
            for seg in 0..segments {
                let curr_ring = ring * (segments + 1);
                let next_ring = (ring + 1) * (segments + 1);

                indices.extend_from_slice(&[
                    curr_ring + seg,
                    next_ring + seg,
                    next_ring + seg + 1,
                    curr_ring + seg,
                    next_ring + seg + 1,
                    curr_ring + seg + 1,
                ]);
            }
        }

        Self { vertices, indices }
    }

    /// Open-ended triangle-list cylinder along Y, centred on the origin.
    pub fn cylinder(radius: f32, height: f32, segments: u32) -> Self {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        let half_height = height / 2.0;

        for i in 0..=segments {
            let theta = 2.0 * PI * i as f32 / segments as f32;
            let (z, x) = theta.sin_cos();

            vertices.push(Vertex {
                position: [x * radius, -half_height, z * radius],
                normal: [x, 0.0, z],
            });
            vertices.push(Vertex {
                position: [x * radius, half_height, z * radius],
                normal: [x, 0.0, z],
            });
        }

        for i in 0..segments {
            let base = i * 2;
            indices.extend_from_slice(&[base, base + 1, base + 3, base, base + 3, base + 2]);
        }

        Self { vertices, indices }
    }

    /// Line-list cube, the equivalent of a wire cube of edge `2 * half_extents`.
    pub fn wireframe_box(half_extents: Vec3) -> Self {
        let Vec3 { x: hx, y: hy, z: hz } = half_extents;

        let vertices = vec![
            Vertex::line([-hx, -hy, -hz]),
            Vertex::line([hx, -hy, -hz]),
            Vertex::line([hx, hy, -hz]),
            Vertex::line([-hx, hy, -hz]),
            Vertex::line([-hx, -hy, hz]),
            Vertex::line([hx, -hy, hz]),
            Vertex::line([hx, hy, hz]),
            Vertex::line([-hx, hy, hz]),
        ];

        let indices = vec![
            0, 1, 1, 2, 2, 3, 3, 0,
            4, 5, 5, 6, 6, 7, 7, 4,
            0, 4, 1, 5, 2, 6, 3, 7,
        ];

        Self { vertices, indices }
    }

    /// Line-list grid on the XZ plane with `cells` squares per side.
    pub fn grid(half_size: f32, cells: u32) -> Self {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        let cells = cells.max(1);

        for i in 0..=cells {
            let offset = -half_size + 2.0 * half_size * i as f32 / cells as f32;
            let base = vertices.len() as u32;
            vertices.push(Vertex::line([offset, 0.0, -half_size]));
            vertices.push(Vertex::line([offset, 0.0, half_size]));
            vertices.push(Vertex::line([-half_size, 0.0, offset]));
            vertices.push(Vertex::line([half_size, 0.0, offset]));
            indices.extend_from_slice(&[base, base + 1, base + 2, base + 3]);
        }

        Self { vertices, indices }
    }
}

pub struct Mesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl Mesh {
    pub fn upload(device: &wgpu::Device, label: &str, data: &MeshData) -> Self {
        use wgpu::util::DeviceExt;

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertex Buffer")),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Index Buffer")),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
        }
    }

    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }

    /// Maps the unit Y-axis cylinder onto the segment `start..end`.
    pub fn segment_transform(start: Vec3, end: Vec3) -> Mat4 {
        let direction = end - start;
        let length = direction.length();

        if length < 0.0001 {
            return Mat4::from_translation(start);
        }

        let up = direction / length;
        let right = if up.y.abs() < 0.999 {
            Vec3::Y.cross(up).normalize()
        } else {
            Vec3::X.cross(up).normalize()
        };
        let forward = up.cross(right);
        let center = (start + end) / 2.0;

        Mat4::from_cols(
            right.extend(0.0),
            (up * length).extend(0.0),
            forward.extend(0.0),
            center.extend(1.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wireframe_box_has_twelve_edges() {
        let data = MeshData::wireframe_box(Vec3::splat(0.5));
        assert_eq!(data.vertices.len(), 8);
        assert_eq!(data.indices.len(), 24);
        assert!(data.vertices.iter().all(|v| v.position.iter().all(|c| c.abs() == 0.5)));
    }

    #[test]
    fn test_sphere_indices_in_range() {
        let data = MeshData::sphere(1.0, 12, 8);
        let count = data.vertices.len() as u32;
        assert_eq!(data.indices.len() % 3, 0);
        assert!(data.indices.iter().all(|&i| i < count));
    }

    #[test]
    fn test_grid_line_count() {
        let data = MeshData::grid(5.0, 10);
        assert_eq!(data.indices.len(), 11 * 4);
    }

    #[test]
    fn test_segment_transform_maps_unit_cylinder_ends() {
        let start = Vec3::new(1.0, 0.0, 0.0);
        let end = Vec3::new(1.0, 0.0, 2.0);
        let m = Mesh::segment_transform(start, end);
        assert!((m.transform_point3(Vec3::new(0.0, -0.5, 0.0)) - start).length() < 1e-5);
        assert!((m.transform_point3(Vec3::new(0.0, 0.5, 0.0)) - end).length() < 1e-5);
    }
}
