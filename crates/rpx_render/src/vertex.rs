#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ScreenVertex {
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
}

impl ScreenVertex {
    /// Two triangles covering clip space, with the raster's row 0 at the top.
    pub const FULLSCREEN_QUAD: [ScreenVertex; 6] = [
        ScreenVertex { position: [-1.0, -1.0], tex_coords: [0.0, 1.0] },
        ScreenVertex { position: [1.0, -1.0], tex_coords: [1.0, 1.0] },
        ScreenVertex { position: [1.0, 1.0], tex_coords: [1.0, 0.0] },
        ScreenVertex { position: [-1.0, -1.0], tex_coords: [0.0, 1.0] },
        ScreenVertex { position: [1.0, 1.0], tex_coords: [1.0, 0.0] },
        ScreenVertex { position: [-1.0, 1.0], tex_coords: [0.0, 0.0] },
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ScreenVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // position
                wgpu::VertexAttribute {
                    offset: std::mem::offset_of!(ScreenVertex, position) as wgpu::BufferAddress,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                // tex_coords
                wgpu::VertexAttribute {
                    offset: std::mem::offset_of!(ScreenVertex, tex_coords) as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_covers_clip_space_corners() {
        let xs: Vec<f32> = ScreenVertex::FULLSCREEN_QUAD.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = ScreenVertex::FULLSCREEN_QUAD.iter().map(|v| v.position[1]).collect();
        assert!(xs.contains(&-1.0) && xs.contains(&1.0));
        assert!(ys.contains(&-1.0) && ys.contains(&1.0));
    }

    #[test]
    fn top_of_screen_samples_first_row() {
        for v in ScreenVertex::FULLSCREEN_QUAD {
            let expected_v = if v.position[1] > 0.0 { 0.0 } else { 1.0 };
            assert_eq!(v.tex_coords[1], expected_v);
        }
    }

    #[test]
    fn layout_stride_matches_struct() {
        assert_eq!(ScreenVertex::layout().array_stride, 16);
    }
}
