//! Interleaved vertex format for GPU upload.

/// One interleaved vertex: position, normal and RGBA color (40 bytes).
///
/// Layout:
///   - `[0..12]`  position `[f32; 3]`
///   - `[12..24]` normal `[f32; 3]`
///   - `[24..40]` color `[f32; 4]`
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Position on (or just above) the unit sphere.
    pub position: [f32; 3],
    /// Shading normal.
    pub normal: [f32; 3],
    /// Vertex color.
    pub color: [f32; 4],
}

static_assertions::assert_eq_size!(MeshVertex, [u8; 40]);

/// View a vertex slice as raw bytes.
pub fn as_bytes(vertices: &[MeshVertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}
