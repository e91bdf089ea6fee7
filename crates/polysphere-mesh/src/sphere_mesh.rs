//! Mesh buffers produced from a geodesic sphere, with compact index storage.

use crate::packed::MeshVertex;

/// Largest vertex count whose indices all fit in `u16`.
const U16_VERTEX_LIMIT: usize = u16::MAX as usize + 1;

/// Storage width of an index buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexWidth {
    /// 16-bit indices.
    U16,
    /// 32-bit indices.
    U32,
}

/// Triangle or line indices stored at the narrowest width that fits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IndexBuffer {
    /// Used when every vertex index fits in `u16`.
    U16(Vec<u16>),
    /// Used for larger meshes.
    U32(Vec<u32>),
}

impl IndexBuffer {
    /// Pick the width for a mesh with `vertex_count` vertices and convert.
    ///
    /// The choice depends only on the vertex count, so it is stable for a
    /// given tessellation regardless of which primitives were emitted.
    pub fn with_vertex_count(indices: Vec<u32>, vertex_count: usize) -> Self {
        if vertex_count <= U16_VERTEX_LIMIT {
            IndexBuffer::U16(indices.into_iter().map(|i| i as u16).collect())
        } else {
            IndexBuffer::U32(indices)
        }
    }

    /// Width of the stored indices.
    pub fn width(&self) -> IndexWidth {
        match self {
            IndexBuffer::U16(_) => IndexWidth::U16,
            IndexBuffer::U32(_) => IndexWidth::U32,
        }
    }

    /// Number of indices.
    pub fn len(&self) -> usize {
        match self {
            IndexBuffer::U16(v) => v.len(),
            IndexBuffer::U32(v) => v.len(),
        }
    }

    /// Returns `true` if there are no indices.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index at position `i`, widened to `u32`.
    pub fn get(&self, i: usize) -> Option<u32> {
        match self {
            IndexBuffer::U16(v) => v.get(i).map(|&x| u32::from(x)),
            IndexBuffer::U32(v) => v.get(i).copied(),
        }
    }

    /// All indices widened to `u32`.
    pub fn to_u32(&self) -> Vec<u32> {
        match self {
            IndexBuffer::U16(v) => v.iter().map(|&x| u32::from(x)).collect(),
            IndexBuffer::U32(v) => v.clone(),
        }
    }

    /// Raw bytes for GPU upload.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            IndexBuffer::U16(v) => bytemuck::cast_slice(v),
            IndexBuffer::U32(v) => bytemuck::cast_slice(v),
        }
    }
}

/// How the index buffer is to be interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Primitive {
    /// 3 indices per triangle.
    Triangles,
    /// 2 indices per line segment.
    Lines,
}

/// Plain numeric buffers for one drawable mesh.
///
/// `positions`, `normals` and `colors` are parallel per-vertex arrays.
#[derive(Clone, Debug, PartialEq)]
pub struct SphereMesh {
    /// Vertex positions.
    pub positions: Vec<[f32; 3]>,
    /// Vertex normals.
    pub normals: Vec<[f32; 3]>,
    /// Vertex RGBA colors.
    pub colors: Vec<[f32; 4]>,
    /// Primitive indices.
    pub indices: IndexBuffer,
    /// Primitive type of `indices`.
    pub primitive: Primitive,
}

impl SphereMesh {
    /// Assemble a mesh, choosing the index width from the vertex count.
    pub fn new(
        positions: Vec<[f32; 3]>,
        normals: Vec<[f32; 3]>,
        colors: Vec<[f32; 4]>,
        indices: Vec<u32>,
        primitive: Primitive,
    ) -> Self {
        debug_assert_eq!(positions.len(), normals.len());
        debug_assert_eq!(positions.len(), colors.len());
        let indices = IndexBuffer::with_vertex_count(indices, positions.len());
        Self {
            positions,
            normals,
            colors,
            indices,
            primitive,
        }
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles or line segments.
    pub fn primitive_count(&self) -> usize {
        match self.primitive {
            Primitive::Triangles => self.indices.len() / 3,
            Primitive::Lines => self.indices.len() / 2,
        }
    }

    /// Returns `true` if the mesh has no vertices.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Interleave the parallel arrays into packed vertices.
    pub fn interleaved(&self) -> Vec<MeshVertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .zip(&self.colors)
            .map(|((&position, &normal), &color)| MeshVertex {
                position,
                normal,
                color,
            })
            .collect()
    }
}
