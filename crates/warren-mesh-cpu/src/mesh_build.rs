use warren_geom::Vec3;

/// Index width the presentation host must upload with. Indices are stored
/// as `u32`; hosts with a 16-bit path may narrow when the format says so.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum IndexFormat {
    U16,
    U32,
}

impl IndexFormat {
    /// Meshes past the 16-bit vertex limit must use wide indices.
    #[inline]
    pub fn for_vertex_count(verts: usize) -> IndexFormat {
        if verts > u16::MAX as usize {
            IndexFormat::U32
        } else {
            IndexFormat::U16
        }
    }
}

/// Append-only vertex/normal/UV/index buffers. Triangle indices always
/// reference the four most recently appended vertices.
#[derive(Default, Clone)]
pub struct MeshBuild {
    pub pos: Vec<f32>,
    pub norm: Vec<f32>,
    pub uv: Vec<f32>,
    pub idx: Vec<u32>,
}

impl MeshBuild {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.idx.is_empty()
    }

    /// Pre-reserve capacity for approximately `n_quads` quads.
    pub fn reserve_quads(&mut self, n_quads: usize) {
        self.pos.reserve(n_quads * 4 * 3);
        self.norm.reserve(n_quads * 4 * 3);
        self.uv.reserve(n_quads * 4 * 2);
        self.idx.reserve(n_quads * 6);
    }

    /// Appends one quad: four vertices sharing `normal`, two triangles in
    /// fixed winding (`v,v+1,v+2` and `v,v+2,v+3`).
    pub fn add_quad(&mut self, corners: [Vec3; 4], normal: Vec3, uvs: [(f32, f32); 4]) {
        let base = self.vertex_count() as u32;
        for (c, (u, v)) in corners.iter().zip(uvs.iter()) {
            self.pos.extend_from_slice(&[c.x, c.y, c.z]);
            self.norm.extend_from_slice(&[normal.x, normal.y, normal.z]);
            self.uv.extend_from_slice(&[*u, *v]);
        }
        self.idx
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}
