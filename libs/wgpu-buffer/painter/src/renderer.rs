// This file is part of Nitrogen.
//
// Nitrogen is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// Nitrogen is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with Nitrogen.  If not, see <http://www.gnu.org/licenses/>.
//! The renderer contract: anything implementing this trait can sit behind
//! a `Painter`. The painter itself never touches a GPU directly — it only
//! ever calls through `Renderer`, so a software rasterizer or a test stub
//! are just as valid a backend as a real wgpu pipeline.
use crate::Painter;
use anyhow::Result;
use nalgebra::{Matrix4, Point2, Point3, Vector3};
use projection::Projection;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MeshMode {
    Triangles,
    Lines,
    Points,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TextAlign {
    pub horizontal_center: bool,
    pub vertical_center: bool,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TextEffects {
    pub outline: bool,
    pub bold: bool,
}

/// A 3-D point with a pre-computed window-space position, as the renderer
/// contract's `line(positions[][3], win[][3], size)` pairs them.
#[derive(Clone, Copy, Debug)]
pub struct LineVertex {
    pub position: Point3<f64>,
    pub window: Point3<f64>,
}

#[derive(Clone, Copy, Debug)]
pub struct Model3dArgs<'a> {
    pub model_matrix: &'a Matrix4<f64>,
    pub view_matrix: &'a Matrix4<f64>,
    pub proj_matrix: &'a Matrix4<f64>,
    pub light_direction: Vector3<f64>,
}

/// How finely a curved quad (e.g. a HiPS tile projected onto the sphere)
/// should be tessellated before handing it to the renderer.
#[derive(Clone, Copy, Debug)]
pub struct UvMap {
    pub grid_size: u32,
    pub uv: [[f64; 2]; 4],
}

pub trait Renderer {
    fn prepare(&mut self, projection: &dyn Projection, win_w: u32, win_h: u32, pixel_scale: f64, cull_flipped: bool) -> Result<()>;
    fn finish(&mut self) -> Result<()>;

    fn points_2d(&mut self, painter: &Painter, points: &[Point2<f64>]) -> Result<()>;
    fn points_3d(&mut self, painter: &Painter, points: &[Point3<f64>]) -> Result<()>;

    fn quad(&mut self, painter: &Painter, uv_map: &UvMap) -> Result<()>;
    fn texture(&mut self, uv: [[f64; 2]; 4], pos: Point2<f64>, size: [f64; 2], color: [f32; 4], angle: f64) -> Result<()>;
    fn text(&mut self, painter: &Painter, text: &str, win_pos: Point2<f64>, view_pos: Point3<f64>, align: TextAlign, effects: TextEffects, size: f64, color: [f32; 4], angle: f64) -> Result<[f64; 4]>;
    fn line(&mut self, painter: &Painter, vertices: &[LineVertex], size: f64) -> Result<()>;
    fn mesh(&mut self, painter: &Painter, mode: MeshMode, verts: &[Point3<f64>], indices: &[u32], use_stencil: bool) -> Result<()>;

    fn ellipse_2d(&mut self, painter: &Painter, center: Point2<f64>, radii: [f64; 2], angle: f64) -> Result<()>;
    fn rect_2d(&mut self, painter: &Painter, center: Point2<f64>, size: [f64; 2], angle: f64) -> Result<()>;
    fn line_2d(&mut self, painter: &Painter, a: Point2<f64>, b: Point2<f64>, width: f64) -> Result<()>;
    fn model_3d(&mut self, args: Model3dArgs) -> Result<()>;
}
