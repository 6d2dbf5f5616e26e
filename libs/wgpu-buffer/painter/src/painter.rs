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
//! The painter: the only interface modules use to reach the renderer. It
//! carries per-frame state (color, flags, viewport, caps) and the clipping
//! convenience tests; actual drawing is delegated to whatever `Renderer`
//! the host installed.
use crate::flags::PainterFlags;
use crate::renderer::Renderer;
use nalgebra::{Point2, Point3, Vector3};
use orrery::Frame;
use projection::{Cap, Projection};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug)]
pub struct TextureSlot {
    pub id: u32,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DepthRange {
    pub near: f64,
    pub far: f64,
}

pub struct Painter {
    pub color: [f32; 4],
    pub fb_size: [u32; 2],
    pub pixel_scale: f64,
    pub flags: PainterFlags,
    pub line_width: f64,
    pub line_stripes: f64,
    pub point_smoothness: f64,
    pub depth_range: Option<DepthRange>,
    pub color_texture: Option<TextureSlot>,
    pub normal_texture: Option<TextureSlot>,

    projection: Box<dyn Projection>,
    viewport_cap: Cap,
    frame_caps: HashMap<Frame, Cap>,
}

impl Painter {
    pub fn new(projection: Box<dyn Projection>, fb_size: [u32; 2], pixel_scale: f64) -> Self {
        Self {
            color: [1.0, 1.0, 1.0, 1.0],
            fb_size,
            pixel_scale,
            flags: PainterFlags::empty(),
            line_width: 1.0,
            line_stripes: 0.0,
            point_smoothness: 1.0,
            depth_range: None,
            color_texture: None,
            normal_texture: None,
            projection,
            viewport_cap: Cap::full_sphere(),
            frame_caps: HashMap::new(),
        }
    }

    pub fn projection(&self) -> &dyn Projection {
        self.projection.as_ref()
    }

    pub fn set_projection(&mut self, projection: Box<dyn Projection>) {
        self.projection = projection;
    }

    pub fn set_viewport_cap(&mut self, cap: Cap) {
        self.viewport_cap = cap;
    }

    pub fn viewport_cap(&self) -> Cap {
        self.viewport_cap
    }

    pub fn set_frame_cap(&mut self, frame: Frame, cap: Cap) {
        self.frame_caps.insert(frame, cap);
    }

    pub fn frame_cap(&self, frame: Frame) -> Option<Cap> {
        self.frame_caps.get(&frame).copied()
    }

    /// Maps a view-space direction to a window position in pixels, through
    /// the active projection and the NDC→window affine transform.
    pub fn project(&self, v: &Vector3<f64>) -> Option<Point2<f64>> {
        let ndc = self.projection.project(v).ok()?;
        Some(self.ndc_to_window(ndc))
    }

    pub fn unproject(&self, win: &Point2<f64>) -> Vector3<f64> {
        let ndc = self.window_to_ndc(win);
        self.projection.unproject(&ndc)
    }

    fn ndc_to_window(&self, ndc: Point2<f64>) -> Point2<f64> {
        let (w, h) = (self.fb_size[0] as f64, self.fb_size[1] as f64);
        Point2::new((ndc.x * 0.5 + 0.5) * w, (0.5 - ndc.y * 0.5) * h)
    }

    fn window_to_ndc(&self, win: &Point2<f64>) -> Point2<f64> {
        let (w, h) = (self.fb_size[0] as f64, self.fb_size[1] as f64);
        Point2::new(win.x / w * 2.0 - 1.0, 1.0 - win.y / h * 2.0)
    }

    /// True if a healpix tile's cap cannot possibly intersect the current
    /// viewport cap in `frame` — a cheap reject before touching the tile's
    /// geometry at all.
    pub fn is_tile_clipped(&self, frame: Frame, tile_cap: &Cap) -> bool {
        match self.frame_cap(frame) {
            Some(cap) => cap.is_disjoint_from(tile_cap),
            None => false,
        }
    }

    /// True if a normalized view-space direction falls outside the current
    /// viewport cap; `is_point_clipped_fast` in the reference naming.
    pub fn is_point_clipped_fast(&self, p: &Vector3<f64>) -> bool {
        !self.viewport_cap.contains_point(p)
    }

    pub fn is_2d_point_clipped(&self, p: &Point2<f64>) -> bool {
        p.x < 0.0 || p.y < 0.0 || p.x > self.fb_size[0] as f64 || p.y > self.fb_size[1] as f64
    }

    pub fn is_2d_circle_clipped(&self, center: &Point2<f64>, radius: f64) -> bool {
        let (w, h) = (self.fb_size[0] as f64, self.fb_size[1] as f64);
        center.x + radius < 0.0 || center.y + radius < 0.0 || center.x - radius > w || center.y - radius > h
    }

    pub fn is_cap_clipped_fast(&self, cap: &Cap) -> bool {
        self.viewport_cap.is_disjoint_from(cap)
    }

    pub fn draw_points_2d(&self, renderer: &mut dyn Renderer, points: &[Point2<f64>]) -> anyhow::Result<()> {
        renderer.points_2d(self, points)
    }

    pub fn draw_points_3d(&self, renderer: &mut dyn Renderer, points: &[Point3<f64>]) -> anyhow::Result<()> {
        renderer.points_3d(self, points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use projection::PerspectiveProjection;

    fn test_painter() -> Painter {
        Painter::new(Box::new(PerspectiveProjection), [800, 600], 1.0)
    }

    #[test]
    fn forward_direction_projects_to_window_center() {
        let painter = test_painter();
        let p = painter.project(&Vector3::new(0.0, 0.0, 1.0)).unwrap();
        assert!((p.x - 400.0).abs() < 1e-9);
        assert!((p.y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn project_unproject_round_trips() {
        let painter = test_painter();
        let win = Point2::new(500.0, 200.0);
        let dir = painter.unproject(&win);
        let back = painter.project(&dir).unwrap();
        assert!((back.x - win.x).abs() < 1e-6);
        assert!((back.y - win.y).abs() < 1e-6);
    }

    #[test]
    fn point_outside_viewport_cap_is_clipped() {
        let mut painter = test_painter();
        painter.set_viewport_cap(Cap::new(Vector3::new(0.0, 0.0, 1.0), 0.99));
        assert!(painter.is_point_clipped_fast(&Vector3::new(0.0, 0.0, -1.0)));
        assert!(!painter.is_point_clipped_fast(&Vector3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn tile_with_no_registered_cap_is_never_clipped() {
        let painter = test_painter();
        let tile_cap = Cap::new(Vector3::new(1.0, 0.0, 0.0), 0.9);
        assert!(!painter.is_tile_clipped(Frame::Icrf, &tile_cap));
    }

    #[test]
    fn disjoint_tile_cap_is_clipped() {
        let mut painter = test_painter();
        painter.set_frame_cap(Frame::Observed, Cap::new(Vector3::new(0.0, 0.0, 1.0), 0.99));
        let tile_cap = Cap::new(Vector3::new(0.0, 0.0, -1.0), 0.99);
        assert!(painter.is_tile_clipped(Frame::Observed, &tile_cap));
    }
}
