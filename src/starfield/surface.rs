use super::{DrawSurface, FrameHost, GradientStop};
use eframe::egui::{self, epaint::Mesh, Color32, Pos2, Rect, Shape, Stroke, Vec2};

const GRADIENT_SEGMENTS: u32 = 64;

/// [`DrawSurface`] backed by an egui painter clipped to `rect`.
pub struct PainterSurface {
    painter: egui::Painter,
    rect: Rect,
}

impl PainterSurface {
    pub fn new(painter: &egui::Painter, rect: Rect) -> Self {
        Self {
            painter: painter.with_clip_rect(rect),
            rect,
        }
    }

    fn to_screen(&self, p: Pos2) -> Pos2 {
        self.rect.min + p.to_vec2()
    }
}

impl DrawSurface for PainterSurface {
    fn size(&self) -> Option<Vec2> {
        let size = self.rect.size();
        (size.x > 0.0 && size.y > 0.0).then_some(size)
    }

    fn clear(&mut self, color: Color32) {
        self.painter.rect_filled(self.rect, 0.0, color);
    }

    fn radial_gradient(&mut self, center: Pos2, radius: f32, stops: &[GradientStop]) {
        let Some((first, rest)) = stops.split_first() else {
            return;
        };
        if radius <= 0.0 {
            return;
        }
        let center = self.to_screen(center);
        let mut mesh = Mesh::default();
        mesh.colored_vertex(center, first.color());

        // Concentric rings, one per stop, stitched together with quads.
        let mut prev_ring: Option<u32> = None;
        for stop in rest {
            let r = radius * stop.offset;
            let color = stop.color();
            let base = mesh.vertices.len() as u32;
            for s in 0..GRADIENT_SEGMENTS {
                let angle = std::f32::consts::TAU * s as f32 / GRADIENT_SEGMENTS as f32;
                mesh.colored_vertex(center + Vec2::angled(angle) * r, color);
            }
            for s in 0..GRADIENT_SEGMENTS {
                let a = base + s;
                let b = base + (s + 1) % GRADIENT_SEGMENTS;
                match prev_ring {
                    None => mesh.add_triangle(0, a, b),
                    Some(prev) => {
                        let pa = prev + s;
                        let pb = prev + (s + 1) % GRADIENT_SEGMENTS;
                        mesh.add_triangle(pa, a, b);
                        mesh.add_triangle(pa, b, pb);
                    }
                }
            }
            prev_ring = Some(base);
        }
        self.painter.add(Shape::mesh(mesh));
    }

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32) {
        self.painter
            .circle_filled(self.to_screen(center), radius, color);
    }

    fn stroke_line(&mut self, from: Pos2, to: Pos2, stroke: Stroke) {
        self.painter
            .line_segment([self.to_screen(from), self.to_screen(to)], stroke);
    }
}

/// [`FrameHost`] for a live egui context.
pub struct EguiHost<'a> {
    ctx: &'a egui::Context,
}

impl<'a> EguiHost<'a> {
    pub fn new(ctx: &'a egui::Context) -> Self {
        Self { ctx }
    }
}

impl FrameHost for EguiHost<'_> {
    fn request_frame(&self) {
        self.ctx.request_repaint();
    }

    fn viewport_size(&self) -> Option<Vec2> {
        let size = self.ctx.input(|i| i.screen_rect().size());
        (size.x > 0.0 && size.y > 0.0).then_some(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::starfield::NEBULA_STOPS;

    #[test]
    fn painter_surface_reports_rect_size() {
        let ctx = egui::Context::default();
        let painter = egui::Painter::new(
            ctx,
            egui::LayerId::background(),
            Rect::from_min_size(Pos2::ZERO, Vec2::new(320.0, 240.0)),
        );
        let surface = PainterSurface::new(&painter, Rect::from_min_size(Pos2::ZERO, Vec2::new(320.0, 240.0)));
        assert_eq!(surface.size(), Some(Vec2::new(320.0, 240.0)));

        let empty = PainterSurface::new(&painter, Rect::from_min_size(Pos2::ZERO, Vec2::ZERO));
        assert_eq!(empty.size(), None);
    }

    #[test]
    fn gradient_accepts_nebula_stops() {
        let ctx = egui::Context::default();
        let _ = ctx.run(Default::default(), |ctx| {
            let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(100.0, 100.0));
            let painter = egui::Painter::new(ctx.clone(), egui::LayerId::background(), rect);
            let mut surface = PainterSurface::new(&painter, rect);
            surface.radial_gradient(Pos2::new(50.0, 50.0), 50.0, &NEBULA_STOPS);
            surface.radial_gradient(Pos2::new(50.0, 50.0), 50.0, &[]);
        });
    }
}
