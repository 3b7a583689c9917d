mod surface;

pub use surface::{EguiHost, PainterSurface};

use crate::lifecycle::MountToken;
use crate::stars::StarPoint;
use eframe::egui::{pos2, Color32, Pos2, Stroke, Vec2};
use std::sync::Arc;

/// Radius of the circle traced by the shooting star.
pub const SHOOTING_STAR_ORBIT: f32 = 100.0;
/// Offset from the shooting star's head to the end of its tail.
pub const SHOOTING_STAR_TAIL: Vec2 = Vec2::new(-10.0, -10.0);
pub const SHOOTING_STAR_WIDTH: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub rgb: [u8; 3],
    pub alpha: f32,
}

impl GradientStop {
    pub fn color(&self) -> Color32 {
        let a = (self.alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color32::from_rgba_unmultiplied(self.rgb[0], self.rgb[1], self.rgb[2], a)
    }
}

/// Nebula stops: transparent midnight blue, faint slate violet, transparent.
pub const NEBULA_STOPS: [GradientStop; 3] = [
    GradientStop { offset: 0.0, rgb: [25, 25, 112], alpha: 0.0 },
    GradientStop { offset: 0.5, rgb: [72, 61, 139], alpha: 0.1 },
    GradientStop { offset: 1.0, rgb: [25, 25, 112], alpha: 0.0 },
];

/// Something the starfield can paint into, in canvas-local coordinates.
pub trait DrawSurface {
    /// Current drawable size, or `None` when there is nothing to draw into.
    fn size(&self) -> Option<Vec2>;
    fn clear(&mut self, color: Color32);
    fn radial_gradient(&mut self, center: Pos2, radius: f32, stops: &[GradientStop]);
    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32);
    fn stroke_line(&mut self, from: Pos2, to: Pos2, stroke: Stroke);
}

/// The window hosting the canvas: provides frame scheduling and the viewport
/// size that the canvas tracks.
pub trait FrameHost {
    /// Ask for one more frame at the display's refresh rate.
    fn request_frame(&self);
    fn viewport_size(&self) -> Option<Vec2>;
}

/// Head and tail of the shooting star for wall-clock time `now_seconds`.
pub fn shooting_star(canvas: Vec2, now_seconds: f64) -> (Pos2, Pos2) {
    let head = pos2(
        (now_seconds.cos() as f32) * SHOOTING_STAR_ORBIT + canvas.x / 2.0,
        (now_seconds.sin() as f32) * SHOOTING_STAR_ORBIT + canvas.y / 2.0,
    );
    (head, head + SHOOTING_STAR_TAIL)
}

/// Paint one complete frame of the starfield.
pub fn paint_frame(surface: &mut dyn DrawSurface, stars: &[StarPoint], canvas: Vec2, now_seconds: f64) {
    surface.clear(Color32::BLACK);

    let center = pos2(canvas.x / 2.0, canvas.y / 2.0);
    surface.radial_gradient(center, canvas.x / 2.0, &NEBULA_STOPS);

    for star in stars {
        surface.fill_circle(
            pos2(star.x, star.y),
            star.radius,
            star.color.with_opacity(star.opacity),
        );
    }

    let (head, tail) = shooting_star(canvas, now_seconds);
    surface.stroke_line(head, tail, Stroke::new(SHOOTING_STAR_WIDTH, Color32::WHITE));
}

/// Seconds since the Unix epoch with millisecond precision.
pub fn now_seconds() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 * 0.001
}

/// Self-rescheduling starfield animation bound to a mount lifetime.
///
/// Each [`StarfieldRenderer::tick`] redraws the whole canvas and requests the
/// next frame. After [`StarfieldRenderer::unmount`] ticks are inert: nothing
/// is drawn, no frame is requested and viewport changes are ignored.
pub struct StarfieldRenderer {
    stars: Arc<[StarPoint]>,
    token: MountToken,
    canvas_size: Vec2,
    resize_subscribed: bool,
    frame_pending: bool,
    frames_drawn: u64,
}

impl StarfieldRenderer {
    pub fn mount(stars: Arc<[StarPoint]>, host: &dyn FrameHost) -> Self {
        let mut renderer = Self {
            stars,
            token: MountToken::new(),
            canvas_size: Vec2::ZERO,
            resize_subscribed: true,
            frame_pending: false,
            frames_drawn: 0,
        };
        renderer.sync_canvas_size(host);
        host.request_frame();
        renderer.frame_pending = true;
        tracing::debug!(stars = renderer.stars.len(), size = ?renderer.canvas_size, "starfield mounted");
        renderer
    }

    fn sync_canvas_size(&mut self, host: &dyn FrameHost) {
        if !self.resize_subscribed {
            return;
        }
        if let Some(size) = host.viewport_size() {
            if size != self.canvas_size {
                tracing::trace!(from = ?self.canvas_size, to = ?size, "canvas resized");
                self.canvas_size = size;
            }
        }
    }

    /// Service one animation frame. Returns `true` if a frame was painted.
    pub fn tick(
        &mut self,
        host: &dyn FrameHost,
        surface: Option<&mut dyn DrawSurface>,
        now_seconds: f64,
    ) -> bool {
        if !self.token.is_live() {
            return false;
        }
        self.frame_pending = false;
        self.sync_canvas_size(host);

        let Some(surface) = surface else {
            return false;
        };
        if surface.size().is_none() || self.canvas_size.x <= 0.0 || self.canvas_size.y <= 0.0 {
            return false;
        }

        paint_frame(surface, &self.stars, self.canvas_size, now_seconds);
        self.frames_drawn += 1;

        host.request_frame();
        self.frame_pending = true;
        true
    }

    /// Cancel the pending frame and drop the resize subscription.
    pub fn unmount(&mut self) {
        if self.token.cancel() {
            self.frame_pending = false;
            self.resize_subscribed = false;
            tracing::debug!(frames = self.frames_drawn, "starfield unmounted");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.token.is_live()
    }

    pub fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    pub fn resize_subscribed(&self) -> bool {
        self.resize_subscribed
    }

    pub fn canvas_size(&self) -> Vec2 {
        self.canvas_size
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn stars(&self) -> &Arc<[StarPoint]> {
        &self.stars
    }
}

impl Drop for StarfieldRenderer {
    fn drop(&mut self) {
        self.unmount();
    }
}
