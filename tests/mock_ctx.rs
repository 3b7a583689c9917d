#![allow(dead_code)]

use eframe::egui::{Color32, Pos2, Stroke, Vec2};
use starry_home::content::{ContentApi, GalleryItem, QuoteOfDay};
use starry_home::starfield::{DrawSurface, FrameHost, GradientStop};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Frame host with a mutable viewport that counts frame requests.
#[derive(Default)]
pub struct MockHost {
    pub frame_requests: Cell<usize>,
    pub viewport: RefCell<Option<Vec2>>,
}

impl MockHost {
    pub fn with_viewport(w: f32, h: f32) -> Self {
        Self {
            frame_requests: Cell::new(0),
            viewport: RefCell::new(Some(Vec2::new(w, h))),
        }
    }

    pub fn resize(&self, w: f32, h: f32) {
        *self.viewport.borrow_mut() = Some(Vec2::new(w, h));
    }
}

impl FrameHost for MockHost {
    fn request_frame(&self) {
        self.frame_requests.set(self.frame_requests.get() + 1);
    }

    fn viewport_size(&self) -> Option<Vec2> {
        *self.viewport.borrow()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(Color32),
    Gradient { center: Pos2, radius: f32, stops: usize },
    Circle { center: Pos2, radius: f32, color: Color32 },
    Line { from: Pos2, to: Pos2, stroke: Stroke },
}

/// Surface that records every call made against it.
pub struct RecordingSurface {
    pub size: Option<Vec2>,
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(w: f32, h: f32) -> Self {
        Self {
            size: Some(Vec2::new(w, h)),
            calls: Vec::new(),
        }
    }

    pub fn circles(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Circle { .. }))
            .count()
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> Option<Vec2> {
        self.size
    }

    fn clear(&mut self, color: Color32) {
        self.calls.push(DrawCall::Clear(color));
    }

    fn radial_gradient(&mut self, center: Pos2, radius: f32, stops: &[GradientStop]) {
        self.calls.push(DrawCall::Gradient {
            center,
            radius,
            stops: stops.len(),
        });
    }

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32) {
        self.calls.push(DrawCall::Circle {
            center,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: Pos2, to: Pos2, stroke: Stroke) {
        self.calls.push(DrawCall::Line { from, to, stroke });
    }
}

pub fn item(id: u64) -> GalleryItem {
    GalleryItem {
        id,
        title: format!("Title {id}"),
        author: format!("Author {id}"),
        image_url: format!("https://img.example/{id}.png"),
    }
}

pub fn items(range: std::ops::Range<u64>) -> Vec<GalleryItem> {
    range.map(item).collect()
}

/// Scripted gallery response: optional delay, then items or an error text.
pub struct Scripted {
    pub delay: Duration,
    pub result: Result<Vec<GalleryItem>, String>,
}

/// Content API returning canned answers.
pub struct MockApi {
    pub quote: Mutex<Option<Result<QuoteOfDay, String>>>,
    pub quote_delay: Duration,
    pub gallery: Mutex<VecDeque<Scripted>>,
    pub quote_calls: AtomicUsize,
    pub gallery_calls: Mutex<Vec<(bool, usize)>>,
}

impl MockApi {
    pub fn new(quote: Result<QuoteOfDay, String>) -> Self {
        Self {
            quote: Mutex::new(Some(quote)),
            quote_delay: Duration::ZERO,
            gallery: Mutex::new(VecDeque::new()),
            quote_calls: AtomicUsize::new(0),
            gallery_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_quote_delay(mut self, delay: Duration) -> Self {
        self.quote_delay = delay;
        self
    }

    pub fn push_gallery(&self, delay: Duration, result: Result<Vec<GalleryItem>, String>) {
        self.gallery
            .lock()
            .unwrap()
            .push_back(Scripted { delay, result });
    }
}

impl ContentApi for MockApi {
    fn fetch_quote(&self) -> anyhow::Result<QuoteOfDay> {
        self.quote_calls.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(self.quote_delay);
        let answer = self.quote.lock().unwrap().clone();
        match answer {
            Some(Ok(q)) => Ok(q),
            Some(Err(e)) => Err(anyhow::anyhow!(e)),
            None => Err(anyhow::anyhow!("no quote scripted")),
        }
    }

    fn fetch_gallery(&self, show_restricted: bool, count: usize) -> anyhow::Result<Vec<GalleryItem>> {
        let next = self.gallery.lock().unwrap().pop_front();
        self.gallery_calls
            .lock()
            .unwrap()
            .push((show_restricted, count));
        match next {
            Some(s) => {
                std::thread::sleep(s.delay);
                s.result.map_err(|e| anyhow::anyhow!(e))
            }
            None => Err(anyhow::anyhow!("no gallery response scripted")),
        }
    }
}

pub fn quote(text: &str, from: &str, from_who: Option<&str>) -> QuoteOfDay {
    QuoteOfDay {
        text: text.into(),
        source: from.into(),
        source_author: from_who.map(str::to_owned),
    }
}
