use crate::content::{GalleryItem, GALLERY_ERROR_MESSAGE};
use eframe::egui::accesskit::Role;
use std::time::{Duration, Instant};

/// Id shared by the menu button's `controls` attribute and the panel itself.
pub const PANEL_ID: &str = "menu";
pub const PANEL_LABEL: &str = "Menu";
pub const GALLERY_FADE_IN: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Closed,
    Open,
}

impl PanelState {
    pub fn toggle(self) -> Self {
        match self {
            PanelState::Closed => PanelState::Open,
            PanelState::Open => PanelState::Closed,
        }
    }

    pub fn is_open(self) -> bool {
        self == PanelState::Open
    }
}

/// Accessibility attributes of the menu toggle button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuButtonA11y {
    pub label: &'static str,
    pub caption: &'static str,
    pub expanded: bool,
    pub controls: &'static str,
}

impl MenuButtonA11y {
    pub fn for_state(state: PanelState) -> Self {
        let open = state.is_open();
        Self {
            label: if open { "Close menu" } else { "Open menu" },
            caption: if open { "Close" } else { "Menu" },
            expanded: open,
            controls: PANEL_ID,
        }
    }
}

/// Accessibility attributes of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelA11y {
    pub id: &'static str,
    pub role: Role,
    pub modal: bool,
    pub label: &'static str,
}

pub const PANEL_A11Y: PanelA11y = PanelA11y {
    id: PANEL_ID,
    role: Role::Dialog,
    modal: true,
    label: PANEL_LABEL,
};

/// What the gallery region of the panel shows.
#[derive(Debug, PartialEq, Eq)]
pub enum GalleryView<'a> {
    Loading,
    Error(&'a str),
    Grid(&'a [GalleryItem]),
}

/// Gallery contents plus its own loading/error flags.
///
/// Requests are numbered; only the result for the most recently issued
/// number is applied.
#[derive(Debug, Default)]
pub struct GalleryState {
    items: Vec<GalleryItem>,
    loading: bool,
    error: Option<String>,
    latest_request: u64,
    loaded_at: Option<Instant>,
}

impl GalleryState {
    /// Start a new request and return its sequence number.
    pub fn begin_request(&mut self) -> u64 {
        self.latest_request += 1;
        self.loading = true;
        self.error = None;
        self.latest_request
    }

    /// Apply the result of request `seq`. Returns `false` when the result
    /// belongs to a superseded request and was dropped.
    pub fn apply(&mut self, seq: u64, result: anyhow::Result<Vec<GalleryItem>>) -> bool {
        if seq != self.latest_request {
            tracing::debug!(seq, latest = self.latest_request, "dropping stale gallery result");
            return false;
        }
        match result {
            Ok(items) => {
                tracing::info!(count = items.len(), "gallery loaded");
                self.items = items;
                self.loaded_at = Some(Instant::now());
            }
            Err(e) => {
                tracing::error!("Failed to fetch images: {e:#}");
                self.error = Some(GALLERY_ERROR_MESSAGE.to_string());
            }
        }
        self.loading = false;
        true
    }

    pub fn view(&self) -> GalleryView<'_> {
        if self.loading {
            GalleryView::Loading
        } else if let Some(err) = &self.error {
            GalleryView::Error(err)
        } else {
            GalleryView::Grid(&self.items)
        }
    }

    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn latest_request(&self) -> u64 {
        self.latest_request
    }

    /// Opacity of freshly loaded cells, rising to `1.0` over
    /// [`GALLERY_FADE_IN`].
    pub fn fade_in(&self, now: Instant) -> f32 {
        match self.loaded_at {
            Some(at) => {
                let t = now.saturating_duration_since(at).as_secs_f32();
                (t / GALLERY_FADE_IN.as_secs_f32()).clamp(0.0, 1.0)
            }
            None => 1.0,
        }
    }
}
