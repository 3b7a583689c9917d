use crate::content::{ContentApi, GalleryItem, QuoteOfDay, GALLERY_COUNT, QUOTE_ERROR_MESSAGE};
use crate::lifecycle::MountToken;
use crate::panel::{GalleryState, MenuButtonA11y, PanelState};
use crate::stars::{StarField, StarPoint};
use eframe::egui::Vec2;
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const CONTENT_FADE_IN: Duration = Duration::from_secs(1);

/// Callback used by fetch workers to wake the UI once their result is queued.
pub type Waker = Arc<dyn Fn() + Send + Sync>;

/// Page-level UI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub panel: PanelState,
    pub content_filter_enabled: bool,
    pub loading: bool,
    pub error_message: Option<String>,
    pub content_revealed: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            panel: PanelState::Closed,
            content_filter_enabled: false,
            loading: true,
            error_message: None,
            content_revealed: false,
        }
    }
}

impl UiState {
    pub fn panel_open(&self) -> bool {
        self.panel.is_open()
    }
}

/// Result of a background fetch, sent back to the UI thread.
pub enum FetchOutcome {
    Quote(anyhow::Result<QuoteOfDay>),
    Gallery {
        seq: u64,
        result: anyhow::Result<Vec<GalleryItem>>,
    },
}

/// What the top level of the window should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageView {
    /// Centered spinner only; nothing else is drawn.
    Loading,
    /// The full page. A quote failure is rendered inline in the quote block.
    Content,
}

/// Owns all page state and the fetch tasks that feed it.
pub struct PageController {
    api: Arc<dyn ContentApi>,
    stars: StarField,
    ui: UiState,
    quote: Option<QuoteOfDay>,
    gallery: GalleryState,
    revealed_at: Option<Instant>,
    token: Option<MountToken>,
    tx: Sender<FetchOutcome>,
    rx: Receiver<FetchOutcome>,
    waker: Option<Waker>,
}

impl PageController {
    pub fn new(api: Arc<dyn ContentApi>, stars: StarField) -> Self {
        let (tx, rx) = channel();
        Self {
            api,
            stars,
            ui: UiState::default(),
            quote: None,
            gallery: GalleryState::default(),
            revealed_at: None,
            token: None,
            tx,
            rx,
            waker: None,
        }
    }

    /// Register a callback that fetch workers invoke after queuing a result.
    pub fn with_waker(mut self, waker: Waker) -> Self {
        self.waker = Some(waker);
        self
    }

    /// Attach the controller and start the one-off quote fetch. Calling this
    /// again while mounted does nothing.
    pub fn mount(&mut self) {
        if self.token.is_some() {
            return;
        }
        let token = MountToken::new();
        self.token = Some(token.clone());
        tracing::info!("page mounted, fetching quote");

        let api = Arc::clone(&self.api);
        self.spawn(token, move || FetchOutcome::Quote(api.fetch_quote()));
    }

    /// Detach the controller. Results still in flight are discarded.
    pub fn unmount(&mut self) {
        if let Some(token) = self.token.take() {
            token.cancel();
            while self.rx.try_recv().is_ok() {}
            tracing::info!("page unmounted");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.token.as_ref().map(|t| t.is_live()).unwrap_or(false)
    }

    fn spawn<F>(&self, token: MountToken, job: F)
    where
        F: FnOnce() -> FetchOutcome + Send + 'static,
    {
        let tx = self.tx.clone();
        let waker = self.waker.clone();
        std::thread::spawn(move || {
            let outcome = job();
            if !token.is_live() {
                tracing::debug!("component gone, dropping fetch result");
                return;
            }
            if tx.send(outcome).is_ok() {
                if let Some(wake) = waker {
                    wake();
                }
            }
        });
    }

    pub fn toggle_panel(&mut self) {
        self.ui.panel = self.ui.panel.toggle();
        tracing::debug!(open = self.ui.panel_open(), "panel toggled");
    }

    pub fn set_content_filter(&mut self, enabled: bool) {
        self.ui.content_filter_enabled = enabled;
    }

    /// Fetch a new batch of gallery images using the current filter flag.
    /// Returns the request's sequence number, or `None` when not mounted.
    pub fn request_gallery(&mut self) -> Option<u64> {
        let token = self.token.clone().filter(|t| t.is_live())?;
        let seq = self.gallery.begin_request();
        let show_restricted = self.ui.content_filter_enabled;
        tracing::info!(seq, show_restricted, "fetching gallery");

        let api = Arc::clone(&self.api);
        self.spawn(token, move || FetchOutcome::Gallery {
            seq,
            result: api.fetch_gallery(show_restricted, GALLERY_COUNT),
        });
        Some(seq)
    }

    /// Apply every result queued so far. Returns how many were applied.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(outcome) = self.rx.try_recv() {
            self.apply(outcome);
            applied += 1;
        }
        applied
    }

    /// Block for up to `timeout` waiting for one result and apply it.
    pub fn wait_for_outcome(&mut self, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(outcome) => {
                self.apply(outcome);
                true
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => false,
        }
    }

    /// Apply a single fetch result to the page state.
    pub fn apply(&mut self, outcome: FetchOutcome) {
        if !self.is_mounted() {
            tracing::debug!("not mounted, ignoring fetch result");
            return;
        }
        match outcome {
            FetchOutcome::Quote(result) => {
                match result {
                    Ok(quote) => {
                        tracing::info!(source = %quote.source, "quote loaded");
                        self.quote = Some(quote);
                    }
                    Err(e) => {
                        tracing::error!("Failed to fetch hitokoto: {e:#}");
                        self.ui.error_message = Some(QUOTE_ERROR_MESSAGE.to_string());
                    }
                }
                self.ui.loading = false;
                self.ui.content_revealed = true;
                self.revealed_at = Some(Instant::now());
            }
            FetchOutcome::Gallery { seq, result } => {
                self.gallery.apply(seq, result);
            }
        }
    }

    pub fn view(&self) -> PageView {
        if self.ui.loading {
            PageView::Loading
        } else {
            PageView::Content
        }
    }

    /// Session stars, generated on first use against `viewport`.
    pub fn stars(&self, viewport: Option<Vec2>) -> Arc<[StarPoint]> {
        self.stars.get_or_generate(viewport)
    }

    pub fn ui_state(&self) -> &UiState {
        &self.ui
    }

    pub fn quote(&self) -> Option<&QuoteOfDay> {
        self.quote.as_ref()
    }

    pub fn gallery(&self) -> &GalleryState {
        &self.gallery
    }

    pub fn menu_button(&self) -> MenuButtonA11y {
        MenuButtonA11y::for_state(self.ui.panel)
    }

    /// Opacity of the profile/quote block during its fade-in.
    pub fn content_opacity(&self, now: Instant) -> f32 {
        match (self.ui.content_revealed, self.revealed_at) {
            (true, Some(at)) => {
                let t = now.saturating_duration_since(at).as_secs_f32();
                (t / CONTENT_FADE_IN.as_secs_f32()).clamp(0.0, 1.0)
            }
            (true, None) => 1.0,
            (false, _) => 0.0,
        }
    }
}

impl Drop for PageController {
    fn drop(&mut self) {
        self.unmount();
    }
}
