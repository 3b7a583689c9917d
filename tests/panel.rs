use starry_home::content::GALLERY_ERROR_MESSAGE;
use starry_home::panel::{GalleryState, GalleryView, MenuButtonA11y, PanelState, PANEL_ID};

#[path = "mock_ctx.rs"]
mod mock_ctx;
use mock_ctx::items;

#[test]
fn toggle_twice_restores_state() {
    for start in [PanelState::Closed, PanelState::Open] {
        assert_ne!(start.toggle(), start);
        assert_eq!(start.toggle().toggle(), start);
    }
    assert_eq!(PanelState::default(), PanelState::Closed);
}

#[test]
fn menu_button_reflects_panel_state() {
    let closed = MenuButtonA11y::for_state(PanelState::Closed);
    assert_eq!(closed.label, "Open menu");
    assert_eq!(closed.caption, "Menu");
    assert!(!closed.expanded);
    assert_eq!(closed.controls, PANEL_ID);

    let open = MenuButtonA11y::for_state(PanelState::Open);
    assert_eq!(open.label, "Close menu");
    assert_eq!(open.caption, "Close");
    assert!(open.expanded);
}

#[test]
fn failed_fetch_keeps_previous_images() {
    let mut gallery = GalleryState::default();
    let seq = gallery.begin_request();
    assert!(gallery.apply(seq, Ok(items(0..8))));

    let seq = gallery.begin_request();
    assert!(gallery.is_loading());
    assert!(gallery.apply(seq, Err(anyhow::anyhow!("Failed to fetch images: 503"))));

    assert!(!gallery.is_loading());
    assert_eq!(gallery.items(), &items(0..8)[..]);
    assert_eq!(gallery.error(), Some(GALLERY_ERROR_MESSAGE));
    assert_eq!(gallery.view(), GalleryView::Error(GALLERY_ERROR_MESSAGE));
}

#[test]
fn success_replaces_images_wholesale() {
    let mut gallery = GalleryState::default();
    let seq = gallery.begin_request();
    gallery.apply(seq, Ok(items(0..8)));
    let seq = gallery.begin_request();
    gallery.apply(seq, Ok(items(100..103)));
    assert_eq!(gallery.items(), &items(100..103)[..]);
}

#[test]
fn only_latest_request_is_applied() {
    let mut gallery = GalleryState::default();
    let first = gallery.begin_request();
    let second = gallery.begin_request();
    assert!(second > first);

    assert!(gallery.apply(second, Ok(items(10..18))));
    assert!(!gallery.apply(first, Ok(items(0..8))));
    assert_eq!(gallery.items(), &items(10..18)[..]);

    // A stale result arriving while a newer request is in flight leaves the
    // loading flag alone.
    let third = gallery.begin_request();
    assert!(!gallery.apply(second, Err(anyhow::anyhow!("late"))));
    assert!(gallery.is_loading());
    assert!(gallery.error().is_none());
    assert!(gallery.apply(third, Ok(Vec::new())));
    assert!(!gallery.is_loading());
}
