pub mod content;
pub mod gui;
pub mod lifecycle;
pub mod logging;
pub mod page;
pub mod panel;
pub mod settings;
pub mod starfield;
pub mod stars;
