// Front-end tuning constants: DOM ids, label atlas, renderer and bloom.

// DOM
pub const CANVAS_ID: &str = "app-canvas";
pub const CANVAS_CONTAINER_ID: &str = "canvas-container";
pub const UI_LAYER_ID: &str = "ui-layer";
pub const LANDING_TITLE_ID: &str = "landing-title";
pub const COLLECTED_BAR_ID: &str = "collected-keywords-bar";
pub const COLLECTED_GRID_ID: &str = "collected-grid";
pub const COLLECTED_SECTION_ID: &str = "collected-section";
pub const ALL_PROJECTS_ID: &str = "all-projects-section";
pub const DETAIL_VIEW_ID: &str = "project-detail-view";
pub const GALLERY_VIEW_ID: &str = "gallery-view";
pub const ABOUT_VIEW_ID: &str = "about-view";

// Canvas dimming while a DOM view covers the field
pub const CANVAS_DIMMED_OPACITY: &str = "0.7";
pub const OVERLAY_BLUR: &str = "blur(10px)";

// Clicks landing inside any of these never reach the field.
pub const CLICK_EXCLUDED_SELECTORS: &[&str] = &[
    ".nav-link",
    ".menu-item",
    ".search-container",
    "#side-menu",
    "#search-overlay",
    "#contact-overlay",
    "#gallery-view",
    "#about-view",
    "#project-detail-view",
    "#collected-keywords-bar",
];

// Label atlas (rasterised once with a 2D canvas)
pub const LABEL_FONT: &str = "bold 64px \"Courier New\", monospace";
pub const LABEL_FONT_PX: u32 = 64;
pub const LABEL_PADDING_PX: u32 = 40;
pub const ATLAS_MAX_WIDTH: u32 = 2048;
pub const ATLAS_GUTTER_PX: u32 = 4;

// Reveal overlays
pub const DISSOLVE_PARTICLES: usize = 60;
pub const CONVERGE_PARTICLES: usize = 40;
pub const GALLERY_KEYWORDS_SHOWN: usize = 3;

// Frame pacing: longer gaps (tab switches) are clamped to this step
pub const MAX_FRAME_DT_SEC: f32 = 0.1;

// Scene
pub const CLEAR_COLOR: [f64; 3] = [0.01, 0.02, 0.03];
pub const HINT_LINE_COLOR: [f32; 3] = [0.25, 0.56, 0.60];
pub const PARTICLE_COLOR: [f32; 3] = [0.0, 1.0, 0.8];
pub const PARTICLE_SIZE: f32 = 0.05;
pub const SELECTED_GLOW: f32 = 0.8;

// Post-processing defaults
pub const BLOOM_STRENGTH: f32 = 0.7;
pub const BLOOM_THRESHOLD: f32 = 0.75;
