pub use keyfield_core::*;

// Shaders bundled as string constants
pub static BACKGROUND_WGSL: &str = include_str!("../../shaders/background.wgsl");
pub static WORDS_WGSL: &str = include_str!("../../shaders/words.wgsl");
pub static LINES_WGSL: &str = include_str!("../../shaders/lines.wgsl");
pub static POST_WGSL: &str = include_str!("../../shaders/post.wgsl");
