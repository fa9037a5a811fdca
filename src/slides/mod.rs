//! Slides: pictures, their view state, the board and image sources.

pub mod collection;
pub mod picture;
pub mod slide;
pub mod source;

pub use collection::SlideCollection;
pub use picture::{Picture, PictureId};
pub use slide::{BorderState, Slide, SlideView};
pub use source::{AssetDirectory, ImageSource, StaticImages, IMAGE_EXTENSIONS};
