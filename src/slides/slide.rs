//! A slide on the board: a picture plus its view state.

use serde::{Deserialize, Serialize};

use super::picture::{Picture, PictureId};

/// Border highlight of a slide.
///
/// Derived from the slide flags with priority failed > matched > viewed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BorderState {
    /// Face down, nothing to highlight.
    #[default]
    Plain,
    /// Face up, being looked at.
    Viewed,
    /// Part of a found pair.
    Matched,
    /// Part of a missed pair, or force-revealed after a loss.
    Failed,
}

impl BorderState {
    /// Conventional color name for the border.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            BorderState::Plain => "black",
            BorderState::Viewed => "yellow",
            BorderState::Matched => "green",
            BorderState::Failed => "red",
        }
    }
}

/// A picture slide with mutable view state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slide {
    picture: Picture,
    viewed: bool,
    matched: bool,
    failed: bool,
}

impl Slide {
    /// Wrap a picture in a face-down slide.
    pub fn new(picture: Picture) -> Self {
        Self {
            picture,
            viewed: false,
            matched: false,
            failed: false,
        }
    }

    /// Slide id, equal to its picture's id.
    #[must_use]
    pub fn id(&self) -> PictureId {
        self.picture.id()
    }

    #[must_use]
    pub fn picture(&self) -> &Picture {
        &self.picture
    }

    #[must_use]
    pub fn is_viewed(&self) -> bool {
        self.viewed
    }

    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.matched
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Face-down and not yet matched.
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        !self.matched && !self.viewed
    }

    /// Image the player currently sees.
    #[must_use]
    pub fn display_image<'a>(&'a self, placeholder: &'a str) -> &'a str {
        if self.matched || self.viewed {
            self.picture.image()
        } else {
            placeholder
        }
    }

    #[must_use]
    pub fn border(&self) -> BorderState {
        if self.failed {
            BorderState::Failed
        } else if self.matched {
            BorderState::Matched
        } else if self.viewed {
            BorderState::Viewed
        } else {
            BorderState::Plain
        }
    }

    /// Turn the slide face up.
    pub fn peek(&mut self) {
        self.viewed = true;
    }

    /// Turn the slide face down and clear a failed marker.
    pub fn close_peek(&mut self) {
        self.viewed = false;
        self.failed = false;
    }

    pub fn mark_matched(&mut self) {
        self.matched = true;
    }

    pub fn mark_failed(&mut self) {
        self.failed = true;
    }

    /// Render-ready copy of this slide.
    #[must_use]
    pub fn view(&self, placeholder: &str) -> SlideView {
        SlideView {
            id: self.id(),
            image: self.display_image(placeholder).to_string(),
            border: self.border(),
            selectable: self.is_selectable(),
        }
    }
}

/// What the presentation layer needs to draw one slide.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideView {
    pub id: PictureId,
    pub image: String,
    pub border: BorderState,
    pub selectable: bool,
}
