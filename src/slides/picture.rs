//! Picture identity.
//!
//! ## ID Layout
//!
//! Pictures are dealt in pairs. The two copies of the same image get
//! adjacent ids `2k` and `2k + 1`, so a picture's partner is always
//! `id ^ 1`.
//!
//! ```
//! use concentration::slides::PictureId;
//!
//! assert_eq!(PictureId(4).partner(), PictureId(5));
//! assert_eq!(PictureId(5).partner(), PictureId(4));
//! assert!(PictureId(4).is_adjacent(PictureId(5)));
//! assert!(!PictureId(4).is_adjacent(PictureId(6)));
//! ```

use serde::{Deserialize, Serialize};

/// Identifier of a picture, and of the slide that shows it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PictureId(pub u32);

impl PictureId {
    /// Create a new picture ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The id dealt together with this one.
    #[must_use]
    pub const fn partner(self) -> Self {
        Self(self.0 ^ 1)
    }

    /// Index of the pair this id belongs to.
    #[must_use]
    pub const fn pair_index(self) -> u32 {
        self.0 / 2
    }

    /// True if the two ids differ by exactly one.
    #[must_use]
    pub const fn is_adjacent(self, other: Self) -> bool {
        self.0.abs_diff(other.0) == 1
    }
}

impl std::fmt::Display for PictureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Picture({})", self.0)
    }
}

/// An image reference with its id. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Picture {
    id: PictureId,
    image: String,
}

impl Picture {
    pub fn new(id: PictureId, image: impl Into<String>) -> Self {
        Self {
            id,
            image: image.into(),
        }
    }

    /// Build the two pictures of pair `pair` showing `image`.
    pub fn pair(pair: u32, image: &str) -> [Picture; 2] {
        [
            Picture::new(PictureId(pair * 2), image),
            Picture::new(PictureId(pair * 2 + 1), image),
        ]
    }

    #[must_use]
    pub fn id(&self) -> PictureId {
        self.id
    }

    #[must_use]
    pub fn image(&self) -> &str {
        &self.image
    }
}
