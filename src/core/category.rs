//! Slide categories offered by the start menu.

use serde::{Deserialize, Serialize};

/// Picture category a session is played with.
///
/// Each category maps to an asset sub-directory of the same name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Animals,
    Cars,
    Foods,
}

impl Category {
    /// All categories, in menu order.
    pub const ALL: [Category; 3] = [Category::Animals, Category::Cars, Category::Foods];

    /// Look up a category by its menu index.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Menu index of this category.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Name of the category, also used as its asset directory name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Category::Animals => "Animals",
            Category::Cars => "Cars",
            Category::Foods => "Foods",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
