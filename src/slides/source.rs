//! Where slide images come from.
//!
//! The engine only needs an ordered list of image references per category.
//! `AssetDirectory` scans `<root>/<Category>` on disk; `StaticImages` serves
//! fixed lists and is what tests and embedded hosts use.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use tracing::debug;
use walkdir::WalkDir;

use crate::core::{Category, Result};

/// File extensions recognised as images (compared case-insensitively).
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "bmp"];

/// Supplies image references for a category.
///
/// Ordering must be stable between calls so pair ids are deterministic.
pub trait ImageSource {
    fn images(&self, category: Category) -> Result<Vec<String>>;
}

/// Image files below an asset root, one sub-directory per category.
#[derive(Clone, Debug)]
pub struct AssetDirectory {
    root: PathBuf,
    max_depth: usize,
}

impl AssetDirectory {
    /// Scan `root/<Category>` and everything below it.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_depth: usize::MAX,
        }
    }

    /// Only look at files directly inside the category directory.
    #[must_use]
    pub fn flat(mut self) -> Self {
        self.max_depth = 1;
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory scanned for `category`.
    #[must_use]
    pub fn category_dir(&self, category: Category) -> PathBuf {
        self.root.join(category.name())
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

impl ImageSource for AssetDirectory {
    fn images(&self, category: Category) -> Result<Vec<String>> {
        let dir = self.category_dir(category);
        if !dir.is_dir() {
            debug!(dir = %dir.display(), "category directory missing");
            return Ok(Vec::new());
        }

        let mut images = Vec::new();
        for entry in WalkDir::new(&dir).max_depth(self.max_depth).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type().is_file() && is_image(path) {
                // Forward slashes keep references identical across platforms.
                images.push(path.to_string_lossy().replace('\\', "/"));
            }
        }

        debug!(dir = %dir.display(), count = images.len(), "scanned category images");
        Ok(images)
    }
}

/// In-memory image lists keyed by category.
#[derive(Clone, Debug, Default)]
pub struct StaticImages {
    images: FxHashMap<Category, Vec<String>>,
}

impl StaticImages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the images for a category (builder pattern).
    #[must_use]
    pub fn with<I, S>(mut self, category: Category, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.images
            .insert(category, images.into_iter().map(Into::into).collect());
        self
    }

    /// Fill every category with `count` generated references like `Cars/3.jpg`.
    #[must_use]
    pub fn numbered(count: usize) -> Self {
        Category::ALL.iter().fold(Self::new(), |source, &category| {
            source.with(
                category,
                (0..count).map(|i| format!("{}/{}.jpg", category.name(), i)),
            )
        })
    }
}

impl ImageSource for StaticImages {
    fn images(&self, category: Category) -> Result<Vec<String>> {
        Ok(self.images.get(&category).cloned().unwrap_or_default())
    }
}
