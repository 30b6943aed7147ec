// SPDX-License-Identifier: GPL-3.0-only

//! Resource sources for layout models.
//!
//! The keyboard ships its touch models and key layouts compiled into the
//! library. A directory source allows overriding them from disk.

use crate::layout::types::LoadError;
use rust_embed::Embed;
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

/// Something that can hand out named, read-only resource bytes.
pub trait ResourceSource {
    /// Reads the resource named `name` (e.g., `"123_touch_model.json"`).
    fn read(&self, name: &str) -> Result<Cow<'static, [u8]>, LoadError>;

    /// Short description for log messages.
    fn describe(&self) -> String;
}

/// Layout resources embedded at compile time from the `resources` directory.
#[derive(Embed)]
#[folder = "resources/"]
pub struct BundledResources;

impl ResourceSource for BundledResources {
    fn read(&self, name: &str) -> Result<Cow<'static, [u8]>, LoadError> {
        BundledResources::get(name)
            .map(|file| file.data)
            .ok_or_else(|| LoadError::not_found(name))
    }

    fn describe(&self) -> String {
        "bundled resources".to_string()
    }
}

/// Layout resources read from a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    root: PathBuf,
}

impl DirectoryResources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ResourceSource for DirectoryResources {
    fn read(&self, name: &str) -> Result<Cow<'static, [u8]>, LoadError> {
        fs::read(self.root.join(name))
            .map(Cow::Owned)
            .map_err(|e| LoadError::io_error_with_path(e, name))
    }

    fn describe(&self) -> String {
        format!("directory '{}'", self.root.display())
    }
}

// ============================================================================
// Tests
// ============================================================================
