#![allow(dead_code)]

use acerun_core::core::AceRunCore;
use acerun_core::core::icon_cache::ImageThumbnailExtractor;
use acerun_core::types::Config;
use chrono::Utc;
use std::path::Path;
use tempfile::TempDir;

pub fn test_config(dir: &Path) -> Config {
    Config {
        base_path: dir.to_path_buf(),
    }
}

pub fn open(dir: &TempDir) -> AceRunCore {
    AceRunCore::open(
        test_config(dir.path()),
        ImageThumbnailExtractor::default(),
        Utc::now(),
    )
    .unwrap()
}

pub fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}
