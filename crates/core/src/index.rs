//! Loading class index dumps produced by the class-file loader.

use crate::error::Result;
use rayon::prelude::*;
use sigscope_java::InMemoryClassIndex;
use std::path::{Path, PathBuf};
use tracing::info;

/// Load one JSON dump (an array of classes).
pub fn load_index(path: &Path) -> Result<InMemoryClassIndex> {
    let text = std::fs::read_to_string(path)?;
    let index = InMemoryClassIndex::from_json(&text)?;
    info!("Loaded {} classes from {}", index.len(), path.display());
    Ok(index)
}

/// Load several dumps in parallel and merge them in the given order; a class
/// present in more than one dump is taken from the last.
pub fn load_indexes(paths: &[PathBuf]) -> Result<InMemoryClassIndex> {
    let loaded = paths
        .par_iter()
        .map(|path| load_index(path))
        .collect::<Result<Vec<_>>>()?;

    let mut merged = InMemoryClassIndex::new();
    for index in loaded {
        for class in index.classes() {
            merged.insert(class.clone());
        }
    }
    Ok(merged)
}
