use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{Config, UPLOAD_ROUTE};

use super::interface::Storage;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s").expect("whitespace regex"));

pub fn setup_storage(config: &Config) -> Storage {
    Storage::new(config.public_dir.clone(), UPLOAD_ROUTE)
}

/// `<millis>-<name>`, where `<name>` is the last path component of the
/// client-supplied file name with every whitespace character turned into `_`.
pub fn upload_file_name(original: &str, epoch_millis: i64) -> String {
    // browsers on windows may send the full client path
    let base = original.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(original);

    let base = match Path::new(base).file_name().and_then(|name| name.to_str()) {
        Some(name) => name,
        None => "upload",
    };

    format!("{}-{}", epoch_millis, WHITESPACE.replace_all(base, "_"))
}
