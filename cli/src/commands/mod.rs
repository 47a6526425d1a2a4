pub mod diff;
pub mod info;

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Workbook,
    Text,
}

pub fn input_kind(path: &str) -> InputKind {
    match Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("xlsx") | Some("xlsm") => InputKind::Workbook,
        _ => InputKind::Text,
    }
}
