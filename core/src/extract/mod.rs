//! Input extraction: workbook packages and plain text.
//!
//! Extraction failures are fail-fast: a malformed package aborts the whole
//! comparison with an [`ExtractError`] and no partial result. Empty inputs
//! are not errors; zero sheets or zero bytes are valid states.

#[cfg(feature = "open-xml")]
mod container;
#[cfg(feature = "open-xml")]
mod workbook_xml;

#[cfg(feature = "open-xml")]
pub use container::{ContainerError, ContainerLimits, OpcContainer};
#[cfg(feature = "open-xml")]
pub use workbook_xml::WorkbookXmlError;

#[cfg(feature = "open-xml")]
use crate::error_codes;
#[cfg(feature = "open-xml")]
use crate::workbook::{Sheet, Workbook};
#[cfg(feature = "open-xml")]
use thiserror::Error;

#[cfg(feature = "open-xml")]
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtractError {
    #[error("[DOCDIFF_XTR_001] container error: {0}. Suggestion: confirm the file is a valid workbook package.")]
    Container(#[from] ContainerError),
    #[error("[DOCDIFF_XTR_002] workbook XML error: {0}. Suggestion: the package may be corrupt; re-export it and retry.")]
    WorkbookXml(#[from] WorkbookXmlError),
    #[error("[DOCDIFF_XTR_003] workbook.xml missing or unreadable")]
    WorkbookXmlMissing,
    #[error("[DOCDIFF_XTR_004] worksheet part missing for sheet '{sheet_name}'")]
    WorksheetMissing { sheet_name: String },
}

#[cfg(feature = "open-xml")]
impl ExtractError {
    pub fn code(&self) -> &'static str {
        match self {
            ExtractError::Container(_) => error_codes::EXTRACT_CONTAINER,
            ExtractError::WorkbookXml(_) => error_codes::EXTRACT_XML,
            ExtractError::WorkbookXmlMissing => error_codes::EXTRACT_WORKBOOK_MISSING,
            ExtractError::WorksheetMissing { .. } => error_codes::EXTRACT_WORKSHEET_MISSING,
        }
    }
}

#[cfg(feature = "open-xml")]
pub fn open_workbook(path: impl AsRef<std::path::Path>) -> Result<Workbook, ExtractError> {
    let mut container = OpcContainer::open_from_path(path)?;
    open_workbook_from_container(&mut container)
}

#[cfg(feature = "open-xml")]
pub fn open_workbook_from_reader<R: std::io::Read + std::io::Seek + 'static>(
    reader: R,
) -> Result<Workbook, ExtractError> {
    let mut container = OpcContainer::open_from_reader(reader)?;
    open_workbook_from_container(&mut container)
}

#[cfg(feature = "open-xml")]
fn open_workbook_from_container(container: &mut OpcContainer) -> Result<Workbook, ExtractError> {
    let shared_strings = match container.read_file_optional("xl/sharedStrings.xml")? {
        Some(bytes) => workbook_xml::parse_shared_strings(&bytes)?,
        None => Vec::new(),
    };

    let workbook_bytes = container
        .read_file("xl/workbook.xml")
        .map_err(|_| ExtractError::WorkbookXmlMissing)?;
    let descriptors = workbook_xml::parse_workbook_xml(&workbook_bytes)?;

    let relationships = match container.read_file_optional("xl/_rels/workbook.xml.rels")? {
        Some(bytes) => workbook_xml::parse_relationships(&bytes)?,
        None => std::collections::HashMap::new(),
    };

    let mut sheets = Vec::with_capacity(descriptors.len());
    for (index, descriptor) in descriptors.iter().enumerate() {
        let target = workbook_xml::resolve_sheet_target(descriptor, &relationships, index);
        let sheet_bytes =
            container
                .read_file(&target)
                .map_err(|_| ExtractError::WorksheetMissing {
                    sheet_name: descriptor.name.clone(),
                })?;
        let grid = workbook_xml::parse_sheet_grid(&sheet_bytes, &shared_strings)?;
        sheets.push(Sheet::new(descriptor.name.clone(), grid));
    }

    Ok(Workbook { sheets })
}

/// Decode plain text bytes: strip a UTF-8 BOM and replace invalid sequences.
/// Never fails; empty input is a valid, empty document.
pub fn read_plain_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_strips_bom_and_survives_invalid_bytes() {
        assert_eq!(read_plain_text(b"\xEF\xBB\xBFhello"), "hello");
        assert_eq!(read_plain_text(b"ok"), "ok");
        assert_eq!(read_plain_text(b""), "");
        assert_eq!(read_plain_text(b"a\xFFb"), "a\u{FFFD}b");
    }
}
