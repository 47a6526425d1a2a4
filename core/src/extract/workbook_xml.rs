//! XML parsing for workbook structure and sheet grids.
//!
//! Parses `workbook.xml`, `sharedStrings.xml`, relationship files, and
//! worksheet parts into the dense [`Grid`] representation used for diffing.

use crate::addressing::a1_to_index;
use crate::error_codes;
use crate::workbook::{CellValue, Grid};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WorkbookXmlError {
    #[error("XML parse error: {0}")]
    Xml(String),
    #[error("invalid cell address: {0}")]
    InvalidAddress(String),
    #[error("shared string index {0} out of bounds")]
    SharedStringOutOfBounds(usize),
}

impl WorkbookXmlError {
    pub fn code(&self) -> &'static str {
        match self {
            WorkbookXmlError::Xml(_) => error_codes::WORKBOOK_XML,
            WorkbookXmlError::InvalidAddress(_) => error_codes::WORKBOOK_XML_ADDRESS,
            WorkbookXmlError::SharedStringOutOfBounds(_) => {
                error_codes::WORKBOOK_XML_SHARED_STRING
            }
        }
    }
}

pub(crate) struct SheetDescriptor {
    pub name: String,
    pub rel_id: Option<String>,
    pub sheet_id: Option<u32>,
}

pub(crate) fn parse_shared_strings(xml: &[u8]) -> Result<Vec<String>, WorkbookXmlError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);
    let mut buf = Vec::new();
    let mut strings = Vec::new();
    let mut current = String::new();
    let mut in_si = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"si" => {
                current.clear();
                in_si = true;
            }
            Ok(Event::Start(e)) if e.name().as_ref() == b"t" && in_si => {
                let text = reader
                    .read_text(e.name())
                    .map_err(|e| WorkbookXmlError::Xml(e.to_string()))?
                    .into_owned();
                current.push_str(&text);
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"si" => {
                strings.push(current.clone());
                in_si = false;
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(WorkbookXmlError::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(strings)
}

pub(crate) fn parse_workbook_xml(xml: &[u8]) -> Result<Vec<SheetDescriptor>, WorkbookXmlError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut sheets = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.name().as_ref() == b"sheet" => {
                let mut name = None;
                let mut rel_id = None;
                let mut sheet_id = None;
                for attr in e.attributes() {
                    let attr = attr.map_err(|e| WorkbookXmlError::Xml(e.to_string()))?;
                    match attr.key.as_ref() {
                        b"name" => {
                            name = Some(attr.unescape_value().map_err(to_xml_err)?.into_owned())
                        }
                        b"sheetId" => {
                            let parsed = attr.unescape_value().map_err(to_xml_err)?;
                            sheet_id = parsed.into_owned().parse::<u32>().ok();
                        }
                        b"r:id" => {
                            rel_id = Some(attr.unescape_value().map_err(to_xml_err)?.into_owned())
                        }
                        _ => {}
                    }
                }
                if let Some(name) = name {
                    sheets.push(SheetDescriptor {
                        name,
                        rel_id,
                        sheet_id,
                    });
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(WorkbookXmlError::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(sheets)
}

pub(crate) fn parse_relationships(
    xml: &[u8],
) -> Result<HashMap<String, String>, WorkbookXmlError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut map = HashMap::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.name().as_ref() == b"Relationship" => {
                let mut id = None;
                let mut target = None;
                let mut rel_type = None;
                for attr in e.attributes() {
                    let attr = attr.map_err(|e| WorkbookXmlError::Xml(e.to_string()))?;
                    match attr.key.as_ref() {
                        b"Id" => id = Some(attr.unescape_value().map_err(to_xml_err)?.into_owned()),
                        b"Target" => {
                            target = Some(attr.unescape_value().map_err(to_xml_err)?.into_owned())
                        }
                        b"Type" => {
                            rel_type = Some(attr.unescape_value().map_err(to_xml_err)?.into_owned())
                        }
                        _ => {}
                    }
                }

                if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                    if rel_type.contains("worksheet") {
                        map.insert(id, target);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(WorkbookXmlError::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(map)
}

pub(crate) fn resolve_sheet_target(
    sheet: &SheetDescriptor,
    relationships: &HashMap<String, String>,
    index: usize,
) -> String {
    if let Some(rel_id) = &sheet.rel_id {
        if let Some(target) = relationships.get(rel_id) {
            return normalize_target(target);
        }
    }

    let guessed = sheet
        .sheet_id
        .map(|id| format!("xl/worksheets/sheet{id}.xml"))
        .unwrap_or_else(|| format!("xl/worksheets/sheet{}.xml", index + 1));
    normalize_target(&guessed)
}

fn normalize_target(target: &str) -> String {
    let trimmed = target.trim_start_matches('/');
    if trimmed.starts_with("xl/") {
        trimmed.to_string()
    } else {
        format!("xl/{trimmed}")
    }
}

/// Parse one worksheet part into a ragged dense grid. Every addressed cell
/// extends its row, so trailing styled-but-empty cells still count toward
/// row length.
pub(crate) fn parse_sheet_grid(
    xml: &[u8],
    shared_strings: &[String],
) -> Result<Grid, WorkbookXmlError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);
    let mut buf = Vec::new();
    let mut rows: Vec<Vec<Option<CellValue>>> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"c" => {
                let (row, col, value) = parse_cell(&mut reader, e, shared_strings)?;
                place_cell(&mut rows, row as usize, col as usize, value);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(WorkbookXmlError::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(Grid::from_rows(rows))
}

fn place_cell(
    rows: &mut Vec<Vec<Option<CellValue>>>,
    row: usize,
    col: usize,
    value: Option<CellValue>,
) {
    if rows.len() <= row {
        rows.resize_with(row + 1, Vec::new);
    }
    let cells = &mut rows[row];
    if cells.len() <= col {
        cells.resize(col + 1, None);
    }
    cells[col] = value;
}

fn parse_cell(
    reader: &mut Reader<&[u8]>,
    start: BytesStart,
    shared_strings: &[String],
) -> Result<(u32, u32, Option<CellValue>), WorkbookXmlError> {
    let address = get_attr_value(&start, b"r")?
        .ok_or_else(|| WorkbookXmlError::Xml("cell missing address".into()))?;
    let (row, col) =
        a1_to_index(&address).ok_or_else(|| WorkbookXmlError::InvalidAddress(address.clone()))?;

    let cell_type = get_attr_value(&start, b"t")?;

    let mut value_text: Option<String> = None;
    let mut inline_text: Option<String> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"v" => {
                let text = reader
                    .read_text(e.name())
                    .map_err(|e| WorkbookXmlError::Xml(e.to_string()))?
                    .into_owned();
                value_text = Some(text);
            }
            Ok(Event::Start(e)) if e.name().as_ref() == b"is" => {
                inline_text = Some(read_inline_string(reader)?);
            }
            Ok(Event::End(e)) if e.name().as_ref() == start.name().as_ref() => break,
            Ok(Event::Eof) => {
                return Err(WorkbookXmlError::Xml("unexpected EOF inside cell".into()));
            }
            Err(e) => return Err(WorkbookXmlError::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    let value = match inline_text {
        Some(text) => Some(CellValue::Text(text)),
        None => convert_value(value_text.as_deref(), cell_type.as_deref(), shared_strings)?,
    };

    Ok((row, col, value))
}

fn read_inline_string(reader: &mut Reader<&[u8]>) -> Result<String, WorkbookXmlError> {
    let mut buf = Vec::new();
    let mut value = String::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"t" => {
                let text = reader
                    .read_text(e.name())
                    .map_err(|e| WorkbookXmlError::Xml(e.to_string()))?
                    .into_owned();
                value.push_str(&text);
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"is" => break,
            Ok(Event::Eof) => {
                return Err(WorkbookXmlError::Xml(
                    "unexpected EOF inside inline string".into(),
                ));
            }
            Err(e) => return Err(WorkbookXmlError::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }
    Ok(value)
}

fn convert_value(
    value_text: Option<&str>,
    cell_type: Option<&str>,
    shared_strings: &[String],
) -> Result<Option<CellValue>, WorkbookXmlError> {
    let raw = match value_text {
        Some(t) => t,
        None => return Ok(None),
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Some(CellValue::Text(String::new())));
    }

    match cell_type {
        Some("s") => {
            let idx = trimmed
                .parse::<usize>()
                .map_err(|e| WorkbookXmlError::Xml(e.to_string()))?;
            let text = shared_strings
                .get(idx)
                .ok_or(WorkbookXmlError::SharedStringOutOfBounds(idx))?;
            Ok(Some(CellValue::Text(text.clone())))
        }
        Some("b") => Ok(match trimmed {
            "1" => Some(CellValue::Bool(true)),
            "0" => Some(CellValue::Bool(false)),
            _ => None,
        }),
        Some("str") | Some("inlineStr") => Ok(Some(CellValue::Text(raw.to_string()))),
        // Error cells ("e") and anything non-numeric fall through as text.
        _ => {
            if let Ok(n) = trimmed.parse::<f64>() {
                Ok(Some(CellValue::Number(n)))
            } else {
                Ok(Some(CellValue::Text(trimmed.to_string())))
            }
        }
    }
}

fn get_attr_value(
    element: &BytesStart<'_>,
    key: &[u8],
) -> Result<Option<String>, WorkbookXmlError> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| WorkbookXmlError::Xml(e.to_string()))?;
        if attr.key.as_ref() == key {
            return Ok(Some(
                attr.unescape_value().map_err(to_xml_err)?.into_owned(),
            ));
        }
    }
    Ok(None)
}

fn to_xml_err(err: quick_xml::Error) -> WorkbookXmlError {
    WorkbookXmlError::Xml(err.to_string())
}
