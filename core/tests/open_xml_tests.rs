#![cfg(feature = "open-xml")]

use doc_diff::{
    CellValue, CompareConfig, ContainerError, ExtractError, compare_workbooks,
    open_workbook_from_reader,
};
use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

fn build_package(parts: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for (name, content) in parts {
        writer.start_file(*name, options).expect("start zip entry");
        writer
            .write_all(content.as_bytes())
            .expect("write zip entry");
    }
    writer.finish().expect("finish zip").into_inner()
}

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="xml" ContentType="application/xml"/>
</Types>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#;

const WORKBOOK_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<workbook><sheets><sheet name="Data" sheetId="1" r:id="rId1"/></sheets></workbook>"#;

const SHARED_STRINGS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<sst><si><t>label</t></si></sst>"#;

fn sheet_with_score(score: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<worksheet><sheetData>
  <row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1"><v>{score}</v></c><c r="C1" t="b"><v>1</v></c></row>
  <row r="2"><c r="A2" t="inlineStr"><is><t>inline text</t></is></c></row>
</sheetData></worksheet>"#
    )
}

fn package_with_score(score: &str) -> Vec<u8> {
    let sheet = sheet_with_score(score);
    build_package(&[
        ("[Content_Types].xml", CONTENT_TYPES),
        ("xl/workbook.xml", WORKBOOK_XML),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS),
        ("xl/sharedStrings.xml", SHARED_STRINGS),
        ("xl/worksheets/sheet1.xml", sheet.as_str()),
    ])
}

#[test]
fn workbook_package_parses_sheets_and_values() {
    let bytes = package_with_score("42");
    let workbook =
        open_workbook_from_reader(Cursor::new(bytes)).expect("package should open");

    assert_eq!(workbook.sheets.len(), 1);
    let sheet = &workbook.sheets[0];
    assert_eq!(sheet.name, "Data");
    assert_eq!(sheet.grid.cell(0, 0), Some(&CellValue::Text("label".into())));
    assert_eq!(sheet.grid.cell(0, 1), Some(&CellValue::Number(42.0)));
    assert_eq!(sheet.grid.cell(0, 2), Some(&CellValue::Bool(true)));
    assert_eq!(
        sheet.grid.cell(1, 0),
        Some(&CellValue::Text("inline text".into()))
    );
}

#[test]
fn extracted_workbooks_diff_end_to_end() {
    let old = open_workbook_from_reader(Cursor::new(package_with_score("42")))
        .expect("old package should open");
    let new = open_workbook_from_reader(Cursor::new(package_with_score("43")))
        .expect("new package should open");

    let result = compare_workbooks(&old, &new, &CompareConfig::default());
    assert_eq!(result.total_differences(), 1);
    let diff = &result.sheet_results[0].differences[0];
    assert_eq!((diff.row, diff.col), (1, 2));
    assert_eq!(diff.value_a, Some(CellValue::Number(42.0)));
    assert_eq!(diff.value_b, Some(CellValue::Number(43.0)));
}

#[test]
fn garbage_bytes_are_not_a_zip_container() {
    let err = open_workbook_from_reader(Cursor::new(b"not a workbook".to_vec()))
        .expect_err("garbage should fail fast");
    assert!(matches!(
        err,
        ExtractError::Container(ContainerError::NotZipContainer)
    ));
}

#[test]
fn zip_without_content_types_is_not_an_opc_package() {
    let bytes = build_package(&[("random.txt", "hello")]);
    let err = open_workbook_from_reader(Cursor::new(bytes))
        .expect_err("plain zip should be rejected");
    assert!(matches!(
        err,
        ExtractError::Container(ContainerError::NotOpcPackage)
    ));
}

#[test]
fn package_without_workbook_xml_fails_fast() {
    let bytes = build_package(&[("[Content_Types].xml", CONTENT_TYPES)]);
    let err = open_workbook_from_reader(Cursor::new(bytes))
        .expect_err("missing workbook.xml should be rejected");
    assert!(matches!(err, ExtractError::WorkbookXmlMissing));
    assert_eq!(err.code(), "DOCDIFF_XTR_003");
}
