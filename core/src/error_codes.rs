//! Stable error codes surfaced by `code()` accessors and the CLI.

pub const CONTAINER_IO: &str = "DOCDIFF_PKG_001";
pub const CONTAINER_ZIP: &str = "DOCDIFF_PKG_002";
pub const CONTAINER_NOT_ZIP: &str = "DOCDIFF_PKG_003";
pub const CONTAINER_NOT_OPC: &str = "DOCDIFF_PKG_004";
pub const CONTAINER_TOO_MANY_ENTRIES: &str = "DOCDIFF_PKG_005";
pub const CONTAINER_PART_TOO_LARGE: &str = "DOCDIFF_PKG_006";
pub const CONTAINER_TOTAL_TOO_LARGE: &str = "DOCDIFF_PKG_007";

pub const WORKBOOK_XML: &str = "DOCDIFF_XML_001";
pub const WORKBOOK_XML_ADDRESS: &str = "DOCDIFF_XML_002";
pub const WORKBOOK_XML_SHARED_STRING: &str = "DOCDIFF_XML_003";

pub const EXTRACT_CONTAINER: &str = "DOCDIFF_XTR_001";
pub const EXTRACT_XML: &str = "DOCDIFF_XTR_002";
pub const EXTRACT_WORKBOOK_MISSING: &str = "DOCDIFF_XTR_003";
pub const EXTRACT_WORKSHEET_MISSING: &str = "DOCDIFF_XTR_004";
