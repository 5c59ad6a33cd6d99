use crate::domain::model::{Record, RECORD_FIELDS};
use crate::utils::error::{HarvestError, Result};
use serde_json::Value;

/// 頁面內容是否已包含 payload 鍵（例如 `"diamonds"`）
pub fn is_ready(body: &str, payload_key: &str) -> bool {
    body.contains(&format!("\"{}\"", payload_key))
}

/// Parse one page body and project every entry under `payload_key` into a
/// [`Record`], preserving entry order.
///
/// Any shape problem fails the whole page: a body that is not JSON, a missing
/// or non-array payload key, or an entry lacking one of the harvested fields.
pub fn parse_page(page: u32, body: &str, payload_key: &str) -> Result<Vec<Record>> {
    let payload: Value =
        serde_json::from_str(body).map_err(|e| HarvestError::MalformedPayloadError {
            page,
            message: e.to_string(),
        })?;

    let object = payload
        .as_object()
        .ok_or_else(|| HarvestError::MalformedPayloadError {
            page,
            message: "top-level value is not an object".to_string(),
        })?;

    let items = object
        .get(payload_key)
        .and_then(Value::as_array)
        .ok_or_else(|| HarvestError::MissingPayloadKeyError {
            page,
            key: payload_key.to_string(),
        })?;

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        records.push(project_entry(page, index, item)?);
    }

    tracing::debug!("Page {} yielded {} entries", page, records.len());
    Ok(records)
}

fn project_entry(page: u32, index: usize, item: &Value) -> Result<Record> {
    let invalid = |source: serde_json::Error| HarvestError::InvalidEntryError {
        page,
        index,
        source,
    };

    let entry = item
        .as_object()
        .ok_or_else(|| invalid(serde::de::Error::custom("entry is not an object")))?;

    // 只要求欄位存在，值的型別不檢查
    let field = |name: &'static str| {
        entry
            .get(name)
            .cloned()
            .ok_or_else(|| invalid(serde::de::Error::missing_field(name)))
    };

    Ok(Record {
        price: field("price")?,
        shape: field("shape")?,
        carat: field("carat")?,
        cut: field("cut")?,
        color: field("color")?,
        clarity: field("clarity")?,
        table: field("table")?,
        depth: field("depth")?,
    })
}

/// Render records as CSV text: a header row naming the eight fields, then one
/// row per record in the given order. The header is written even when there
/// are no records.
pub fn render_csv(records: &[Record]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(RECORD_FIELDS)?;
    for record in records {
        writer.write_record(record.csv_row())?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| HarvestError::IoError(e.into_error()))?;

    String::from_utf8(bytes).map_err(|e| {
        HarvestError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}
