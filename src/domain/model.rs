use serde::Serialize;
use serde_json::Value;

/// 欄位順序即輸出 CSV 的欄位順序
pub const RECORD_FIELDS: [&str; 8] = [
    "price", "shape", "carat", "cut", "color", "clarity", "table", "depth",
];

/// One diamond listing projected down to the harvested fields.
///
/// Values are kept exactly as the listing payload delivered them; a `null`
/// cut or a price sent as `"1000"` passes through untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub price: Value,
    pub shape: Value,
    pub carat: Value,
    pub cut: Value,
    pub color: Value,
    pub clarity: Value,
    pub table: Value,
    pub depth: Value,
}

impl Record {
    /// CSV cells in [`RECORD_FIELDS`] order.
    pub fn csv_row(&self) -> [String; 8] {
        [
            &self.price,
            &self.shape,
            &self.carat,
            &self.cut,
            &self.color,
            &self.clarity,
            &self.table,
            &self.depth,
        ]
        .map(csv_cell)
    }
}

/// null 寫成空白欄位，字串原樣輸出，數字保留 JSON 原文（`1000` 不會變成 `1000.0`）
fn csv_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub records: Vec<Record>,
    pub csv_output: String,
}

/// 單頁回應，狀態碼交給 harvester 判斷
#[derive(Debug, Clone)]
pub struct PageResponse {
    pub status: u16,
    pub body: String,
}

impl PageResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
