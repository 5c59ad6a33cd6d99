//! Built-in harvest settings: the loose-diamond search used for the
//! original data pull.

pub const DEFAULT_ENDPOINT: &str = "https://www.brilliantearth.com/loose-diamonds/list/";
pub const DEFAULT_FIRST_PAGE: u32 = 1;
pub const DEFAULT_LAST_PAGE: u32 = 585;
pub const DEFAULT_PAGE_PARAMETER: &str = "page";
pub const DEFAULT_PAYLOAD_KEY: &str = "diamonds";
pub const DEFAULT_OUTPUT_PATH: &str = "./output";
pub const DEFAULT_OUTPUT_FILE: &str = "brilliant.csv";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// 搜尋條件，順序與網站送出的 query string 相同；`page` 由 harvester 代入
pub const DEFAULT_QUERY: &[(&str, &str)] = &[
    ("shapes", "All"),
    ("cuts", "Fair,Good,Very Good,Ideal,Super Ideal"),
    ("colors", "J,I,H,G,F,E,D"),
    ("clarities", "SI2,SI1,VS2,VS1,VVS2,VVS1,IF,FL"),
    ("polishes", "Good,Very Good,Excellent"),
    ("symmetries", "Good,Very Good,Excellent"),
    ("fluorescences", "Very Strong,Strong,Medium,Faint,None"),
    ("min_carat", "0.25"),
    ("max_carat", "13.42"),
    ("min_table", "48.00"),
    ("max_table", "88.00"),
    ("min_depth", "3.50"),
    ("max_depth", "90.70"),
    ("min_price", "0"),
    ("max_price", "912285"),
    ("stock_number", ""),
    ("row", "0"),
    ("page", "1"),
    ("requestedDataSize", "200"),
    ("order_by", "price"),
    ("order_method", "asc"),
    ("currency", "CAD"),
    ("has_v360_video", ""),
    ("dedicated", ""),
    ("abv", ""),
    ("sid", ""),
    ("min_ratio", "1.00"),
    ("max_ratio", "2.75"),
    ("shipping_day", ""),
    ("suppler_shipping_day", ""),
    ("exclude_quick_ship_suppliers", ""),
    ("MIN_PRICE", "555"),
    ("MAX_PRICE", "1930485"),
    ("MIN_CARAT", "0.25"),
    ("MAX_CARAT", "13.42"),
    ("MIN_TABLE", "48"),
    ("MAX_TABLE", "88"),
    ("MIN_DEPTH", "3.5"),
    ("MAX_DEPTH", "90.7"),
    ("category", "Loose Diamonds"),
    ("fill_most_popular", "true"),
    ("most_popular_order_by", "recommended"),
    ("most_popular_order_method", ""),
];

pub fn default_query() -> Vec<(String, String)> {
    DEFAULT_QUERY
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// Apply `overrides` on top of `base`: existing keys keep their position and
/// take the new value, unknown keys are appended in order.
pub fn merge_parameters(
    mut base: Vec<(String, String)>,
    overrides: &[(String, String)],
) -> Vec<(String, String)> {
    for (key, value) in overrides {
        match base.iter_mut().find(|(existing, _)| existing == key) {
            Some(entry) => entry.1 = value.clone(),
            None => base.push((key.clone(), value.clone())),
        }
    }
    base
}
