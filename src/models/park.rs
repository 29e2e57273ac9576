//! 工業區資料模型

use calamine::{Data, Range};
use std::cmp::Ordering;

/// 量測資料排序依據的欄位名
pub const START_TIME_COLUMN: &str = "StartTime";

/// 單一目標工業區的紀錄
///
/// 僅在單次執行內存活：掃描時建立，標記寫入地圖後即丟棄
#[derive(Clone, Debug, PartialEq)]
pub struct ParkRecord {
    /// 工業區名稱（缺漏時以檔名主幹代替）
    pub name: String,
    /// 中心經度
    pub lon: f64,
    /// 中心緯度
    pub lat: f64,
    /// 監測期間
    pub monitoring_period: String,
    /// 資料類型
    pub data_type: String,
    /// 備註
    pub note: String,
    /// 量測資料詳細頁面的相對連結（若有產生）
    pub raw_page_href: Option<String>,
}

/// 量測資料表
///
/// 欄位任意；若含 StartTime 欄則依其值遞增排序
#[derive(Clone, Debug, Default)]
pub struct MeasurementTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl MeasurementTable {
    /// 由工作表範圍建立：首列為欄名，其餘為資料列
    pub fn from_range(range: &Range<Data>) -> Self {
        let mut rows_iter = range.rows();
        let Some(header) = rows_iter.next() else {
            return Self::default();
        };

        let columns: Vec<String> = header.iter().map(cell_text).collect();
        let mut data_rows: Vec<&[Data]> = rows_iter.collect();

        if let Some(idx) = columns.iter().position(|c| c == START_TIME_COLUMN) {
            // 穩定排序，StartTime 相同的列保持原順序
            data_rows.sort_by(|a, b| cmp_cells(a.get(idx), b.get(idx)));
        }

        let rows = data_rows
            .iter()
            .map(|row| row.iter().map(cell_text).collect())
            .collect();

        Self { columns, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// 儲存格顯示文字（空儲存格顯示為空字串）
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| dt.as_f64().to_string()),
        other => other.to_string(),
    }
}

/// 排序鍵：數值（含 Excel 日期序號）優先，其次才比字串
fn numeric_key(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::DateTime(dt) => Some(dt.as_f64()),
        _ => None,
    }
}

fn cmp_cells(a: Option<&Data>, b: Option<&Data>) -> Ordering {
    let (Some(a), Some(b)) = (a, b) else {
        return a.is_some().cmp(&b.is_some()).reverse();
    };
    match (numeric_key(a), numeric_key(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => cell_text(a).cmp(&cell_text(b)),
    }
}
