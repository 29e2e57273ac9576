//! 工業區基本資料擷取 - 業務能力層
//!
//! 只負責把「工業區基本資料」鍵值表轉成 ParkRecord，
//! 不關心檔案掃描順序，也不碰地圖

use calamine::{Data, Range};
use std::collections::HashMap;

use crate::models::ParkRecord;

/// 目標工業區必備的工作表名
pub const BASIC_INFO_SHEET: &str = "工業區基本資料";
/// 選配的量測資料工作表名
pub const MEASUREMENT_SHEET: &str = "量測資料";

/// 鍵值表中認得的鍵
pub const KEY_NAME: &str = "工業區名稱";
pub const KEY_LON: &str = "工業區中心經度";
pub const KEY_LAT: &str = "工業區中心緯度";
pub const KEY_PERIOD: &str = "監測期間";
pub const KEY_DATA_TYPE: &str = "資料類型";
pub const KEY_NOTE: &str = "備註";

/// 描述欄位缺漏時的預設顯示文字
pub const FIELD_PLACEHOLDER: &str = "（未填）";

/// 基本資料鍵值表
///
/// 前兩欄視為鍵/值；首列為表頭不列入。
/// 未認得的鍵保留在查詢表中但不會被使用
#[derive(Debug, Default)]
pub struct BasicInfo {
    entries: HashMap<String, Data>,
}

impl BasicInfo {
    pub fn from_range(range: &Range<Data>) -> Self {
        let mut entries = HashMap::new();
        // 跳過表頭列
        for row in range.rows().skip(1) {
            let Some(key_cell) = row.first() else { continue };
            let key = cell_str(key_cell);
            if key.is_empty() {
                continue;
            }
            let value = row.get(1).cloned().unwrap_or(Data::Empty);
            entries.insert(key, value);
        }
        Self { entries }
    }

    /// 字串欄位：缺漏或空值回傳 None
    fn get_str(&self, key: &str) -> Option<String> {
        let value = self.entries.get(key)?;
        match value {
            Data::Empty => None,
            other => Some(cell_str(other)),
        }
    }

    /// 座標欄位：嚴格數值轉換，字串允許可解析為浮點數者
    fn get_f64(&self, key: &str) -> Option<f64> {
        match self.entries.get(key)? {
            Data::Float(f) => Some(*f),
            Data::Int(i) => Some(*i as f64),
            Data::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// 組出 ParkRecord；座標缺漏或非數值時回傳拒收原因
    pub fn into_record(self, file_stem: &str) -> Result<ParkRecord, String> {
        let name = self
            .get_str(KEY_NAME)
            .unwrap_or_else(|| file_stem.to_string());

        let lon = self.get_f64(KEY_LON);
        let lat = self.get_f64(KEY_LAT);
        let (Some(lon), Some(lat)) = (lon, lat) else {
            return Err(format!("{name} 經緯度格式錯誤"));
        };

        Ok(ParkRecord {
            name,
            lon,
            lat,
            monitoring_period: self
                .get_str(KEY_PERIOD)
                .unwrap_or_else(|| FIELD_PLACEHOLDER.to_string()),
            data_type: self
                .get_str(KEY_DATA_TYPE)
                .unwrap_or_else(|| FIELD_PLACEHOLDER.to_string()),
            note: self
                .get_str(KEY_NOTE)
                .unwrap_or_else(|| FIELD_PLACEHOLDER.to_string()),
            raw_page_href: None,
        })
    }
}

fn cell_str(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kv_range(pairs: &[(&str, Data)]) -> Range<Data> {
        let mut range = Range::new((0, 0), (pairs.len() as u32, 1));
        range.set_value((0, 0), Data::String("項目".into()));
        range.set_value((0, 1), Data::String("內容".into()));
        for (i, (key, value)) in pairs.iter().enumerate() {
            range.set_value((i as u32 + 1, 0), Data::String((*key).into()));
            range.set_value((i as u32 + 1, 1), value.clone());
        }
        range
    }

    #[test]
    fn builds_record_from_complete_sheet() {
        let range = kv_range(&[
            (KEY_NAME, Data::String("示範園區".into())),
            (KEY_LON, Data::Float(120.3)),
            (KEY_LAT, Data::Float(23.5)),
            (KEY_PERIOD, Data::String("113年1月-6月".into())),
            (KEY_DATA_TYPE, Data::String("連續自動監測".into())),
            (KEY_NOTE, Data::String("測試".into())),
        ]);
        let record = BasicInfo::from_range(&range).into_record("檔名").unwrap();
        assert_eq!(record.name, "示範園區");
        assert_eq!(record.lon, 120.3);
        assert_eq!(record.lat, 23.5);
        assert_eq!(record.monitoring_period, "113年1月-6月");
        assert_eq!(record.note, "測試");
    }

    #[test]
    fn string_coordinates_are_parsed() {
        let range = kv_range(&[
            (KEY_NAME, Data::String("示範園區".into())),
            (KEY_LON, Data::String(" 120.3 ".into())),
            (KEY_LAT, Data::String("23.5".into())),
        ]);
        let record = BasicInfo::from_range(&range).into_record("檔名").unwrap();
        assert_eq!(record.lon, 120.3);
        assert_eq!(record.lat, 23.5);
    }

    #[test]
    fn non_numeric_latitude_rejects_record_with_park_name() {
        let range = kv_range(&[
            (KEY_NAME, Data::String("壞座標園區".into())),
            (KEY_LON, Data::Float(120.3)),
            (KEY_LAT, Data::String("北緯23度半".into())),
        ]);
        let err = BasicInfo::from_range(&range).into_record("檔名").unwrap_err();
        assert!(err.contains("壞座標園區"), "拒收原因應含園區名: {err}");
    }

    #[test]
    fn missing_coordinates_reject_record() {
        let range = kv_range(&[(KEY_NAME, Data::String("沒座標".into()))]);
        assert!(BasicInfo::from_range(&range).into_record("檔名").is_err());
    }

    #[test]
    fn missing_name_falls_back_to_file_stem() {
        let range = kv_range(&[
            (KEY_LON, Data::Float(120.0)),
            (KEY_LAT, Data::Float(23.0)),
        ]);
        let record = BasicInfo::from_range(&range).into_record("某園區檔").unwrap();
        assert_eq!(record.name, "某園區檔");
    }

    #[test]
    fn missing_descriptive_fields_use_placeholder() {
        let range = kv_range(&[
            (KEY_NAME, Data::String("極簡園區".into())),
            (KEY_LON, Data::Float(120.0)),
            (KEY_LAT, Data::Float(23.0)),
        ]);
        let record = BasicInfo::from_range(&range).into_record("檔名").unwrap();
        assert_eq!(record.monitoring_period, FIELD_PLACEHOLDER);
        assert_eq!(record.data_type, FIELD_PLACEHOLDER);
        assert_eq!(record.note, FIELD_PLACEHOLDER);
    }

    #[test]
    fn header_row_is_not_treated_as_data() {
        // 表頭列的「項目/內容」不應成為鍵值
        let range = kv_range(&[
            (KEY_NAME, Data::String("園區".into())),
            (KEY_LON, Data::Float(120.0)),
            (KEY_LAT, Data::Float(23.0)),
        ]);
        let info = BasicInfo::from_range(&range);
        assert!(info.get_str("項目").is_none());
    }
}
