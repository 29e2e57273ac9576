//! 目標檔案掃描與分類 - 業務能力層
//!
//! 列舉掃描目錄下的 .xlsx 檔並逐一分類。
//! 「打不開的檔案」與「沒有基本資料表的檔案」是兩回事：
//! 前者以 Corrupt 回報，後者是預期中的高頻情況，安靜跳過

use anyhow::{Context, Result};
use calamine::{open_workbook, Reader, Xlsx};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::models::{MeasurementTable, ParkRecord};
use crate::services::detail_page;
use crate::services::extractor::{BasicInfo, BASIC_INFO_SHEET, MEASUREMENT_SHEET};

/// 單一檔案的分類結果
#[derive(Debug)]
pub enum ScanOutcome {
    /// 目標工業區，擷取成功
    Target(Box<ParkRecord>),
    /// 不是目標格式（缺「工業區基本資料」表），預期情況
    NotTarget,
    /// 檔案打不開或工作表讀取失敗
    Corrupt(String),
    /// 是目標格式但紀錄不合格（座標缺漏/非數值）
    Rejected(String),
}

/// 列出掃描目錄下所有候選的 .xlsx 檔（排除拒絕名單）
pub fn find_candidate_files(
    scan_dir: &Path,
    excluded: &BTreeSet<String>,
) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(scan_dir)
        .with_context(|| format!("無法讀取掃描目錄: {}", scan_dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let is_xlsx = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("xlsx"));
        if !is_xlsx {
            continue;
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if excluded.contains(&name) {
            continue;
        }
        files.push(path);
    }

    // 處理順序不影響結果，排序只為了輸出穩定
    files.sort();
    Ok(files)
}

/// 分類單一檔案；目標檔同時完成擷取與詳細頁面輸出
pub fn classify_and_extract(path: &Path, output_dir: &Path) -> ScanOutcome {
    let mut workbook: Xlsx<_> = match open_workbook(path) {
        Ok(wb) => wb,
        Err(e) => return ScanOutcome::Corrupt(e.to_string()),
    };

    if !workbook.sheet_names().iter().any(|s| s == BASIC_INFO_SHEET) {
        return ScanOutcome::NotTarget;
    }

    let range = match workbook.worksheet_range(BASIC_INFO_SHEET) {
        Ok(range) => range,
        Err(e) => return ScanOutcome::Corrupt(e.to_string()),
    };

    let file_stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut record = match BasicInfo::from_range(&range).into_record(&file_stem) {
        Ok(record) => record,
        Err(reason) => return ScanOutcome::Rejected(reason),
    };

    // 量測資料為選配；失敗只影響詳細頁連結，不影響紀錄本身
    if workbook.sheet_names().iter().any(|s| s == MEASUREMENT_SHEET) {
        match workbook.worksheet_range(MEASUREMENT_SHEET) {
            Ok(meas_range) => {
                let table = MeasurementTable::from_range(&meas_range);
                match detail_page::write_measurement_page(output_dir, &record.name, &table) {
                    Ok(href) => record.raw_page_href = Some(href),
                    Err(e) => warn!("⚠️ {} 量測資料生成失敗: {e:#}", record.name),
                }
            }
            Err(e) => warn!("⚠️ {} 量測資料讀取失敗: {e}", record.name),
        }
    }

    ScanOutcome::Target(Box::new(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn finds_only_xlsx_outside_denylist() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("園區A.xlsx"), b"x").unwrap();
        fs::write(dir.path().join("園區B.XLSX"), b"x").unwrap();
        fs::write(dir.path().join("requirements.txt"), b"x").unwrap();
        fs::write(dir.path().join("排除我.xlsx"), b"x").unwrap();
        fs::write(dir.path().join("note.csv"), b"x").unwrap();

        let mut excluded = BTreeSet::new();
        excluded.insert("排除我.xlsx".to_string());

        let files = find_candidate_files(dir.path(), &excluded).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["園區A.xlsx", "園區B.XLSX"]);
    }

    #[test]
    fn unreadable_file_is_corrupt_not_panic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("壞檔.xlsx");
        fs::write(&path, b"this is not a zip archive").unwrap();

        match classify_and_extract(&path, dir.path()) {
            ScanOutcome::Corrupt(_) => {}
            other => panic!("預期 Corrupt，得到 {other:?}"),
        }
    }

    #[test]
    fn missing_directory_is_an_error() {
        let excluded = BTreeSet::new();
        assert!(find_candidate_files(Path::new("不存在的目錄"), &excluded).is_err());
    }
}
