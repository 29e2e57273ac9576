use std::path::PathBuf;
use thiserror::Error;

/// 應用程式錯誤類型
///
/// 整個流程中唯一致命的錯誤是首頁地圖寫入失敗；
/// 個別圖層或個別工業區的失敗只會記錄警告後繼續
#[derive(Debug, Error)]
pub enum AppError {
    /// 寫入首頁地圖失敗
    #[error("無法寫入地圖檔案 {path}: {source}")]
    MapWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// 背景圖層載入錯誤
#[derive(Debug, Error)]
pub enum LayerError {
    /// 圖層檔案不存在
    #[error("圖層檔案不存在: {0}")]
    Missing(PathBuf),
    /// Shapefile 讀取失敗
    #[error("Shapefile 讀取失敗: {0}")]
    Shapefile(#[from] shapefile::Error),
    /// Excel 讀取失敗
    #[error("Excel 讀取失敗: {0}")]
    Spreadsheet(#[from] calamine::XlsxError),
    /// 活頁簿中沒有任何工作表
    #[error("活頁簿中沒有任何工作表")]
    EmptyWorkbook,
}
