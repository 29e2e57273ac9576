//! # Park Map Builder
//!
//! 工業區監測地圖產生器：掃描目錄下的監測站 Excel，
//! 擷取工業區基本資料與量測資料，輸出互動地圖與各園區詳細頁面。
//! 一次性的批次報表工具，跑完寫檔即結束。
//!
//! ## 架構設計
//!
//! ### ① 資料模型（Models）
//! - `models/` - ParkRecord、MeasurementTable
//!
//! ### ② 業務能力層（Services）
//! - `services/scanner` - 列舉與分類 .xlsx 檔（目標/非目標/損壞）
//! - `services/extractor` - 基本資料鍵值表 → ParkRecord
//! - `services/detail_page` - 量測資料 → 靜態詳細頁面
//! - `services/layers` - 四個固定背景圖層
//!
//! ### ③ 地圖組裝（Map）
//! - `map/builder` - 顯式 builder，累加圖層與標記後一次序列化
//! - `map/popup` - 標記 popup HTML（含回饋表單與 meta 屬性）
//! - `map/feedback` - 依原樣注入的回饋腳本
//!
//! ### ④ 編排層（App）
//! - `app` - 線性流程與統計輸出

pub mod app;
pub mod config;
pub mod error;
pub mod logger;
pub mod map;
pub mod models;
pub mod services;
pub mod utils;

// 重新匯出常用類型
pub use app::App;
pub use config::Config;
pub use error::{AppError, LayerError};
pub use map::{MapBuilder, FEEDBACK_JS};
pub use models::{MeasurementTable, ParkRecord};
pub use services::scanner::ScanOutcome;
pub use utils::safe_slug;
