//! 流程編排
//!
//! 單一線性流程：背景圖層 → 掃描分類 → 擷取上圖 → 注入腳本 → 寫檔。
//! 個別圖層或檔案失敗不中斷；只有首頁地圖寫不出去才算失敗

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::Config;
use crate::map::{MapBuilder, FEEDBACK_JS};
use crate::services::scanner::{self, ScanOutcome};
use crate::services::layers;

/// 應用主結構
pub struct App {
    config: Config,
}

/// 掃描統計
#[derive(Debug, Default)]
pub struct ScanStats {
    /// 成功上圖的目標工業區數
    pub accepted: usize,
    /// 非目標格式（預期情況）
    pub not_target: usize,
    /// 目標格式但座標不合格
    pub rejected: usize,
    /// 打不開或讀取失敗的檔案
    pub corrupt: usize,
    /// 有產生詳細頁面的目標數
    pub detail_pages: usize,
}

impl App {
    pub fn initialize(config: Config) -> Self {
        Self { config }
    }

    /// 執行完整流程
    pub fn run(&self) -> Result<()> {
        log_startup(&self.config);

        let mut builder = MapBuilder::new(self.config.map_center, self.config.map_zoom);

        // 1. 背景圖層（全部選配）
        let layers_loaded = layers::load_background_layers(&self.config, &mut builder);
        info!("🗺️ 背景圖層載入完成: {layers_loaded}/4");

        // 2. 掃描並處理目標工業區
        let stats = self.scan_targets(&mut builder)?;

        // 3. 注入回饋腳本（一次、依原樣）
        builder.inject_script(FEEDBACK_JS);

        // 4. 寫出首頁地圖（唯一致命失敗點）
        builder
            .write_to(&self.config.output_html)
            .with_context(|| format!("地圖輸出失敗: {}", self.config.output_html.display()))?;
        info!("💾 地圖已存為 {}", self.config.output_html.display());

        print_final_stats(&stats, layers_loaded);
        Ok(())
    }

    fn scan_targets(&self, builder: &mut MapBuilder) -> Result<ScanStats> {
        let excluded = self.config.excluded_file_names();
        let files = scanner::find_candidate_files(&self.config.scan_dir, &excluded)?;
        info!("📂 找到 {} 個 Excel 檔，開始掃描...", files.len());

        let mut stats = ScanStats::default();
        for path in &files {
            match scanner::classify_and_extract(path, &self.config.output_dir) {
                ScanOutcome::Target(record) => {
                    info!("  ✅ 成功載入: {}", record.name);
                    if record.raw_page_href.is_some() {
                        stats.detail_pages += 1;
                    }
                    builder.add_park_marker(&record);
                    stats.accepted += 1;
                }
                ScanOutcome::NotTarget => {
                    // 無關的 Excel 是常態，不值得記錄
                    stats.not_target += 1;
                }
                ScanOutcome::Rejected(reason) => {
                    warn!("⚠️ {reason}，跳過。({})", path.display());
                    stats.rejected += 1;
                }
                ScanOutcome::Corrupt(reason) => {
                    warn!("⚠️ 檔案無法讀取: {} ({reason})", path.display());
                    stats.corrupt += 1;
                }
            }
        }

        info!("🎉 處理完成！共加入 {} 個目標工業區。", stats.accepted);
        Ok(stats)
    }
}

// ========== 日誌輔助函式 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 開始建立地圖...");
    info!(
        "啟動時間: {} | 掃描目錄: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        config.scan_dir.display()
    );
    info!("{}", "=".repeat(60));
}

fn print_final_stats(stats: &ScanStats, layers_loaded: usize) {
    info!("{}", "=".repeat(60));
    info!("📊 執行統計");
    info!("✅ 上圖: {}", stats.accepted);
    info!("📄 詳細頁面: {}", stats.detail_pages);
    info!("➖ 非目標: {}", stats.not_target);
    info!("❌ 拒收(座標不合格): {}", stats.rejected);
    info!("💥 無法讀取: {}", stats.corrupt);
    info!("🗺️ 背景圖層: {layers_loaded}/4");
    info!("{}", "=".repeat(60));
}
