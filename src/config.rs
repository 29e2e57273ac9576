use std::collections::BTreeSet;
use std::path::PathBuf;

/// 程式配置
///
/// 所有路徑與地圖參數皆有固定預設值，並可透過環境變數覆寫
#[derive(Clone, Debug)]
pub struct Config {
    /// 縣市邊界 Shapefile
    pub county_shp: PathBuf,
    /// 產業園區範圍 Shapefile
    pub industrial_shp: PathBuf,
    /// 學校名錄（含經緯度）Excel
    pub school_xlsx: PathBuf,
    /// 全台工業區中心點座標 Excel
    pub center_xlsx: PathBuf,
    /// 掃描目標工業區 Excel 的目錄
    pub scan_dir: PathBuf,
    /// 量測資料詳細頁面的輸出目錄
    pub output_dir: PathBuf,
    /// 首頁地圖輸出路徑
    pub output_html: PathBuf,
    /// 地圖初始中心點（緯度, 經度）
    pub map_center: (f64, f64),
    /// 地圖初始縮放層級
    pub map_zoom: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            county_shp: PathBuf::from("測站與工業區邊界距離/縣市邊界圖層/COUNTY_MOI_1130718.shp"),
            industrial_shp: PathBuf::from(
                "測站與工業區邊界距離/產業園區範圍圖_114110更新/產業園區範圍圖.shp",
            ),
            school_xlsx: PathBuf::from(
                "測站與工業區邊界距離/111學年度各級學校名錄（含經緯度）20230825.xlsx",
            ),
            center_xlsx: PathBuf::from("測站與工業區邊界距離/園區名單及座標_114.06.05.xlsx"),
            scan_dir: PathBuf::from("."),
            output_dir: PathBuf::from("data"),
            output_html: PathBuf::from("index.html"),
            map_center: (23.6, 121.0),
            map_zoom: 8,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            county_shp: std::env::var("PARK_MAP_COUNTY_SHP").map(PathBuf::from).unwrap_or(default.county_shp),
            industrial_shp: std::env::var("PARK_MAP_INDUSTRIAL_SHP").map(PathBuf::from).unwrap_or(default.industrial_shp),
            school_xlsx: std::env::var("PARK_MAP_SCHOOL_XLSX").map(PathBuf::from).unwrap_or(default.school_xlsx),
            center_xlsx: std::env::var("PARK_MAP_CENTER_XLSX").map(PathBuf::from).unwrap_or(default.center_xlsx),
            scan_dir: std::env::var("PARK_MAP_SCAN_DIR").map(PathBuf::from).unwrap_or(default.scan_dir),
            output_dir: std::env::var("PARK_MAP_OUTPUT_DIR").map(PathBuf::from).unwrap_or(default.output_dir),
            output_html: std::env::var("PARK_MAP_OUTPUT_HTML").map(PathBuf::from).unwrap_or(default.output_html),
            map_center: default.map_center,
            map_zoom: std::env::var("PARK_MAP_ZOOM").ok().and_then(|v| v.parse().ok()).unwrap_or(default.map_zoom),
        }
    }

    /// 掃描時排除的檔名（系統圖層檔與已知非目標檔）
    pub fn excluded_file_names(&self) -> BTreeSet<String> {
        let mut set = BTreeSet::new();
        for path in [&self.school_xlsx, &self.center_xlsx, &self.output_html] {
            if let Some(name) = path.file_name() {
                set.insert(name.to_string_lossy().into_owned());
            }
        }
        set.insert("requirements.txt".to_string());
        set.insert(".DS_Store".to_string());
        set
    }
}
