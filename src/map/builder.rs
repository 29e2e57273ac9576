//! 地圖文件組裝
//!
//! 顯式的 builder 物件，由各階段以可變借用逐步累加圖層與標記，
//! 最後一次序列化成單一自足的 Leaflet HTML 文件。
//! 圖層與標記只增不減，也不會在加入後被修改

use serde::Serialize;
use serde_json::Value;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::error::AppError;
use crate::map::popup;
use crate::models::ParkRecord;

/// 目標工業區圖層在圖層控制器中的名稱
pub const TARGET_GROUP_NAME: &str = "📌 分析目標 (含回饋)";

const GREEN_MARKER_ICON: &str =
    "https://raw.githubusercontent.com/pointhi/leaflet-color-markers/master/img/marker-icon-2x-green.png";
const MARKER_SHADOW: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/images/marker-shadow.png";

/// 面狀圖層樣式（對應 Leaflet path options）
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerStyle {
    pub color: String,
    pub weight: u32,
    pub fill: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
}

impl LayerStyle {
    /// 只描邊不填色
    pub fn outline(color: &str) -> Self {
        Self {
            color: color.to_string(),
            weight: 1,
            fill: false,
            fill_opacity: None,
        }
    }

    /// 描邊加半透明填色
    pub fn filled(color: &str, fill_opacity: f64) -> Self {
        Self {
            color: color.to_string(),
            weight: 1,
            fill: true,
            fill_opacity: Some(fill_opacity),
        }
    }
}

/// 點狀圖層中的單一圓點
#[derive(Clone, Debug)]
pub struct PointMarker {
    pub lat: f64,
    pub lon: f64,
    /// 點擊時顯示的標籤（如學校名稱）
    pub label: Option<String>,
}

enum Overlay {
    GeoJson {
        name: String,
        data: Value,
        style: LayerStyle,
    },
    Points {
        name: String,
        color: String,
        radius: u32,
        points: Vec<PointMarker>,
    },
}

struct TargetMarker {
    lat: f64,
    lon: f64,
    tooltip: String,
    popup_html: String,
}

/// 地圖文件 builder
pub struct MapBuilder {
    center: (f64, f64),
    zoom: u8,
    overlays: Vec<Overlay>,
    targets: Vec<TargetMarker>,
    scripts: Vec<String>,
}

impl MapBuilder {
    pub fn new(center: (f64, f64), zoom: u8) -> Self {
        Self {
            center,
            zoom,
            overlays: Vec::new(),
            targets: Vec::new(),
            scripts: Vec::new(),
        }
    }

    /// 加入面狀 GeoJSON 覆蓋層（可於圖層控制器開關）
    pub fn add_geojson_overlay(&mut self, name: &str, data: Value, style: LayerStyle) {
        self.overlays.push(Overlay::GeoJson {
            name: name.to_string(),
            data,
            style,
        });
    }

    /// 加入點狀覆蓋層
    pub fn add_point_overlay(
        &mut self,
        name: &str,
        color: &str,
        radius: u32,
        points: Vec<PointMarker>,
    ) {
        self.overlays.push(Overlay::Points {
            name: name.to_string(),
            color: color.to_string(),
            radius,
            points,
        });
    }

    /// 加入一個目標工業區標記（tooltip = 園區名，popup 含回饋表單）
    pub fn add_park_marker(&mut self, park: &ParkRecord) {
        self.targets.push(TargetMarker {
            lat: park.lat,
            lon: park.lon,
            tooltip: park.name.clone(),
            popup_html: popup::popup_html(park),
        });
    }

    /// 注入一段腳本，依原樣輸出於文件尾端
    pub fn inject_script(&mut self, script: &str) {
        self.scripts.push(script.to_string());
    }

    pub fn marker_count(&self) -> usize {
        self.targets.len()
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    /// 序列化為完整的 HTML 文件
    pub fn render(&self) -> String {
        let mut js = String::new();
        let _ = writeln!(
            js,
            "var map = L.map('map').setView([{}, {}], {});",
            self.center.0, self.center.1, self.zoom
        );
        js.push_str(
            "L.tileLayer('https://tile.openstreetmap.org/{z}/{x}/{y}.png', {\n    maxZoom: 19,\n    attribution: '&copy; OpenStreetMap contributors'\n}).addTo(map);\n",
        );
        js.push_str("var overlays = {};\n");

        for (i, overlay) in self.overlays.iter().enumerate() {
            match overlay {
                Overlay::GeoJson { name, data, style } => {
                    let _ = writeln!(
                        js,
                        "var layer{i} = L.geoJSON({data}, {{style: {style}}}).addTo(map);\noverlays[{name}] = layer{i};",
                        data = data,
                        style = js_value(style),
                        name = js_str(name),
                    );
                }
                Overlay::Points {
                    name,
                    color,
                    radius,
                    points,
                } => {
                    let _ = writeln!(js, "var layer{i} = L.featureGroup().addTo(map);");
                    for point in points {
                        let popup = match &point.label {
                            Some(label) => format!(".bindPopup({})", js_str(label)),
                            None => String::new(),
                        };
                        let _ = writeln!(
                            js,
                            "L.circleMarker([{lat}, {lon}], {{radius: {radius}, color: {color}}}){popup}.addTo(layer{i});",
                            lat = point.lat,
                            lon = point.lon,
                            color = js_str(color),
                        );
                    }
                    let _ = writeln!(js, "overlays[{}] = layer{i};", js_str(name));
                }
            }
        }

        // 目標工業區：綠色標記 + tooltip + 回饋 popup
        let _ = writeln!(
            js,
            "var greenIcon = L.icon({{iconUrl: {icon}, shadowUrl: {shadow}, iconSize: [25, 41], iconAnchor: [12, 41], popupAnchor: [1, -34]}});",
            icon = js_str(GREEN_MARKER_ICON),
            shadow = js_str(MARKER_SHADOW),
        );
        js.push_str("var targets = L.featureGroup().addTo(map);\n");
        for marker in &self.targets {
            let _ = writeln!(
                js,
                "L.marker([{lat}, {lon}], {{icon: greenIcon}}).bindTooltip({tooltip}).bindPopup({popup}, {{maxWidth: 350}}).addTo(targets);",
                lat = marker.lat,
                lon = marker.lon,
                tooltip = js_str(&marker.tooltip),
                popup = js_str(&marker.popup_html),
            );
        }
        let _ = writeln!(js, "overlays[{}] = targets;", js_str(TARGET_GROUP_NAME));
        js.push_str("L.control.layers(null, overlays).addTo(map);\n");

        format!(
            r#"<!doctype html>
<html lang="zh-Hant">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>工業區監測地圖</title>
<link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.css">
<script src="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.js"></script>
<style>html, body, #map {{ height: 100%; margin: 0; }}</style>
</head>
<body>
<div id="map"></div>
<script>
{js}</script>
{scripts}</body></html>
"#,
            scripts = self.scripts.join("\n"),
        )
    }

    /// 寫出首頁地圖；這是整個流程唯一致命的失敗點
    pub fn write_to(&self, path: &Path) -> Result<(), AppError> {
        fs::write(path, self.render()).map_err(|source| AppError::MapWriteFailed {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// 以 JSON 字面值安全嵌入 JavaScript 字串
fn js_str(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string())
}

fn js_value(value: &impl Serialize) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn park(name: &str, lon: f64, lat: f64) -> ParkRecord {
        ParkRecord {
            name: name.into(),
            lon,
            lat,
            monitoring_period: "113年".into(),
            data_type: "自動監測".into(),
            note: "（未填）".into(),
            raw_page_href: None,
        }
    }

    #[test]
    fn marker_count_matches_added_records() {
        let mut builder = MapBuilder::new((23.6, 121.0), 8);
        builder.add_park_marker(&park("甲園區", 120.1, 23.1));
        builder.add_park_marker(&park("乙園區", 120.2, 23.2));
        assert_eq!(builder.marker_count(), 2);

        let html = builder.render();
        assert_eq!(html.matches("L.marker(").count(), 2);
        assert!(html.contains("[23.1, 120.1]"));
    }

    #[test]
    fn overlays_appear_in_layer_control() {
        let mut builder = MapBuilder::new((23.6, 121.0), 8);
        builder.add_geojson_overlay(
            "縣市邊界",
            json!({"type": "FeatureCollection", "features": []}),
            LayerStyle::outline("#666"),
        );
        builder.add_point_overlay(
            "學校",
            "red",
            2,
            vec![PointMarker {
                lat: 23.0,
                lon: 120.0,
                label: Some("某國小".into()),
            }],
        );

        assert_eq!(builder.overlay_count(), 2);

        let html = builder.render();
        assert!(html.contains(r#"overlays["縣市邊界"]"#));
        assert!(html.contains(r#"overlays["學校"]"#));
        assert!(html.contains(&format!(r#"overlays["{TARGET_GROUP_NAME}"]"#)));
        assert!(html.contains("L.control.layers(null, overlays)"));
        assert!(html.contains("某國小"));
    }

    #[test]
    fn injected_script_appears_once_verbatim() {
        let mut builder = MapBuilder::new((23.6, 121.0), 8);
        builder.add_park_marker(&park("甲園區", 120.1, 23.1));
        builder.inject_script(crate::map::FEEDBACK_JS);

        let html = builder.render();
        assert_eq!(html.matches("const GAS_URL").count(), 1);
        assert!(html.contains("sendFeedback"));
    }

    #[test]
    fn popup_metadata_survives_embedding() {
        let mut builder = MapBuilder::new((23.6, 121.0), 8);
        builder.add_park_marker(&park("示範園區", 120.3, 23.5));
        let html = builder.render();
        // JSON 轉義後仍須帶有 meta 元素的識別屬性
        assert!(html.contains("meta_示範園區"));
        assert!(html.contains("data-lat"));
    }

    #[test]
    fn geojson_style_serializes_camel_case() {
        assert_eq!(
            js_value(&LayerStyle::filled("orange", 0.2)),
            r#"{"color":"orange","weight":1,"fill":true,"fillOpacity":0.2}"#
        );
        assert_eq!(
            js_value(&LayerStyle::outline("#666")),
            r##"{"color":"#666","weight":1,"fill":false}"##
        );
    }
}
