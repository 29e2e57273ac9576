//! 背景圖層載入 - 業務能力層
//!
//! 四個固定圖層：縣市邊界、產業園區範圍、學校、全台工業區中心點。
//! 每個圖層獨立載入，失敗只記警告；地圖不會因為缺背景圖層而失敗

use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use serde_json::{json, Value};
use shapefile::{PolygonRing, Shape};
use std::path::Path;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::LayerError;
use crate::map::{LayerStyle, MapBuilder, PointMarker};
use crate::utils::Twd97;

pub const COUNTY_LAYER_NAME: &str = "縣市邊界";
pub const INDUSTRIAL_LAYER_NAME: &str = "產業園區範圍";
pub const SCHOOL_LAYER_NAME: &str = "學校";
pub const CENTER_LAYER_NAME: &str = "全台工業區中心點";

/// 逐一載入四個背景圖層，回傳成功數
pub fn load_background_layers(config: &Config, builder: &mut MapBuilder) -> usize {
    let mut loaded = 0;

    match boundary_geojson(&config.county_shp) {
        Ok(geojson) => {
            builder.add_geojson_overlay(COUNTY_LAYER_NAME, geojson, LayerStyle::outline("#666"));
            loaded += 1;
        }
        Err(e) => warn!("⚠️ 載入縣市邊界失敗: {e}"),
    }

    match boundary_geojson(&config.industrial_shp) {
        Ok(geojson) => {
            builder.add_geojson_overlay(
                INDUSTRIAL_LAYER_NAME,
                geojson,
                LayerStyle::filled("orange", 0.2),
            );
            loaded += 1;
        }
        Err(e) => warn!("⚠️ 載入產業園區範圍失敗: {e}"),
    }

    match point_layer_from_xlsx(&config.school_xlsx, "N", "E", "學校名稱") {
        Ok(points) => {
            info!("  學校圖層: {} 點", points.len());
            builder.add_point_overlay(SCHOOL_LAYER_NAME, "red", 2, points);
            loaded += 1;
        }
        Err(e) => warn!("⚠️ 載入學校圖層失敗: {e}"),
    }

    match point_layer_from_xlsx(&config.center_xlsx, "座標(緯度)", "座標(經度)", "園區名稱(比對)") {
        Ok(points) => {
            info!("  工業區中心點圖層: {} 點", points.len());
            builder.add_point_overlay(CENTER_LAYER_NAME, "purple", 3, points);
            loaded += 1;
        }
        Err(e) => warn!("⚠️ 載入工業區中心點失敗: {e}"),
    }

    loaded
}

/// 讀取邊界 Shapefile 並轉為 EPSG:4326 的 GeoJSON FeatureCollection
///
/// 來源若是 TWD97 二度分帶平面座標（以數值大小判斷）會先轉回經緯度
pub fn boundary_geojson(path: &Path) -> Result<Value, LayerError> {
    if !path.exists() {
        return Err(LayerError::Missing(path.to_path_buf()));
    }

    let shapes = shapefile::read_shapes(path)?;

    let projected = shapes
        .iter()
        .filter_map(shape_rings)
        .flatten()
        .flat_map(|(_, ring)| ring)
        .next()
        .map(|(x, y)| Twd97::needs_reprojection(x, y))
        .unwrap_or(false);

    let features: Vec<Value> = shapes
        .iter()
        .filter_map(|shape| {
            let rings = shape_rings(shape)?;
            Some(json!({
                "type": "Feature",
                "geometry": rings_to_geometry(rings, projected),
                "properties": {},
            }))
        })
        .collect();

    Ok(json!({ "type": "FeatureCollection", "features": features }))
}

/// 取出面狀 shape 的所有環（外環 true / 內環 false）
fn shape_rings(shape: &Shape) -> Option<Vec<(bool, Vec<(f64, f64)>)>> {
    match shape {
        Shape::Polygon(polygon) => Some(
            polygon
                .rings()
                .iter()
                .map(|ring| {
                    let outer = matches!(ring, PolygonRing::Outer(_));
                    (outer, ring.points().iter().map(|p| (p.x, p.y)).collect())
                })
                .collect(),
        ),
        Shape::PolygonZ(polygon) => Some(
            polygon
                .rings()
                .iter()
                .map(|ring| {
                    let outer = matches!(ring, PolygonRing::Outer(_));
                    (outer, ring.points().iter().map(|p| (p.x, p.y)).collect())
                })
                .collect(),
        ),
        _ => None,
    }
}

/// 環序列組成 GeoJSON 幾何；多個外環時輸出 MultiPolygon
fn rings_to_geometry(rings: Vec<(bool, Vec<(f64, f64)>)>, projected: bool) -> Value {
    let mut polygons: Vec<Vec<Vec<[f64; 2]>>> = Vec::new();
    for (outer, ring) in rings {
        let coords: Vec<[f64; 2]> = ring
            .into_iter()
            .map(|(x, y)| {
                if projected {
                    let (lon, lat) = Twd97::to_wgs84(x, y);
                    [lon, lat]
                } else {
                    [x, y]
                }
            })
            .collect();
        if outer || polygons.is_empty() {
            polygons.push(vec![coords]);
        } else if let Some(last) = polygons.last_mut() {
            last.push(coords);
        }
    }

    if polygons.len() == 1 {
        json!({ "type": "Polygon", "coordinates": polygons[0] })
    } else {
        json!({ "type": "MultiPolygon", "coordinates": polygons })
    }
}

/// 讀取座標點名錄 Excel 的第一張工作表
pub fn point_layer_from_xlsx(
    path: &Path,
    lat_col: &str,
    lon_col: &str,
    label_col: &str,
) -> Result<Vec<PointMarker>, LayerError> {
    if !path.exists() {
        return Err(LayerError::Missing(path.to_path_buf()));
    }

    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(LayerError::EmptyWorkbook)??;

    Ok(point_rows(&range, lat_col, lon_col, label_col))
}

/// 逐列驗證座標欄位；缺漏或非數值的列安靜跳過
fn point_rows(
    range: &Range<Data>,
    lat_col: &str,
    lon_col: &str,
    label_col: &str,
) -> Vec<PointMarker> {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Vec::new();
    };

    let column = |name: &str| {
        header.iter().position(|cell| match cell {
            Data::String(s) => s.trim() == name,
            _ => false,
        })
    };
    let (Some(lat_idx), Some(lon_idx)) = (column(lat_col), column(lon_col)) else {
        return Vec::new();
    };
    let label_idx = column(label_col);

    rows.filter_map(|row| {
        let lat = cell_f64(row.get(lat_idx)?)?;
        let lon = cell_f64(row.get(lon_idx)?)?;
        let label = label_idx
            .and_then(|idx| row.get(idx))
            .and_then(|cell| match cell {
                Data::Empty => None,
                Data::String(s) => Some(s.trim().to_string()),
                other => Some(other.to_string()),
            });
        Some(PointMarker { lat, lon, label })
    })
    .collect()
}

fn cell_f64(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
