//! TWD97 二度分帶（EPSG:3826）與 WGS84 經緯度（EPSG:4326）的座標轉換
//!
//! 政府公開的邊界圖層常以 TWD97 橫麥卡托投影（公尺）發布，
//! 上圖前必須轉回經緯度。採用標準橫麥卡托級數展開，
//! 不依賴系統層級的 proj 函式庫。

/// GRS80 橢球長半徑（公尺）
const A: f64 = 6_378_137.0;
/// GRS80 扁率
const F: f64 = 1.0 / 298.257_222_101;
/// TWD97 二度分帶中央經線
const LON0_DEG: f64 = 121.0;
/// 中央經線尺度因子
const K0: f64 = 0.9999;
/// 橫座標平移量（公尺）
const FALSE_EASTING: f64 = 250_000.0;

/// TWD97 二度分帶投影轉換
pub struct Twd97;

impl Twd97 {
    /// 判斷一組座標是否為投影平面座標（公尺）而非經緯度
    ///
    /// 經緯度的數值範圍不會超過 ±360；公尺座標動輒數十萬
    pub fn needs_reprojection(x: f64, y: f64) -> bool {
        x.abs() > 360.0 || y.abs() > 360.0
    }

    /// 投影座標（公尺）轉經緯度，回傳 (lon, lat)（度）
    pub fn to_wgs84(x: f64, y: f64) -> (f64, f64) {
        let e2 = F * (2.0 - F);
        let e4 = e2 * e2;
        let e6 = e4 * e2;
        let ep2 = e2 / (1.0 - e2);

        let m = (y - 0.0) / K0;
        let mu = m / (A * (1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0));

        let e1 = (1.0 - (1.0 - e2).sqrt()) / (1.0 + (1.0 - e2).sqrt());
        let phi1 = mu
            + (3.0 * e1 / 2.0 - 27.0 * e1.powi(3) / 32.0) * (2.0 * mu).sin()
            + (21.0 * e1.powi(2) / 16.0 - 55.0 * e1.powi(4) / 32.0) * (4.0 * mu).sin()
            + (151.0 * e1.powi(3) / 96.0) * (6.0 * mu).sin()
            + (1097.0 * e1.powi(4) / 512.0) * (8.0 * mu).sin();

        let sin1 = phi1.sin();
        let cos1 = phi1.cos();
        let tan1 = phi1.tan();

        let c1 = ep2 * cos1 * cos1;
        let t1 = tan1 * tan1;
        let n1 = A / (1.0 - e2 * sin1 * sin1).sqrt();
        let r1 = A * (1.0 - e2) / (1.0 - e2 * sin1 * sin1).powf(1.5);
        let d = (x - FALSE_EASTING) / (n1 * K0);

        let lat = phi1
            - (n1 * tan1 / r1)
                * (d * d / 2.0
                    - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * ep2) * d.powi(4) / 24.0
                    + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1
                        - 252.0 * ep2
                        - 3.0 * c1 * c1)
                        * d.powi(6)
                        / 720.0);

        let lon = LON0_DEG.to_radians()
            + (d - (1.0 + 2.0 * t1 + c1) * d.powi(3) / 6.0
                + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * ep2 + 24.0 * t1 * t1)
                    * d.powi(5)
                    / 120.0)
                / cos1;

        (lon.to_degrees(), lat.to_degrees())
    }

    /// 經緯度（度）轉投影座標（公尺），回傳 (x, y)
    pub fn from_wgs84(lon: f64, lat: f64) -> (f64, f64) {
        let e2 = F * (2.0 - F);
        let e4 = e2 * e2;
        let e6 = e4 * e2;
        let ep2 = e2 / (1.0 - e2);

        let phi = lat.to_radians();
        let sin_phi = phi.sin();
        let cos_phi = phi.cos();
        let tan_phi = phi.tan();

        let n = A / (1.0 - e2 * sin_phi * sin_phi).sqrt();
        let t = tan_phi * tan_phi;
        let c = ep2 * cos_phi * cos_phi;
        let a_term = (lon - LON0_DEG).to_radians() * cos_phi;

        let m = A
            * ((1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * phi
                - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * phi).sin()
                + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * phi).sin()
                - (35.0 * e6 / 3072.0) * (6.0 * phi).sin());

        let x = FALSE_EASTING
            + K0 * n
                * (a_term
                    + (1.0 - t + c) * a_term.powi(3) / 6.0
                    + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep2) * a_term.powi(5) / 120.0);

        let y = K0
            * (m + n
                * tan_phi
                * (a_term.powi(2) / 2.0
                    + (5.0 - t + 9.0 * c + 4.0 * c * c) * a_term.powi(4) / 24.0
                    + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep2) * a_term.powi(6)
                        / 720.0));

        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn central_meridian_maps_to_false_easting() {
        let (x, _y) = Twd97::from_wgs84(121.0, 23.5);
        assert!((x - 250_000.0).abs() < 1e-6, "x = {x}");
    }

    #[test]
    fn round_trip_is_stable() {
        for &(lon, lat) in &[(120.3, 23.5), (121.5, 25.05), (120.2, 22.6), (121.8, 24.8)] {
            let (x, y) = Twd97::from_wgs84(lon, lat);
            let (lon2, lat2) = Twd97::to_wgs84(x, y);
            assert!((lon - lon2).abs() < 1e-7, "lon {lon} -> {lon2}");
            assert!((lat - lat2).abs() < 1e-7, "lat {lat} -> {lat2}");
        }
    }

    #[test]
    fn detects_projected_coordinates() {
        assert!(Twd97::needs_reprojection(250_000.0, 2_600_000.0));
        assert!(!Twd97::needs_reprojection(121.0, 23.6));
        assert!(!Twd97::needs_reprojection(-180.0, 90.0));
    }
}
