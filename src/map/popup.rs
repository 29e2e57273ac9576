//! 標記互動視窗（popup）HTML 組裝

use crate::models::ParkRecord;
use crate::utils::{escape_html, safe_slug};

/// 建立單一工業區標記的 popup 內容
///
/// 固定帶有 `meta_<slug>` 隱藏元素，data-* 屬性供回饋腳本讀取
pub fn popup_html(park: &ParkRecord) -> String {
    let pid = safe_slug(&park.name);
    let name = escape_html(&park.name);

    let btn_html = match &park.raw_page_href {
        Some(href) => format!(
            r#"<a href="{}" target="_blank" style="color:white;background:#0d6efd;padding:4px 8px;text-decoration:none;border-radius:4px;font-size:12px;">查看原始資料</a>"#,
            escape_html(href)
        ),
        None => String::new(),
    };

    let feedback_html = format!(
        r#"
    <div style="margin-top:8px;border-top:1px solid #ccc;padding-top:8px;">
        <textarea id="fb_{pid}" rows="2" style="width:100%;font-size:12px;" placeholder="輸入回饋..."></textarea>
        <button onclick="sendFeedback('{pid}')" style="margin-top:4px;font-size:12px;cursor:pointer;">送出</button>
        <span id="msg_{pid}" style="font-size:11px;color:green;"></span>
    </div>
    "#
    );

    format!(
        r#"
    <div style="font-family:sans-serif;font-size:13px;min-width:250px;">
        <h5 style="margin:0 0 8px 0;">{name}</h5>
        <div><b>監測期間:</b> {period}</div>
        <div><b>備註:</b> {note}</div>
        <div style="margin-top:6px;">{btn_html}</div>
        {feedback_html}
        <div id="meta_{pid}" data-park="{name}" data-lat="{lat}" data-lon="{lon}" style="display:none;"></div>
    </div>
    "#,
        period = escape_html(&park.monitoring_period),
        note = escape_html(&park.note),
        lat = park.lat,
        lon = park.lon,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_park(href: Option<&str>) -> ParkRecord {
        ParkRecord {
            name: "示範園區".into(),
            lon: 120.3,
            lat: 23.5,
            monitoring_period: "113年".into(),
            data_type: "自動監測".into(),
            note: "（未填）".into(),
            raw_page_href: href.map(String::from),
        }
    }

    #[test]
    fn carries_identifying_metadata_for_feedback_script() {
        let html = popup_html(&sample_park(None));
        assert!(html.contains(r#"id="meta_示範園區""#));
        assert!(html.contains(r#"data-park="示範園區""#));
        assert!(html.contains(r#"data-lat="23.5""#));
        assert!(html.contains(r#"data-lon="120.3""#));
        assert!(html.contains("sendFeedback('示範園區')"));
    }

    #[test]
    fn raw_data_button_only_when_detail_page_exists() {
        let without = popup_html(&sample_park(None));
        assert!(!without.contains("查看原始資料"));

        let with = popup_html(&sample_park(Some("./data/示範園區_量測資料.html")));
        assert!(with.contains("查看原始資料"));
        assert!(with.contains("./data/示範園區_量測資料.html"));
    }

    #[test]
    fn park_name_is_escaped() {
        let mut park = sample_park(None);
        park.name = "<img src=x>".into();
        let html = popup_html(&park);
        assert!(!html.contains("<img src=x>"));
    }
}
