//! 量測資料詳細頁面產生 - 業務能力層
//!
//! 把單一工業區的量測資料表輸出成獨立的靜態 HTML 頁面

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::models::MeasurementTable;
use crate::utils::{escape_html, safe_slug};

/// 詳細頁面檔名：`<slug(園區名)>_量測資料.html`
pub fn page_file_name(park_name: &str) -> String {
    format!("{}_量測資料.html", safe_slug(park_name))
}

/// 寫出詳細頁面，回傳地圖端使用的相對連結
pub fn write_measurement_page(
    output_dir: &Path,
    park_name: &str,
    table: &MeasurementTable,
) -> Result<String> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("無法建立輸出目錄: {}", output_dir.display()))?;

    let file_name = page_file_name(park_name);
    let page_path = output_dir.join(&file_name);
    fs::write(&page_path, render_measurement_page(park_name, table))
        .with_context(|| format!("無法寫入詳細頁面: {}", page_path.display()))?;

    // 連結相對於首頁地圖所在位置，目錄名跟著輸出目錄走
    let href = match output_dir.file_name() {
        Some(dir) => format!("./{}/{file_name}", dir.to_string_lossy()),
        None => format!("./{file_name}"),
    };
    Ok(href)
}

/// 產生完整的詳細頁面 HTML
pub fn render_measurement_page(park_name: &str, table: &MeasurementTable) -> String {
    let title = escape_html(park_name);
    format!(
        r#"<!doctype html>
<html lang="zh-Hant">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} - 量測資料</title>
<link href="https://cdn.jsdelivr.net/npm/bootstrap@5.1.3/dist/css/bootstrap.min.css" rel="stylesheet">
</head>
<body class="p-3">
<h3>{title}｜量測資料</h3>
<div class="table-responsive" style="max-height: 90vh;">
{table}
</div>
</body></html>
"#,
        table = render_table(table),
    )
}

fn render_table(table: &MeasurementTable) -> String {
    let mut html = String::from("<table border=\"0\" class=\"table\">\n<thead>\n<tr>");
    for column in &table.columns {
        let _ = write!(html, "<th>{}</th>", escape_html(column));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");
    for row in &table.rows {
        html.push_str("<tr>");
        for cell in row {
            let _ = write!(html, "<td>{}</td>", escape_html(cell));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>");
    html
}
