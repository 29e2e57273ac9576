//! 回饋功能腳本
//!
//! 依原樣注入一次，不隨標記數量或內容改變。
//! 它透過 `meta_<slug>` 隱藏元素的 data-* 屬性取得園區識別資訊，
//! 以 no-cors 模式送出後即樂觀回報成功，不解析伺服器回應

/// 注入首頁地圖的回饋腳本（Google Apps Script 端點）
pub const FEEDBACK_JS: &str = r#"
    <script>
    const GAS_URL = "https://script.google.com/macros/s/AKfycby5yDZnSrExZyGm3xZzgpFwZbS-877qCAVUsn8BPe9-BuY0ZkzvAC_r04p39GXv9rUs_A/exec";
    async function sendFeedback(pid){
        const meta = document.getElementById("meta_"+pid);
        const txt = document.getElementById("fb_"+pid).value;
        const msg = document.getElementById("msg_"+pid);
        if(!txt) return alert("請輸入內容");

        msg.innerText = "傳送中...";
        const form = new URLSearchParams();
        form.append("timestamp", new Date().toISOString());
        form.append("park", meta.dataset.park);
        form.append("lat", meta.dataset.lat);
        form.append("lon", meta.dataset.lon);
        form.append("feedback", txt);
        form.append("page_url", location.href);

        try {
            await fetch(GAS_URL, {method:"POST", mode:"no-cors", body:form});
            msg.innerText = "✅ 已送出";
            msg.style.color = "green";
            document.getElementById("fb_"+pid).value = "";
        } catch(e) {
            msg.innerText = "❌ 失敗";
            msg.style.color = "red";
        }
    }
    </script>
    "#;
