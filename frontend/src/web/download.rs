//! 浏览器文件下载与整页跳转封装
//!
//! 发票下载走 Blob + ObjectURL + 隐藏锚点的标准流程；
//! 托管收银台跳转直接改写 location，离开 SPA。

use wasm_bindgen::JsCast;

/// 把服务端返回的字节流保存为本地文件
pub fn save_bytes(bytes: &[u8], mime: &str, filename: &str) -> Result<(), String> {
    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime);

    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|_| "Failed to build download blob".to_string())?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|_| "Failed to create object URL".to_string())?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "Document unavailable".to_string())?;
    let anchor = document
        .create_element("a")
        .map_err(|_| "Failed to create anchor".to_string())?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| "Failed to create anchor".to_string())?;

    anchor.set_href(&url);
    anchor.set_download(filename);

    // 锚点必须挂到文档上，部分浏览器才会响应 click
    if let Some(body) = document.body() {
        let _ = body.append_child(&anchor);
        anchor.click();
        let _ = body.remove_child(&anchor);
    } else {
        anchor.click();
    }

    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}

/// 整页跳转到外部地址（支付收银台）
pub fn redirect_external(url: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(url);
    }
}
