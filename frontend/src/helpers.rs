//! Shared browser-side utilities: toast notifications, confirm dialogs,
//! timestamps, and the blob-to-download handoff for generated PDFs.

use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

/// Displays a temporary notification message at the bottom of the screen.
/// Non-blocking feedback used by every workflow; the toast removes itself
/// after a few seconds.
pub fn show_toast(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            if let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) {
                toast.set_text_content(Some(message));
                let html_toast: HtmlElement = toast.unchecked_into();
                let style = html_toast.style();
                style.set_property("position", "fixed").ok();
                style.set_property("bottom", "20px").ok();
                style.set_property("left", "50%").ok();
                style.set_property("transform", "translateX(-50%)").ok();
                style.set_property("background", "rgba(0, 0, 0, 0.8)").ok();
                style.set_property("color", "#fff").ok();
                style.set_property("padding", "10px 20px").ok();
                style.set_property("border-radius", "4px").ok();
                style.set_property("z-index", "10000").ok();
                style.set_property("font-family", "Arial, sans-serif").ok();

                if body.append_child(&html_toast).is_ok() {
                    wasm_bindgen_futures::spawn_local(async move {
                        gloo_timers::future::TimeoutFuture::new(3000).await;
                        if let Some(parent) = html_toast.parent_node() {
                            parent.remove_child(&html_toast).ok();
                        }
                    });
                }
            }
        }
    }
}

/// Blocking yes/no dialog. A missing window (tests, detached workers)
/// answers no.
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Current time as an ISO-8601 string, e.g. `2026-08-23T10:00:00.000Z`.
pub fn now_iso() -> String {
    js_sys::Date::new_0().to_iso_string().into()
}

/// Current date (`YYYY-MM-DD`), used to prefill date controls.
pub fn today() -> String {
    now_iso().chars().take(10).collect()
}

/// Milliseconds since the epoch, used for download filename suffixes.
pub fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

/// The `?template=<id>` query parameter of the current page, if present.
pub fn template_id_from_url() -> Option<String> {
    let search: String = web_sys::window()?.location().search().ok()?;
    let query = search.strip_prefix('?')?;
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == "template" && !value.is_empty()).then(|| value.to_string())
    })
}

/// Offers a binary payload to the user as a PDF download by clicking a
/// temporary object-URL anchor.
pub fn download_pdf(bytes: &[u8], filename: &str) {
    let blob = gloo_file::Blob::new_with_options(bytes, Some("application/pdf"));
    let Ok(url) = web_sys::Url::create_object_url_with_blob(blob.as_ref()) else {
        show_toast("Could not prepare the PDF download");
        return;
    };

    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        if let (Ok(element), Some(body)) = (document.create_element("a"), document.body()) {
            if let Ok(anchor) = element.dyn_into::<web_sys::HtmlAnchorElement>() {
                anchor.set_href(&url);
                anchor.set_download(filename);
                if body.append_child(&anchor).is_ok() {
                    anchor.click();
                    body.remove_child(&anchor).ok();
                }
            }
        }
    }
    web_sys::Url::revoke_object_url(&url).ok();
}
