//! Browser file saving.
//!
//! Documents arrive as bytes; saving wraps them in a `Blob`, points a
//! temporary `<a download>` at an object URL, clicks it, and revokes the URL
//! shortly after. SSR paths return an error since there is no browser.

#[cfg(test)]
#[path = "download_test.rs"]
mod download_test;

pub const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MARKDOWN_MIME: &str = "text/markdown";
pub const PNG_MIME: &str = "image/png";

#[cfg(feature = "hydrate")]
const REVOKE_DELAY_MS: u32 = 100;

/// MIME type for a download name, by extension.
#[must_use]
pub fn mime_for(filename: &str) -> &'static str {
    let ext = filename.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("docx") => DOCX_MIME,
        Some("md") => MARKDOWN_MIME,
        Some("png") => PNG_MIME,
        _ => "application/octet-stream",
    }
}

/// Wrap `bytes` in a `Blob` of the given type.
///
/// # Errors
///
/// Returns the JS exception text if the browser refuses to build the blob.
#[cfg(feature = "hydrate")]
pub fn blob(bytes: &[u8], mime: &str) -> Result<web_sys::Blob, String> {
    let array = js_sys::Array::new();
    array.push(&js_sys::Uint8Array::from(bytes));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime);
    web_sys::Blob::new_with_u8_array_sequence_and_options(&array, &options).map_err(|e| format!("{e:?}"))
}

/// Offer `bytes` to the user as a file named `filename`.
///
/// # Errors
///
/// Returns an error outside the browser or when the DOM calls fail.
pub fn save(filename: &str, bytes: &[u8]) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast;

        let js_err = |e: wasm_bindgen::JsValue| format!("{e:?}");
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| "no document".to_owned())?;
        let body = document.body().ok_or_else(|| "no document body".to_owned())?;

        let url = web_sys::Url::create_object_url_with_blob(&blob(bytes, mime_for(filename))?).map_err(js_err)?;
        let anchor: web_sys::HtmlAnchorElement = document
            .create_element("a")
            .map_err(js_err)?
            .dyn_into()
            .map_err(|_| "anchor element cast failed".to_owned())?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        body.append_child(&anchor).map_err(js_err)?;
        anchor.click();

        gloo_timers::callback::Timeout::new(REVOKE_DELAY_MS, move || {
            anchor.remove();
            let _ = web_sys::Url::revoke_object_url(&url);
        })
        .forget();
        log::info!("download: saved {filename} ({} bytes)", bytes.len());
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (filename, bytes);
        Err("downloads are only available in the browser".to_owned())
    }
}
