use physprac::loader::{CompanionSwap, VIEW_SCRIPT_ID, VIEW_STYLE_ID};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

/// GET `url` and return the body. Non-2xx responses are errors.
pub(super) async fn fetch_text(url: &str) -> Result<String, String> {
    let window = web_sys::window().ok_or("no window".to_string())?;
    let resp = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| format!("fetch {url}: {}", js_error_message(&e)))?;
    let resp = resp
        .dyn_into::<web_sys::Response>()
        .map_err(|_| "fetch: expected Response".to_string())?;

    if !resp.ok() {
        return Err(format!("{url}: HTTP {} {}", resp.status(), resp.status_text()));
    }

    let promise = resp
        .text()
        .map_err(|_| "response: text() threw".to_string())?;
    let text = JsFuture::from(promise)
        .await
        .map_err(|_| "response: body read failed".to_string())?;
    text.as_string()
        .ok_or("response: body is not text".to_string())
}

/// Apply `swap` to the document's `#view-style` / `#view-script`.
///
/// Returns a promise for the new script's `load` event, if a script was attached.
pub(super) fn attach_companions(swap: &CompanionSwap) -> Result<Option<js_sys::Promise>, String> {
    let window = web_sys::window().ok_or("no window".to_string())?;
    let document = window.document().ok_or("no document".to_string())?;

    if swap.remove_stylesheet {
        remove_by_id(&document, VIEW_STYLE_ID);
    }
    if swap.remove_script {
        remove_by_id(&document, VIEW_SCRIPT_ID);
    }

    if let Some(href) = &swap.stylesheet {
        let head = document.head().ok_or("document: no <head>".to_string())?;
        let link = document
            .create_element("link")
            .map_err(|_| "document: create_element(link) failed".to_string())?
            .dyn_into::<web_sys::HtmlLinkElement>()
            .map_err(|_| "document: link cast failed".to_string())?;
        link.set_id(VIEW_STYLE_ID);
        link.set_rel("stylesheet");
        link.set_href(href);
        head.append_child(&link)
            .map_err(|_| "head: append_child(link) failed".to_string())?;
    }

    let Some(src) = &swap.script else {
        return Ok(None);
    };
    let body = document.body().ok_or("document: no <body>".to_string())?;
    let script = document
        .create_element("script")
        .map_err(|_| "document: create_element(script) failed".to_string())?
        .dyn_into::<web_sys::HtmlScriptElement>()
        .map_err(|_| "document: script cast failed".to_string())?;
    script.set_id(VIEW_SCRIPT_ID);

    let loaded = script_load_promise(&script, src);
    script.set_src(src);
    body.append_child(&script)
        .map_err(|_| "body: append_child(script) failed".to_string())?;
    Ok(Some(loaded))
}

/// Wait for a script attached by [`attach_companions`].
pub(super) async fn script_loaded(loaded: js_sys::Promise) -> Result<(), String> {
    JsFuture::from(loaded)
        .await
        .map(|_| ())
        .map_err(|e| js_error_message(&e))
}

fn remove_by_id(document: &web_sys::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.remove();
    }
}

fn script_load_promise(script: &web_sys::HtmlScriptElement, src: &str) -> js_sys::Promise {
    let src = src.to_string();
    js_sys::Promise::new(&mut |resolve, reject| {
        let onload = Closure::wrap(Box::new(move |_ev: web_sys::Event| {
            let _ = resolve.call0(&JsValue::UNDEFINED);
        }) as Box<dyn FnMut(_)>);
        script.set_onload(Some(onload.as_ref().unchecked_ref()));
        onload.forget();

        let src = src.clone();
        let onerror = Closure::wrap(Box::new(move |_ev: web_sys::Event| {
            let _ = reject.call1(
                &JsValue::UNDEFINED,
                &JsValue::from_str(&format!("script {src} failed to load")),
            );
        }) as Box<dyn FnMut(_)>);
        script.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onerror.forget();
    })
}

pub(super) fn js_error_message(v: &JsValue) -> String {
    if let Some(s) = v.as_string() {
        return s;
    }
    if let Some(err) = v.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{v:?}")
}
