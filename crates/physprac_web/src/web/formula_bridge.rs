//! Bindings to the problem-solving view's companion script.
//!
//! `views/problem-solving/script.js` exposes a `physpracFormula` global that
//! wraps the math auto-renderer and the formula-editor widget. It is only
//! present after the loader has awaited that script, so every entry point is
//! `catch` and a missing global surfaces as an `Err`.

use physprac::error::TypesetError;
use physprac::typeset::{typeset_result, TypesetOptions};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::fragment::js_error_message;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = physpracFormula, js_name = typeset)]
    fn bridge_typeset(el: &web_sys::Element, options_json: &str) -> Result<js_sys::Array, JsValue>;

    #[wasm_bindgen(catch, js_namespace = physpracFormula, js_name = createField)]
    fn bridge_create_field(
        container: &web_sys::Element,
        options_json: &str,
        on_edit: &js_sys::Function,
        on_enter: &js_sys::Function,
    ) -> Result<MathField, JsValue>;

    /// A formula-editor widget instance.
    type MathField;

    #[wasm_bindgen(method)]
    fn latex(this: &MathField) -> String;

    #[wasm_bindgen(method)]
    fn cmd(this: &MathField, command: &str) -> MathField;

    #[wasm_bindgen(method)]
    fn focus(this: &MathField) -> MathField;

    #[wasm_bindgen(method, catch)]
    fn revert(this: &MathField) -> Result<JsValue, JsValue>;
}

/// Typeset every math span under `el`.
///
/// The renderer never throws for bad input; it reports each failing span
/// through its error hook and leaves the source text in place.
pub(super) fn typeset(el: &web_sys::Element, options: &TypesetOptions) -> Result<(), TypesetError> {
    match bridge_typeset(el, &options.to_json()) {
        Ok(errors) => typeset_result(errors.iter().map(|v| js_error_message(&v)).collect()),
        Err(e) => Err(TypesetError {
            messages: vec![js_error_message(&e)],
        }),
    }
}

/// A live widget plus the handlers it calls back into.
///
/// Dropping it reverts the widget, then releases the handlers.
pub(super) struct FieldWidget {
    field: MathField,
    _on_edit: Closure<dyn FnMut(String)>,
    _on_enter: Closure<dyn FnMut()>,
}

impl FieldWidget {
    pub(super) fn create(
        container: &web_sys::Element,
        options_json: &str,
        on_edit: impl Fn(String) + 'static,
        on_enter: impl Fn() + 'static,
    ) -> Result<Self, String> {
        let on_edit = Closure::wrap(Box::new(on_edit) as Box<dyn FnMut(String)>);
        let on_enter = Closure::wrap(Box::new(on_enter) as Box<dyn FnMut()>);
        let field = bridge_create_field(
            container,
            options_json,
            on_edit.as_ref().unchecked_ref(),
            on_enter.as_ref().unchecked_ref(),
        )
        .map_err(|e| format!("formula widget: {}", js_error_message(&e)))?;

        Ok(Self {
            field,
            _on_edit: on_edit,
            _on_enter: on_enter,
        })
    }

    pub(super) fn latex(&self) -> String {
        self.field.latex()
    }

    /// Insert a command at the cursor and keep the caret in the field.
    pub(super) fn insert(&self, command: &str) {
        self.field.cmd(command).focus();
    }

    pub(super) fn focus(&self) {
        self.field.focus();
    }
}

impl Drop for FieldWidget {
    fn drop(&mut self) {
        let _ = self.field.revert();
    }
}
