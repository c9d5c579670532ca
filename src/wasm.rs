//! Browser bindings.

use wasm_bindgen::prelude::*;

/// Routes `log` output to the browser console and installs the panic hook.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // A second call keeps the logger that is already installed.
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Converts markup into a JSON array of draw commands.
///
/// `config_json` is an optional, possibly partial, deck configuration.
#[wasm_bindgen(js_name = htmlToDrawCommands)]
pub fn html_to_draw_commands(html: &str, config_json: Option<String>) -> Result<String, JsValue> {
    crate::render_html_to_json(html, config_json.as_deref())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
