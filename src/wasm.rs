//! WASM bindings for Netspice Core.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { circuitJsonToSpice } from 'netspice_core';
//!
//! await init();
//!
//! const netlist = circuitJsonToSpice(JSON.stringify(circuitJson));
//! ```

use wasm_bindgen::prelude::*;

use crate::convert::{circuit_json_to_spice_with_options, ConversionOptions};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Convert a circuit JSON string into SPICE netlist text.
///
/// Errors are thrown as strings.
#[wasm_bindgen(js_name = circuitJsonToSpice)]
pub fn circuit_json_to_spice(circuit_json: &str) -> Result<String, JsValue> {
    convert(circuit_json, ConversionOptions::new())
}

/// Like `circuitJsonToSpice`, with a custom title line.
#[wasm_bindgen(js_name = circuitJsonToSpiceWithTitle)]
pub fn circuit_json_to_spice_with_title(
    circuit_json: &str,
    title: &str,
) -> Result<String, JsValue> {
    convert(circuit_json, ConversionOptions::new().with_title(title))
}

fn convert(circuit_json: &str, options: ConversionOptions) -> Result<String, JsValue> {
    circuit_json_to_spice_with_options(circuit_json, &options)
        .map(|netlist| netlist.to_spice_string())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
