//! Palette-to-stylesheet rendering for scaffolded web projects.

use serde_json::Value;
use std::collections::BTreeMap;

/// Parse a palette JSON object (`{"name": "#hex", ...}`) into an ordered map.
///
/// Returns `Err` with a human-readable message when the input is not valid
/// JSON or not a flat object of string values.
pub fn parse_palette(palette_json: &str) -> Result<BTreeMap<String, String>, String> {
    let value: Value =
        serde_json::from_str(palette_json).map_err(|e| format!("invalid palette JSON: {e}"))?;
    let Value::Object(map) = value else {
        return Err("invalid palette JSON: expected an object of color values".to_string());
    };

    let mut palette = BTreeMap::new();
    for (key, value) in map {
        let Value::String(color) = value else {
            return Err(format!("invalid palette JSON: value for \"{key}\" is not a string"));
        };
        palette.insert(key, color);
    }
    Ok(palette)
}

/// Render the base stylesheet for a palette: one custom property per entry
/// plus a minimal reset. `None` renders an empty `:root` block.
pub fn render_stylesheet(palette: Option<&BTreeMap<String, String>>) -> String {
    let mut css = String::from(":root {\n");
    if let Some(palette) = palette {
        for (name, value) in palette {
            css.push_str(&format!("  --{name}: {value};\n"));
        }
    }
    css.push_str("}\n");
    css.push_str("body{margin:0;font-family:ui-sans-serif,system-ui,Segoe UI,Roboto,Arial}\n");
    css
}
