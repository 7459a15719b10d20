use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(&serde_json::to_value(value)?)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Objects become `key: value` lines (nested objects indented), arrays of
/// objects become blank-line separated blocks.
fn render_text(value: &Value) -> String {
    let mut out = String::new();
    write_text(value, 0, &mut out);
    out.trim_end().to_string()
}

fn write_text(value: &Value, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    match value {
        Value::Object(map) => {
            for (key, value) in map {
                match value {
                    Value::Object(_) => {
                        out.push_str(&format!("{indent}{key}:\n"));
                        write_text(value, depth + 1, out);
                    }
                    Value::Array(items) if items.iter().any(Value::is_object) => {
                        out.push_str(&format!("{indent}{key}:\n"));
                        write_text(value, depth + 1, out);
                    }
                    _ => out.push_str(&format!("{indent}{key}: {}\n", scalar_cell(value))),
                }
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 && item.is_object() {
                    out.push('\n');
                }
                match item {
                    Value::Object(_) => write_text(item, depth, out),
                    _ => out.push_str(&format!("{indent}- {}\n", scalar_cell(item))),
                }
            }
        }
        scalar => {
            out.push_str(&indent);
            out.push_str(&scalar_cell(scalar));
            out.push('\n');
        }
    }
}

fn scalar_cell(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(text) => text.clone(),
        Value::Array(items) if items.is_empty() => "(none)".to_string(),
        Value::Array(items) => items.iter().map(scalar_cell).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn json_and_raw_formats() {
        let value = json!({"platform": "bluesky", "checked": 2});
        let pretty = render(&value, OutputFormat::Json).unwrap();
        assert!(pretty.contains('\n'));
        let raw = render(&value, OutputFormat::Raw).unwrap();
        assert!(!raw.contains('\n'));
    }

    #[test]
    fn text_format_renders_nested_values() {
        let value = json!({
            "store": "datosfinales.xlsx",
            "unknown": ["Zeta", "Alfa"],
            "empty": [],
            "files": [
                {"file": "age.json", "records": 3},
                {"file": "total.json", "records": null}
            ]
        });
        let text = render(&value, OutputFormat::Text).unwrap();
        assert_eq!(
            text,
            "empty: (none)\n\
             files:\n  \
             file: age.json\n  \
             records: 3\n\
             \n  \
             file: total.json\n  \
             records: -\n\
             store: datosfinales.xlsx\n\
             unknown: Zeta, Alfa"
        );
    }
}
