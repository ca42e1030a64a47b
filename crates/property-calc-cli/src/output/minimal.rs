use serde_json::Value;

use super::plain;

/// The headline figure of each calculator, most specific first.
const HEADLINE_KEYS: [&str; 4] = ["total_property_value", "principal", "installment", "converted"];

/// Print just the headline value, for shell scripts.
pub fn print_minimal(value: &Value) {
    println!("{}", headline(value));
}

fn headline(value: &Value) -> String {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result {
        if let Some(val) = HEADLINE_KEYS
            .iter()
            .filter_map(|key| map.get(*key))
            .find(|val| !val.is_null())
        {
            return plain(val);
        }
        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, plain(val));
        }
    }

    plain(result)
}
