pub mod area;
pub mod eligibility;
pub mod emi;

use serde_json::Value;

/// Drop bulky arrays from the `result` object for summary views.
pub(crate) fn strip_result_keys(value: &mut Value, keys: &[&str]) {
    if let Some(Value::Object(result)) = value.get_mut("result") {
        for key in keys {
            result.remove(*key);
        }
    }
}
