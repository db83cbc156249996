use serde_json::Value;

/// Key answer of each engine, as JSON pointers into the result object, in
/// order of priority.
const PRIORITY_POINTERS: [&str; 10] = [
    "/total_tax",
    "/standard_deduction",
    "/summary/user/after_tax_income",
    "/total_recommended_monthly",
    "/total_monthly_savings",
    "/monthly_savings",
    "/total_monthly_cost",
    "/summary/future_ending_balance",
    "/user_after_tax_income",
    "/payment",
];

/// Print just the key answer value from the output.
///
/// Looks up well-known result fields in order of priority, then falls
/// back to the first field in the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    for pointer in PRIORITY_POINTERS {
        if let Some(val) = result_obj.pointer(pointer) {
            if !val.is_null() {
                println!("{}", format_minimal(val));
                return;
            }
        }
    }

    if let Value::Object(map) = result_obj {
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
