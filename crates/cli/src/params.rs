//! Command-line method parameters.

use serde_json::Value;

/// Parses each argument as JSON, keeping it as a string when it is not valid JSON.
pub fn parse_params_with_json<I, S>(args: I) -> Vec<Value>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    args.into_iter()
        .map(|arg| {
            let arg = arg.as_ref();
            serde_json::from_str(arg).unwrap_or_else(|_| Value::String(arg.to_string()))
        })
        .collect()
}
