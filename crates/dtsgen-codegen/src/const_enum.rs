//! Emitter for key/value objects used as enums of string constants.

/// Render an object literal with one `key: "value"` entry per pair, in the
/// order given.
///
/// Values are emitted as quoted string literals; keys are emitted verbatim.
///
/// ```
/// let code = dtsgen_codegen::const_enum_of([("Home", "/"), ("Cart", "/cart")]);
/// assert_eq!(code, "{\n\tHome: \"/\",\n\tCart: \"/cart\",\n}\n");
/// ```
pub fn const_enum_of<K, V>(values: impl IntoIterator<Item = (K, V)>) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut output = String::from("{\n");
    for (key, value) in values {
        let literal = serde_json::Value::String(value.as_ref().to_string());
        output.push_str(&format!("\t{}: {literal},\n", key.as_ref()));
    }
    output.push_str("}\n");
    output
}
