//! Line-pattern extraction of variable dumps.
//!
//! Accepts the common shapes a server's variables come in:
//!
//! ```text
//! | back_log            | 80    |      (mysql client table)
//! back_log	80                         (mysql -B / mysqladmin)
//! back_log,80                            (CSV export)
//! ```
//!
//! Lines that do not start with a lowercase identifier (headers, borders,
//! blank lines) are ignored.

use std::sync::LazyLock;

use regex::Regex;

use super::ObservedVariables;

/// One variable per line: optional table border, name, separators, value.
static LINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(\| )?([a-z0-9_]+)[, \t|]+(.*?)$").unwrap());

/// Trailing table border left after the value.
static TRAILING_BORDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\t ]+\|$").unwrap());

/// Parse raw dump text into observed variables.
///
/// When a name appears more than once the last value wins.
///
/// # Example
///
/// ```
/// use defcheck::input::parse_variables;
///
/// let vars = parse_variables("| back_log | 80 |\n| max_connections | 151 |\n");
/// assert_eq!(vars.get("back_log"), Some("80"));
/// assert_eq!(vars.get("max_connections"), Some("151"));
/// ```
pub fn parse_variables(text: &str) -> ObservedVariables {
    let mut variables = ObservedVariables::new();

    for caps in LINE_REGEX.captures_iter(text) {
        let name = &caps[2];
        let raw = caps.get(3).map(|m| m.as_str()).unwrap_or_default();
        let value = TRAILING_BORDER_REGEX.replace(raw.trim(), "");
        variables.insert(name, value.into_owned());
    }

    tracing::debug!("Parsed {} variables from input", variables.len());
    variables
}
