//! Boolean vocabulary of server variables.

const TRUTHY: &[&str] = &["1", "on", "true", "yes"];
const FALSY: &[&str] = &["0", "off", "false", "no"];

/// Whether a value reads as true (`1`, `ON`, `true`, `yes`; any case).
pub fn is_true(value: &str) -> bool {
    TRUTHY.iter().any(|t| value.eq_ignore_ascii_case(t))
}

/// Whether a value reads as false (`0`, `OFF`, `false`, `no`; any case).
pub fn is_false(value: &str) -> bool {
    FALSY.iter().any(|f| value.eq_ignore_ascii_case(f))
}

/// Whether two values read as the same boolean.
pub fn same_truthiness(a: &str, b: &str) -> bool {
    (is_true(a) && is_true(b)) || (is_false(a) && is_false(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthy_values() {
        for v in ["1", "ON", "on", "True", "YES"] {
            assert!(is_true(v), "{}", v);
            assert!(!is_false(v), "{}", v);
        }
    }

    #[test]
    fn falsy_values() {
        for v in ["0", "OFF", "false", "No"] {
            assert!(is_false(v), "{}", v);
            assert!(!is_true(v), "{}", v);
        }
    }

    #[test]
    fn other_values_are_neither() {
        for v in ["", "2", "enabled", "ONN"] {
            assert!(!is_true(v) && !is_false(v), "{}", v);
        }
    }

    #[test]
    fn same_truthiness_is_symmetric() {
        assert!(same_truthiness("ON", "true"));
        assert!(same_truthiness("true", "ON"));
        assert!(same_truthiness("1", "yes"));
        assert!(same_truthiness("off", "0"));
        assert!(!same_truthiness("on", "off"));
        assert!(!same_truthiness("", ""));
    }
}
