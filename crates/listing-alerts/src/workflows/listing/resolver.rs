use serde_json::Value;

/// One candidate source for a field: a JSON pointer plus the conversion applied to the value found
/// there. A rule yields nothing when the path is missing, `null`, or fails conversion.
pub(crate) struct FieldRule<T: 'static> {
    pointer: &'static str,
    extract: fn(&Value) -> Option<T>,
}

impl<T> FieldRule<T> {
    pub(crate) const fn new(pointer: &'static str, extract: fn(&Value) -> Option<T>) -> Self {
        Self { pointer, extract }
    }

    fn apply(&self, root: &Value) -> Option<T> {
        match root.pointer(self.pointer) {
            None | Some(Value::Null) => None,
            Some(value) => (self.extract)(value),
        }
    }
}

/// Ordered rules for a single field; the first rule producing a value wins.
pub(crate) struct FieldChain<T: 'static> {
    pub(crate) rules: &'static [FieldRule<T>],
}

impl<T> FieldChain<T> {
    pub(crate) fn resolve(&self, root: &Value) -> Option<T> {
        self.rules.iter().find_map(|rule| rule.apply(root))
    }

    pub(crate) fn resolve_or(&self, root: &Value, default: T) -> T {
        self.resolve(root).unwrap_or(default)
    }
}

/// Non-blank text; numbers are rendered so numeric identifiers survive.
pub(crate) fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(raw) => {
            let trimmed = raw.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Finite amount from a number or numeric string, clamped at zero.
pub(crate) fn amount(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => parse_decimal(raw),
        _ => None,
    }?;

    parsed.is_finite().then(|| parsed.max(0.0))
}

/// Dutch notation: `.` groups thousands and `,` marks decimals, so `"300.000"` is three hundred
/// thousand and `"1.250.000,50"` carries cents. A lone comma followed by exactly three digits
/// (`"300,000"`) could be either convention and is rejected.
fn parse_decimal(raw: &str) -> Option<f64> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    let normalized = match compact.split_once(',') {
        Some((whole, fraction)) => {
            if !whole.contains('.') && fraction.len() == 3 {
                return None;
            }
            if whole.contains('.') && !is_grouped_thousands(whole) {
                return None;
            }
            format!("{}.{fraction}", whole.replace('.', ""))
        }
        None if is_grouped_thousands(&compact) => compact.replace('.', ""),
        None => compact,
    };

    normalized.parse::<f64>().ok()
}

fn is_grouped_thousands(raw: &str) -> bool {
    let mut groups = raw.split('.');
    let head = groups.next().unwrap_or_default();
    let rest: Vec<&str> = groups.collect();

    let digits = |group: &str| group.chars().all(|c| c.is_ascii_digit());
    !rest.is_empty()
        && !head.is_empty()
        && head.len() <= 3
        && digits(head)
        && rest.iter().all(|group| group.len() == 3 && digits(group))
}

pub(crate) fn count(value: &Value) -> Option<u32> {
    amount(value).map(|parsed| parsed.floor().min(u32::MAX as f64) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    static PRICE: FieldChain<f64> = FieldChain {
        rules: &[
            FieldRule::new("/financieel/overdracht/koopprijs", amount),
            FieldRule::new("/vraagprijs", amount),
        ],
    };

    #[test]
    fn first_present_rule_wins() {
        let raw = json!({ "financieel": { "overdracht": { "koopprijs": 410000 } }, "vraagprijs": 1 });
        assert_eq!(PRICE.resolve(&raw), Some(410000.0));
    }

    #[test]
    fn null_and_unparseable_values_fall_through() {
        let raw = json!({ "financieel": { "overdracht": { "koopprijs": null } }, "vraagprijs": "295000" });
        assert_eq!(PRICE.resolve(&raw), Some(295000.0));

        let raw = json!({ "financieel": { "overdracht": { "koopprijs": "op aanvraag" } } });
        assert_eq!(PRICE.resolve_or(&raw, 0.0), 0.0);
    }

    #[test]
    fn scalar_containers_do_not_resolve() {
        let raw = json!({ "financieel": "n/a" });
        assert_eq!(PRICE.resolve(&raw), None);
    }

    #[test]
    fn conversions_normalize_upstream_quirks() {
        assert_eq!(amount(&json!("75,5")), Some(75.5));
        assert_eq!(amount(&json!(-12)), Some(0.0));
        assert_eq!(count(&json!(3.7)), Some(3));
        assert_eq!(text(&json!("   ")), None);
        assert_eq!(text(&json!(4021)), Some("4021".to_string()));
        assert_eq!(text(&json!(true)), None);
    }

    #[test]
    fn dutch_thousands_separators_are_not_decimals() {
        assert_eq!(amount(&json!("300.000")), Some(300000.0));
        assert_eq!(amount(&json!("1.250.000")), Some(1250000.0));
        assert_eq!(amount(&json!("1.250.000,50")), Some(1250000.5));
        assert_eq!(amount(&json!("€ 300 000")), None);
        assert_eq!(amount(&json!("300 000")), Some(300000.0));
        assert_eq!(amount(&json!("75.5")), Some(75.5));
        assert_eq!(amount(&json!("0.75")), Some(0.75));
    }

    #[test]
    fn ambiguous_separators_are_rejected() {
        assert_eq!(amount(&json!("300,000")), None);
        assert_eq!(amount(&json!("12.34,5")), None);
        assert_eq!(amount(&json!("1,2,3")), None);
    }
}
