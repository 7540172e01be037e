//! Tests for the coercion rule chain.

#[cfg(test)]
mod tests {
    use crate::coerce::{coerce, coerce_with_rule, Rule};
    use crate::value::{Map, Value};
    use pretty_assertions::assert_eq;

    struct CoerceTestCase {
        raw: &'static str,
        rule: Rule,
        expected: Value,
    }

    fn string(s: &str) -> Value {
        Value::String(s.to_string())
    }

    fn run_cases(cases: Vec<CoerceTestCase>) {
        for tc in cases {
            let (value, rule) = coerce_with_rule(tc.raw);
            assert_eq!(value, tc.expected, "value for {:?}", tc.raw);
            assert_eq!(rule, tc.rule, "rule for {:?}", tc.raw);
        }
    }

    #[test]
    fn test_structured_values() {
        let mut obj = Map::new();
        obj.set("a".into(), Value::Int(1));
        obj.set("b".into(), Value::List(vec![Value::Bool(true), Value::Null]));

        run_cases(vec![
            CoerceTestCase {
                raw: r#"{"a": 1, "b": [true, null]}"#,
                rule: Rule::Structured,
                expected: Value::Map(obj),
            },
            CoerceTestCase {
                raw: "[1, 2.5, \"x\"]",
                rule: Rule::Structured,
                expected: Value::List(vec![Value::Int(1), Value::Float(2.5), string("x")]),
            },
            CoerceTestCase {
                raw: "\"123\"",
                rule: Rule::Structured,
                expected: string("123"),
            },
            CoerceTestCase {
                raw: "true",
                rule: Rule::Structured,
                expected: Value::Bool(true),
            },
            CoerceTestCase {
                raw: "false",
                rule: Rule::Structured,
                expected: Value::Bool(false),
            },
            CoerceTestCase {
                raw: "null",
                rule: Rule::Structured,
                expected: Value::Null,
            },
        ]);
    }

    #[test]
    fn test_structured_keeps_object_order() {
        let value = coerce(r#"{"zeta": 1, "alpha": 2}"#);
        let keys: Vec<&str> = value.as_map().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_booleans_any_case() {
        for raw in ["TRUE", "True", "tRuE"] {
            assert_eq!(coerce_with_rule(raw), (Value::Bool(true), Rule::True), "{}", raw);
        }
        for raw in ["FALSE", "False", "fAlSe"] {
            assert_eq!(coerce_with_rule(raw), (Value::Bool(false), Rule::False), "{}", raw);
        }
        assert_eq!(coerce("true"), Value::Bool(true));
        assert_eq!(coerce("false"), Value::Bool(false));
    }

    #[test]
    fn test_numbers_must_round_trip() {
        run_cases(vec![
            CoerceTestCase { raw: "42", rule: Rule::Integer, expected: Value::Int(42) },
            CoerceTestCase { raw: "-8", rule: Rule::Integer, expected: Value::Int(-8) },
            CoerceTestCase { raw: "0", rule: Rule::Integer, expected: Value::Int(0) },
            CoerceTestCase { raw: "3.5", rule: Rule::Float, expected: Value::Float(3.5) },
            CoerceTestCase { raw: "1.0", rule: Rule::Float, expected: Value::Float(1.0) },
            CoerceTestCase { raw: "-0.75", rule: Rule::Float, expected: Value::Float(-0.75) },
            CoerceTestCase { raw: "007", rule: Rule::Text, expected: string("007") },
            CoerceTestCase { raw: "3.50", rule: Rule::Text, expected: string("3.50") },
            CoerceTestCase { raw: "+5", rule: Rule::Text, expected: string("+5") },
            CoerceTestCase { raw: "1e3", rule: Rule::Text, expected: string("1e3") },
            CoerceTestCase { raw: " 5", rule: Rule::Text, expected: string(" 5") },
            CoerceTestCase { raw: "5 ", rule: Rule::Text, expected: string("5 ") },
            CoerceTestCase { raw: "NaN", rule: Rule::Text, expected: string("NaN") },
            CoerceTestCase {
                raw: "85070591730234615865843651857942052864",
                rule: Rule::Integer,
                expected: Value::BigInt("85070591730234615865843651857942052864".into()),
            },
            CoerceTestCase {
                raw: "099999999999999999999",
                rule: Rule::Text,
                expected: string("099999999999999999999"),
            },
        ]);
    }

    #[test]
    fn test_plain_strings() {
        run_cases(vec![
            CoerceTestCase {
                raw: "org.apache.cassandra.dht.Murmur3Partitioner",
                rule: Rule::Text,
                expected: string("org.apache.cassandra.dht.Murmur3Partitioner"),
            },
            CoerceTestCase { raw: "", rule: Rule::Text, expected: string("") },
            CoerceTestCase { raw: "yes", rule: Rule::Text, expected: string("yes") },
            CoerceTestCase { raw: "{not json", rule: Rule::Text, expected: string("{not json") },
            CoerceTestCase { raw: "truee", rule: Rule::Text, expected: string("truee") },
        ]);
    }

    #[test]
    fn test_coerce_is_pure() {
        for raw in ["42", "3.50", "TRUE", "[1]", "plain", "{\"k\": \"v\"}"] {
            assert_eq!(coerce(raw), coerce(raw), "{}", raw);
        }
    }
}
