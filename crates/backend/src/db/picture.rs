use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// A picture record: any JSON object, identified by its `id` field.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct Picture(Map<String, Value>);

impl Picture {
    /// Raw `id` value, `None` when the field is absent.
    pub fn id(&self) -> Option<&Value> {
        self.0.get("id")
    }

    /// Numeric match against a path id; `3` and `3.0` both match `3`.
    pub fn has_id(&self, id: i64) -> bool {
        match self.id() {
            Some(Value::Number(n)) => {
                n.as_i64() == Some(id) || (n.is_f64() && n.as_f64() == Some(id as f64))
            }
            _ => false,
        }
    }

    /// Duplicate check between two records. Numbers compare by value (`1` equals `1.0`),
    /// anything else by raw equality, so two pictures without an `id` also match.
    pub fn same_id(&self, other: &Picture) -> bool {
        match (self.id(), other.id()) {
            (Some(Value::Number(a)), Some(Value::Number(b))) => numbers_equal(a, b),
            (a, b) => a == b,
        }
    }

    /// Shallow merge: keys in `patch` overwrite, all others are kept.
    pub fn merge(&mut self, patch: Map<String, Value>) {
        self.0.extend(patch);
    }
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    a.as_f64() == b.as_f64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn picture(v: Value) -> Picture {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn matches_integer_and_integral_float_ids() {
        assert!(picture(json!({"id": 3})).has_id(3));
        assert!(picture(json!({"id": 3.0})).has_id(3));
        assert!(!picture(json!({"id": 3.5})).has_id(3));
        assert!(!picture(json!({"id": "3"})).has_id(3));
        assert!(!picture(json!({"url": "a.jpg"})).has_id(3));
    }

    #[test]
    fn same_id_compares_numbers_by_value() {
        let one = picture(json!({"id": 1}));
        assert!(one.same_id(&picture(json!({"id": 1.0}))));
        assert!(!one.same_id(&picture(json!({"id": 1.5}))));
        assert!(!one.same_id(&picture(json!({"id": "1"}))));
        assert!(!one.same_id(&picture(json!({"url": "a.jpg"}))));
        assert!(picture(json!({"id": "x"})).same_id(&picture(json!({"id": "x"}))));
        assert!(picture(json!({"url": "a.jpg"})).same_id(&picture(json!({"url": "b.jpg"}))));
    }

    #[test]
    fn merge_overwrites_and_keeps_untouched_fields() {
        let mut pic = picture(json!({"id": 5, "title": "old", "url": "e.jpg"}));
        let Value::Object(patch) = json!({"title": "new", "width": 800}) else {
            unreachable!()
        };
        pic.merge(patch);
        assert_eq!(
            serde_json::to_value(&pic).unwrap(),
            json!({"id": 5, "title": "new", "url": "e.jpg", "width": 800})
        );
    }

    #[test]
    fn rejects_non_object_documents() {
        assert!(serde_json::from_value::<Picture>(json!([1, 2])).is_err());
        assert!(serde_json::from_value::<Picture>(json!("a.jpg")).is_err());
    }
}
