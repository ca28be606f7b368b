//! Safe navigation over loosely-typed resource trees.
//!
//! Every accessor returns `None` (or an empty [`Field`]) when a step is missing
//! or has the wrong shape, so callers never assume structure.

use serde_json::{Map as JsonMap, Value};

#[derive(Debug, Clone, Copy)]
enum Node<'a> {
    Object(&'a JsonMap<String, Value>),
    Value(&'a Value),
}

/// A cursor into a JSON tree that may point at nothing.
#[derive(Debug, Clone, Copy)]
pub struct Field<'a>(Option<Node<'a>>);

impl<'a> Field<'a> {
    pub fn of(value: &'a Value) -> Self {
        Field(Some(Node::Value(value)))
    }

    pub fn of_object(object: &'a JsonMap<String, Value>) -> Self {
        Field(Some(Node::Object(object)))
    }

    /// Step into `key`; empty unless the current node is an object holding it.
    pub fn get(self, key: &str) -> Self {
        Field(self.as_object().and_then(|object| object.get(key)).map(Node::Value))
    }

    /// Step through a sequence of object keys.
    pub fn path(self, keys: &[&str]) -> Self {
        keys.iter().fold(self, |field, key| field.get(key))
    }

    /// First element of a sequence; empty if not a sequence or the sequence is empty.
    pub fn first(self) -> Self {
        Field(self.as_array().and_then(<[Value]>::first).map(Node::Value))
    }

    pub fn exists(self) -> bool {
        self.0.is_some()
    }

    pub fn as_object(self) -> Option<&'a JsonMap<String, Value>> {
        match self.0? {
            Node::Object(object) => Some(object),
            Node::Value(value) => value.as_object(),
        }
    }

    pub fn as_array(self) -> Option<&'a [Value]> {
        match self.0? {
            Node::Object(_) => None,
            Node::Value(value) => value.as_array().map(Vec::as_slice),
        }
    }

    /// Elements of a sequence; empty when absent or not a sequence.
    pub fn items(self) -> impl Iterator<Item = Field<'a>> {
        self.as_array().unwrap_or_default().iter().map(Field::of)
    }

    pub fn as_str(self) -> Option<&'a str> {
        match self.0? {
            Node::Object(_) => None,
            Node::Value(value) => value.as_str(),
        }
    }

    /// Any finite number, truncated toward zero (`2.5` reads as `2`).
    pub fn as_i64(self) -> Option<i64> {
        let Node::Value(value) = self.0? else {
            return None;
        };
        value
            .as_i64()
            .or_else(|| value.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::Field;
    use serde_json::json;

    #[test]
    fn missing_or_mistyped_steps_yield_none() {
        let value = json!({"spec": {"template": "oops", "replicas": "3"}});
        let root = Field::of(&value);
        assert!(root.path(&["spec", "template", "spec"]).as_object().is_none());
        assert_eq!(root.path(&["spec", "replicas"]).as_i64(), None);
        assert_eq!(root.path(&["nope", "deeper"]).as_str(), None);
        assert!(!root.get("missing").exists());
    }

    #[test]
    fn first_and_items_walk_sequences() {
        let value = json!({"containers": [{"image": "nginx"}, {"image": "sidecar"}]});
        let root = Field::of(&value);
        assert_eq!(root.get("containers").first().get("image").as_str(), Some("nginx"));
        assert_eq!(root.get("containers").items().count(), 2);
        assert_eq!(root.get("image").items().count(), 0);
        assert!(!Field::of(&json!([])).first().exists());
    }

    #[test]
    fn fractional_numbers_truncate() {
        let value = json!({"a": 3.0, "b": 2.5, "c": 7, "d": -1.9, "e": "4"});
        let root = Field::of(&value);
        assert_eq!(root.get("a").as_i64(), Some(3));
        assert_eq!(root.get("b").as_i64(), Some(2));
        assert_eq!(root.get("c").as_i64(), Some(7));
        assert_eq!(root.get("d").as_i64(), Some(-1));
        assert_eq!(root.get("e").as_i64(), None);
    }

    #[test]
    fn object_roots_navigate_like_values() {
        let value = json!({"name": "web"});
        let object = value.as_object().expect("object");
        assert_eq!(Field::of_object(object).get("name").as_str(), Some("web"));
        assert_eq!(Field::of_object(object).as_str(), None);
    }
}
