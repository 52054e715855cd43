use serde_json::{Map, Value};

/// The accumulating key-value result of a run. Keys are added or
/// overwritten as abilities complete, never removed; iteration order is
/// insertion order. Owned and mutated exclusively by the execution
/// engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateStore {
    values: Map<String, Value>,
}

impl StateStore {
    /// Seeds a fresh state from the caller input, then pre-fills `Null`
    /// for every declared schema key the input did not supply. Input keys
    /// keep their positions; schema defaults append after them.
    pub fn seeded(input: &Map<String, Value>, input_schema: &[String]) -> Self {
        let mut values = input.clone();
        for key in input_schema {
            if !values.contains_key(key) {
                values.insert(key.clone(), Value::Null);
            }
        }
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        let _ = self.values.insert(key.into(), value);
    }

    /// Shallow-merges a mapping result into the state root, overwriting on
    /// key collision. Non-mapping results leave the state unchanged.
    pub fn merge_root(&mut self, result: &Value) {
        if let Value::Object(entries) = result {
            for (key, value) in entries {
                let _ = self.values.insert(key.clone(), value.clone());
            }
        }
    }

    /// Shallow-merges a mapping result into the nested mapping at `key`,
    /// creating it when absent. A non-mapping result replaces the child
    /// value outright.
    pub fn merge_child(&mut self, key: &str, result: Value) {
        let Value::Object(entries) = result else {
            self.set(key, result);
            return;
        };
        let child = self
            .values
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !child.is_object() {
            *child = Value::Object(Map::new());
        }
        if let Value::Object(existing) = child {
            for (entry_key, value) in entries {
                let _ = existing.insert(entry_key, value);
            }
        }
    }

    /// Sets `namespace[name] = value`, creating the namespace mapping when
    /// absent.
    pub fn set_namespaced(&mut self, namespace: &str, name: &str, value: Value) {
        let child = self
            .values
            .entry(namespace.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !child.is_object() {
            *child = Value::Object(Map::new());
        }
        if let Value::Object(existing) = child {
            let _ = existing.insert(name.to_string(), value);
        }
    }

    /// Projects the current state as an ability request payload: a copy of
    /// every entry, with a `query` key guaranteed present in first
    /// position (`Null` when the state has none).
    pub fn payload_with_query(&self) -> Value {
        let mut payload = Map::new();
        let _ = payload.insert(
            "query".to_string(),
            self.values.get("query").cloned().unwrap_or(Value::Null),
        );
        for (key, value) in &self.values {
            let _ = payload.insert(key.clone(), value.clone());
        }
        Value::Object(payload)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.values.clone())
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.values)
    }
}
