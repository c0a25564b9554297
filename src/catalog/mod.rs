pub mod aliases;
mod registry;

use serde::Serialize;
use serde_json::{json, Map, Value};

/// One entry of the tool registry: a named GHL operation plus the parameter
/// names it requires and accepts. The catalog declares names only; parameter
/// values stay untyped JSON.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub required_params: Vec<String>,
    pub optional_params: Vec<String>,
}

impl ToolDefinition {
    /// Mechanical JSON schema for the tool's input: every declared parameter
    /// becomes a property (string-typed unless the name is one of the known
    /// array/object-valued parameters), required parameters become the
    /// `required` list.
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        for param in self.required_params.iter().chain(&self.optional_params) {
            properties.insert(param.clone(), param_schema(param));
        }
        json!({
            "type": "object",
            "properties": properties,
            "required": self.required_params,
        })
    }
}

fn param_schema(name: &str) -> Value {
    match name {
        "tags" => json!({ "type": "array", "items": { "type": "string" } }),
        "customFields" => json!({ "type": "object" }),
        _ => json!({ "type": "string" }),
    }
}

/// The registry of tools the bridge fronts. Loaded once at startup and never
/// mutated; iteration order is the declaration order of the builtin table.
#[derive(Debug, Clone)]
pub struct Catalog {
    tools: Vec<ToolDefinition>,
}

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            tools: registry::definitions(),
        }
    }

    /// Look up a tool by its canonical name.
    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All registered tool names, in registry order.
    pub fn names(&self) -> Vec<String> {
        self.tools.iter().map(|tool| tool.name.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.iter()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let catalog = Catalog::builtin();
        let unique: HashSet<_> = catalog.iter().map(|tool| tool.name.as_str()).collect();
        assert_eq!(unique.len(), catalog.len());
    }

    #[test]
    fn required_and_optional_params_are_disjoint() {
        for tool in Catalog::builtin().iter() {
            let required: HashSet<_> = tool.required_params.iter().collect();
            for param in &tool.optional_params {
                assert!(
                    !required.contains(param),
                    "{} declares {} as both required and optional",
                    tool.name,
                    param
                );
            }
        }
    }

    #[test]
    fn lookup_finds_registered_tools_only() {
        let catalog = Catalog::builtin();
        assert!(catalog.contains("contacts_get-contact"));
        assert!(catalog.contains("locations_get-location"));
        assert!(!catalog.contains("contacts"));
        assert!(!catalog.contains("contacts_delete-everything"));
    }

    #[test]
    fn enumeration_is_stable() {
        let first = Catalog::builtin().names();
        let second = Catalog::builtin().names();
        assert_eq!(first, second);
    }

    #[test]
    fn input_schema_types_known_parameters() {
        let catalog = Catalog::builtin();
        let schema = catalog.get("contacts_update-contact").unwrap().input_schema();

        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["firstName"]["type"], "string");
        assert_eq!(schema["properties"]["tags"]["type"], "array");
        assert_eq!(schema["properties"]["tags"]["items"]["type"], "string");
        assert_eq!(schema["properties"]["customFields"]["type"], "object");
        assert_eq!(schema["required"], json!(["contactId"]));
    }

    #[test]
    fn input_schema_covers_required_and_optional_params() {
        let catalog = Catalog::builtin();
        let tool = catalog.get("conversations_get-messages").unwrap();
        let schema = tool.input_schema();
        let properties = schema["properties"].as_object().unwrap();

        for param in tool.required_params.iter().chain(&tool.optional_params) {
            assert!(properties.contains_key(param), "schema misses {}", param);
        }
        assert_eq!(schema["required"], json!(["conversationId"]));
    }
}
