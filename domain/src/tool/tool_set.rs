//! Request-scoped tool declarations.

use crate::core::error::DomainError;
use crate::messages::request::ToolDeclaration;
use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::Serialize;
use std::collections::HashSet;

/// A single tool declared for one request.
///
/// The parameter schema is opaque to the proxy: it is carried to the
/// backend unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDescriptor {
    name: String,
    description: Option<String>,
    schema: serde_json::Value,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>, schema: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            description: None,
            schema,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn schema(&self) -> &serde_json::Value {
        &self.schema
    }
}

/// Ordered collection of [`ToolDescriptor`]s, unique by exact name.
///
/// Serializes as the backend's function-tool array, so the tool list sent
/// downstream is always a direct re-encoding of this value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolSet {
    tools: Vec<ToolDescriptor>,
}

impl ToolSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the tool set for one request from its inbound declarations.
    ///
    /// Duplicate names collapse to the first occurrence, keeping declaration
    /// order. Names are never trimmed, re-cased, or otherwise rewritten.
    ///
    /// # Errors
    ///
    /// [`DomainError::MalformedRequest`] if any declaration has an empty
    /// (or whitespace-only) name.
    pub fn from_declarations(declarations: &[ToolDeclaration]) -> Result<Self, DomainError> {
        let mut set = Self::new();
        for (index, declaration) in declarations.iter().enumerate() {
            if declaration.name.trim().is_empty() {
                return Err(DomainError::malformed(format!(
                    "tools[{}]: tool name must not be empty",
                    index
                )));
            }
            let mut descriptor =
                ToolDescriptor::new(&declaration.name, declaration.input_schema.clone());
            if let Some(description) = &declaration.description {
                descriptor = descriptor.with_description(description);
            }
            set.insert(descriptor);
        }
        Ok(set)
    }

    /// Append a descriptor unless one with the exact same name exists.
    ///
    /// Returns `false` when the descriptor was dropped as a duplicate.
    pub fn insert(&mut self, descriptor: ToolDescriptor) -> bool {
        if self.contains(descriptor.name()) {
            return false;
        }
        self.tools.push(descriptor);
        true
    }

    /// Exact, case-sensitive membership check.
    pub fn contains(&self, name: &str) -> bool {
        self.tools.iter().any(|t| t.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.iter()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Names from `referenced` that are not members of this set.
    ///
    /// Each unknown name is reported once, in first-seen order.
    pub fn unknown_names<'a>(&self, referenced: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let mut seen = HashSet::new();
        referenced
            .into_iter()
            .filter(|name| !self.contains(name))
            .filter(|name| seen.insert(*name))
            .map(str::to_string)
            .collect()
    }
}

struct FunctionTool<'a>(&'a ToolDescriptor);

struct FunctionBody<'a>(&'a ToolDescriptor);

impl Serialize for FunctionTool<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("type", "function")?;
        map.serialize_entry("function", &FunctionBody(self.0))?;
        map.end()
    }
}

impl Serialize for FunctionBody<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let tool = self.0;
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("name", &tool.name)?;
        if let Some(description) = &tool.description {
            map.serialize_entry("description", description)?;
        }
        map.serialize_entry("parameters", &tool.schema)?;
        map.end()
    }
}

impl Serialize for ToolSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.tools.len()))?;
        for tool in &self.tools {
            seq.serialize_element(&FunctionTool(tool))?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn declaration(name: &str) -> ToolDeclaration {
        ToolDeclaration {
            name: name.to_string(),
            description: None,
            input_schema: json!({"type": "object", "properties": {}}),
        }
    }

    fn declarations(names: &[&str]) -> Vec<ToolDeclaration> {
        names.iter().map(|n| declaration(n)).collect()
    }

    #[test]
    fn duplicates_collapse_to_first_occurrence() {
        let set = ToolSet::from_declarations(&declarations(&["Read", "Grep", "Glob", "Read"]))
            .unwrap();
        assert_eq!(set.names(), vec!["Read", "Grep", "Glob"]);
    }

    #[test]
    fn first_occurrence_wins_on_content() {
        let mut first = declaration("Read");
        first.description = Some("first".to_string());
        let mut second = declaration("Read");
        second.description = Some("second".to_string());

        let set = ToolSet::from_declarations(&[first, second]).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.iter().next().unwrap().description(), Some("first"));
    }

    #[test]
    fn casing_variants_are_distinct_tools() {
        let set = ToolSet::from_declarations(&declarations(&["LS", "Ls", "ls"])).unwrap();
        assert_eq!(set.names(), vec!["LS", "Ls", "ls"]);
        assert!(set.contains("LS"));
        assert!(!set.contains("lS"));
    }

    #[test]
    fn empty_name_is_malformed() {
        let err = ToolSet::from_declarations(&declarations(&["Read", ""])).unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("tools[1]"));

        let err = ToolSet::from_declarations(&declarations(&["  "])).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn names_are_not_rewritten() {
        let set = ToolSet::from_declarations(&declarations(&[" Read"])).unwrap();
        assert_eq!(set.names(), vec![" Read"]);
    }

    #[test]
    fn empty_declarations_give_empty_set() {
        let set = ToolSet::from_declarations(&[]).unwrap();
        assert!(set.is_empty());
        assert_eq!(serde_json::to_value(&set).unwrap(), json!([]));
    }

    #[test]
    fn serializes_as_function_tools() {
        let mut read = declaration("Read");
        read.description = Some("Read a file".to_string());
        read.input_schema = json!({
            "type": "object",
            "properties": {"path": {"type": "string"}},
            "required": ["path"]
        });
        let set = ToolSet::from_declarations(&[read, declaration("Bash")]).unwrap();

        let value = serde_json::to_value(&set).unwrap();
        assert_eq!(
            value,
            json!([
                {
                    "type": "function",
                    "function": {
                        "name": "Read",
                        "description": "Read a file",
                        "parameters": {
                            "type": "object",
                            "properties": {"path": {"type": "string"}},
                            "required": ["path"]
                        }
                    }
                },
                {
                    "type": "function",
                    "function": {
                        "name": "Bash",
                        "parameters": {"type": "object", "properties": {}}
                    }
                }
            ])
        );
    }

    #[test]
    fn unknown_names_reports_each_once() {
        let set = ToolSet::from_declarations(&declarations(&["Read", "Grep"])).unwrap();
        let unknown = set.unknown_names(["Read", "LS", "Task", "LS", "Grep"]);
        assert_eq!(unknown, vec!["LS".to_string(), "Task".to_string()]);
    }
}
