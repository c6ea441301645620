//! Explicit operation registry.
//!
//! # Responsibility
//! - Map tool names, resource addresses and prompt names to handlers.
//! - Decode JSON arguments into typed calls on [`NotesServer`].
//! - Describe every registered operation for discovery.
//!
//! # Invariants
//! - The registry is built once and is read-only afterwards.
//! - Fixed resource addresses win over templated ones.
//! - Missing or mistyped required arguments fail with `Validation`.

use super::{NotesServer, OperationError, OperationResult};
use log::warn;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

/// JSON object carrying named call arguments.
pub type Arguments = Map<String, Value>;

type ToolHandler = fn(&NotesServer, &Arguments) -> OperationResult<Value>;
type ResourceHandler = fn(&NotesServer, Option<&str>) -> OperationResult<Value>;
type PromptHandler = fn(&NotesServer, &Arguments) -> OperationResult<String>;

/// One named parameter of a tool or prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,
}

/// Discovery entry for a tool or prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Vec<ParameterDescriptor>,
}

/// Discovery entry for a resource; `uri` may contain one `{param}` slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceDescriptor {
    pub uri: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

struct ToolEntry {
    descriptor: OperationDescriptor,
    handler: ToolHandler,
}

struct PromptEntry {
    descriptor: OperationDescriptor,
    handler: PromptHandler,
}

struct ResourceEntry {
    descriptor: ResourceDescriptor,
    address: ResourceAddress,
    handler: ResourceHandler,
}

enum ResourceAddress {
    Fixed(&'static str),
    Template { prefix: &'static str },
}

impl ResourceAddress {
    fn parse(uri: &'static str) -> Self {
        match uri.find('{') {
            Some(start) if uri.ends_with('}') => Self::Template {
                prefix: &uri[..start],
            },
            _ => Self::Fixed(uri),
        }
    }

    fn is_fixed(&self) -> bool {
        matches!(self, Self::Fixed(_))
    }

    /// Returns `Some(param)` on a match; fixed matches carry no param.
    fn match_uri<'a>(&self, uri: &'a str) -> Option<Option<&'a str>> {
        match self {
            Self::Fixed(fixed) => (*fixed == uri).then_some(None),
            Self::Template { prefix } => uri
                .strip_prefix(*prefix)
                .filter(|rest| !rest.is_empty() && !rest.contains('/'))
                .map(Some),
        }
    }
}

/// Name/address to handler mapping for the note operations.
pub struct OperationRegistry {
    tools: BTreeMap<&'static str, ToolEntry>,
    resources: Vec<ResourceEntry>,
    prompts: BTreeMap<&'static str, PromptEntry>,
}

impl Default for OperationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl OperationRegistry {
    /// Builds the registry with every note operation.
    pub fn new() -> Self {
        let mut registry = Self::empty();

        registry.register_tool(
            OperationDescriptor {
                name: "add_note",
                description: "Create a new note and return it.",
                parameters: vec![
                    required_param("title", "Title of the note"),
                    required_param("content", "Note body text"),
                ],
            },
            call_add_note,
        );
        registry.register_tool(
            OperationDescriptor {
                name: "search_notes",
                description: "Search notes by title or content.",
                parameters: vec![required_param(
                    "query",
                    "Text to search for in titles and content",
                )],
            },
            call_search_notes,
        );
        registry.register_tool(
            OperationDescriptor {
                name: "delete_note",
                description: "Delete a note by ID.",
                parameters: vec![required_param("note_id", "ID of the note to delete")],
            },
            call_delete_note,
        );

        registry.register_resource(
            ResourceDescriptor {
                uri: "note://all",
                name: "list_notes",
                description: "List all notes with their IDs and titles.",
            },
            read_note_index,
        );
        registry.register_resource(
            ResourceDescriptor {
                uri: "note://{note_id}",
                name: "get_note",
                description: "Read a specific note by ID.",
            },
            read_note,
        );

        registry.register_prompt(
            OperationDescriptor {
                name: "summarize_notes",
                description: "Create a prompt to summarize all stored notes.",
                parameters: vec![ParameterDescriptor {
                    name: "style",
                    description: "Summary style: 'brief' or 'detailed'",
                    required: false,
                    default: Some("brief"),
                }],
            },
            prompt_summarize_notes,
        );

        registry
    }

    fn empty() -> Self {
        Self {
            tools: BTreeMap::new(),
            resources: Vec::new(),
            prompts: BTreeMap::new(),
        }
    }

    fn register_tool(&mut self, descriptor: OperationDescriptor, handler: ToolHandler) {
        self.tools
            .insert(descriptor.name, ToolEntry { descriptor, handler });
    }

    fn register_resource(&mut self, descriptor: ResourceDescriptor, handler: ResourceHandler) {
        let address = ResourceAddress::parse(descriptor.uri);
        self.resources.push(ResourceEntry {
            descriptor,
            address,
            handler,
        });
        // Stable sort keeps registration order within each group.
        self.resources
            .sort_by_key(|entry| !entry.address.is_fixed());
    }

    fn register_prompt(&mut self, descriptor: OperationDescriptor, handler: PromptHandler) {
        self.prompts
            .insert(descriptor.name, PromptEntry { descriptor, handler });
    }

    /// Describes every registered tool, sorted by name.
    pub fn list_tools(&self) -> Vec<OperationDescriptor> {
        self.tools
            .values()
            .map(|entry| entry.descriptor.clone())
            .collect()
    }

    /// Describes every registered resource, fixed addresses first.
    pub fn list_resources(&self) -> Vec<ResourceDescriptor> {
        self.resources
            .iter()
            .map(|entry| entry.descriptor.clone())
            .collect()
    }

    /// Describes every registered prompt, sorted by name.
    pub fn list_prompts(&self) -> Vec<OperationDescriptor> {
        self.prompts
            .values()
            .map(|entry| entry.descriptor.clone())
            .collect()
    }

    /// Invokes the tool registered under `name`.
    pub fn call_tool(
        &self,
        server: &NotesServer,
        name: &str,
        arguments: &Arguments,
    ) -> OperationResult<Value> {
        let Some(entry) = self.tools.get(name) else {
            warn!("event=dispatch module=registry status=error kind=tool error_code=unknown_operation name={name}");
            return Err(OperationError::unknown_operation(format!(
                "Unknown tool '{name}'."
            )));
        };
        (entry.handler)(server, arguments)
    }

    /// Reads the resource addressed by `uri`.
    pub fn read_resource(&self, server: &NotesServer, uri: &str) -> OperationResult<Value> {
        for entry in &self.resources {
            if let Some(param) = entry.address.match_uri(uri) {
                return (entry.handler)(server, param);
            }
        }

        warn!("event=dispatch module=registry status=error kind=resource error_code=unknown_operation");
        Err(OperationError::unknown_operation(format!(
            "Unknown resource '{uri}'."
        )))
    }

    /// Renders the prompt registered under `name`.
    pub fn get_prompt(
        &self,
        server: &NotesServer,
        name: &str,
        arguments: &Arguments,
    ) -> OperationResult<String> {
        let Some(entry) = self.prompts.get(name) else {
            warn!("event=dispatch module=registry status=error kind=prompt error_code=unknown_operation name={name}");
            return Err(OperationError::unknown_operation(format!(
                "Unknown prompt '{name}'."
            )));
        };
        (entry.handler)(server, arguments)
    }
}

fn required_param(name: &'static str, description: &'static str) -> ParameterDescriptor {
    ParameterDescriptor {
        name,
        description,
        required: true,
        default: None,
    }
}

fn required_str<'a>(arguments: &'a Arguments, name: &str) -> OperationResult<&'a str> {
    optional_str(arguments, name)?
        .ok_or_else(|| OperationError::validation(format!("Missing required argument '{name}'.")))
}

fn optional_str<'a>(arguments: &'a Arguments, name: &str) -> OperationResult<Option<&'a str>> {
    match arguments.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.as_str())),
        Some(_) => Err(OperationError::validation(format!(
            "Argument '{name}' must be a string."
        ))),
    }
}

fn call_add_note(server: &NotesServer, arguments: &Arguments) -> OperationResult<Value> {
    let title = required_str(arguments, "title")?;
    let content = required_str(arguments, "content")?;
    let note = server.add_note(title, content)?;
    Ok(json!(note))
}

fn call_search_notes(server: &NotesServer, arguments: &Arguments) -> OperationResult<Value> {
    let query = required_str(arguments, "query")?;
    let notes = server.search_notes(query)?;
    Ok(json!(notes))
}

fn call_delete_note(server: &NotesServer, arguments: &Arguments) -> OperationResult<Value> {
    let note_id = required_str(arguments, "note_id")?;
    let message = server.delete_note(note_id)?;
    Ok(Value::String(message))
}

fn read_note_index(server: &NotesServer, _param: Option<&str>) -> OperationResult<Value> {
    let summaries = server.list_notes()?;
    Ok(json!(summaries))
}

fn read_note(server: &NotesServer, param: Option<&str>) -> OperationResult<Value> {
    let note_id =
        param.ok_or_else(|| OperationError::validation("Missing note id in resource address."))?;
    let note = server.get_note(note_id)?;
    Ok(json!(note))
}

fn prompt_summarize_notes(server: &NotesServer, arguments: &Arguments) -> OperationResult<String> {
    // Non-string styles fall back to the default like unknown labels do.
    let style = arguments.get("style").and_then(Value::as_str);
    server.summarize_notes(style)
}

#[cfg(test)]
mod tests {
    use super::ResourceAddress;

    #[test]
    fn template_address_extracts_single_segment() {
        let address = ResourceAddress::parse("note://{note_id}");
        assert_eq!(address.match_uri("note://ab12cd34"), Some(Some("ab12cd34")));
        assert_eq!(address.match_uri("note://"), None);
        assert_eq!(address.match_uri("note://a/b"), None);
        assert_eq!(address.match_uri("memo://ab12cd34"), None);
    }

    #[test]
    fn fixed_address_matches_exactly() {
        let address = ResourceAddress::parse("note://all");
        assert!(address.is_fixed());
        assert_eq!(address.match_uri("note://all"), Some(None));
        assert_eq!(address.match_uri("note://all/"), None);
    }
}
