#![deny(warnings)]

// Tool registry and MCP tool definitions

use crate::error::{McpError, OpResult, Result};
use crate::operations;
use crate::operations::search_in_file::LineMatch;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::debug;

/// Value returned by a tool, before it is wrapped into MCP content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutput {
    /// A single string
    Text(String),
    /// A list of strings, one content item each
    Lines(Vec<String>),
}

impl ToolOutput {
    /// Wrap the output into an MCP `tools/call` result
    pub fn into_call_result(self) -> Value {
        let content: Vec<Value> = match self {
            ToolOutput::Text(text) => vec![text_content(text)],
            ToolOutput::Lines(lines) => lines.into_iter().map(text_content).collect(),
        };

        json!({
            "content": content,
            "isError": false
        })
    }
}

fn text_content(text: String) -> Value {
    json!({
        "type": "text",
        "text": text
    })
}

type ToolHandler = fn(Value) -> Result<ToolOutput>;

/// A named command with its input schema and handler
pub struct Tool {
    pub name: &'static str,
    pub description: &'static str,
    input_schema: Value,
    handler: ToolHandler,
}

impl Tool {
    /// Tool definition in MCP format
    pub fn definition(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": self.input_schema
        })
    }

    /// Decode `arguments` and run the tool
    pub fn call(&self, arguments: Value) -> Result<ToolOutput> {
        (self.handler)(arguments)
    }
}

/// Tool registry that manages all available tools
pub struct ToolRegistry {
    tools: Vec<Tool>,
}

impl ToolRegistry {
    /// Create a new tool registry
    pub fn new() -> Self {
        Self {
            tools: vec![
                Tool {
                    name: "list_files",
                    description: "List all files in a given directory. Returns the names of the entries directly inside the directory.",
                    input_schema: string_schema(&[(
                        "directory_path",
                        "The path to the directory to list files from",
                    )], &["directory_path"]),
                    handler: list_files,
                },
                Tool {
                    name: "create_file",
                    description: "Create a new file with optional initial content. Parent directories are created if needed; existing files are never overwritten.",
                    input_schema: string_schema(&[
                        ("file_path", "The path where the file should be created"),
                        ("content", "Optional initial content for the file"),
                    ], &["file_path"]),
                    handler: create_file,
                },
                Tool {
                    name: "add_to_file",
                    description: "Add information to an existing file by appending content to its end.",
                    input_schema: string_schema(&[
                        ("file_path", "The path to the file to append to"),
                        ("content", "The content to append to the file"),
                    ], &["file_path", "content"]),
                    handler: add_to_file,
                },
                Tool {
                    name: "read_file",
                    description: "Read and return the contents of a file.",
                    input_schema: string_schema(&[(
                        "file_path",
                        "The path to the file to read",
                    )], &["file_path"]),
                    handler: read_file,
                },
                Tool {
                    name: "delete_file",
                    description: "Delete a file from the filesystem.",
                    input_schema: string_schema(&[(
                        "file_path",
                        "The path to the file to delete",
                    )], &["file_path"]),
                    handler: delete_file,
                },
                Tool {
                    name: "search_in_file",
                    description: "Search for a term in a file and return matching lines. Matching is literal and case-sensitive.",
                    input_schema: string_schema(&[
                        ("file_path", "The path to the file to search in"),
                        ("search_term", "The term to search for"),
                    ], &["file_path", "search_term"]),
                    handler: search_in_file,
                },
                Tool {
                    name: "rename_file",
                    description: "Rename or move a file. The destination must not exist; its parent directories are created if needed.",
                    input_schema: string_schema(&[
                        ("old_path", "The current path of the file"),
                        ("new_path", "The new path for the file"),
                    ], &["old_path", "new_path"]),
                    handler: rename_file,
                },
            ],
        }
    }

    /// Get all tools in MCP format
    pub fn list_tools(&self) -> Value {
        Value::Array(self.tools.iter().map(Tool::definition).collect())
    }

    /// Look up a tool by name
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    /// Execute a tool by name
    pub fn execute_tool(&self, name: &str, arguments: &Value) -> Result<Value> {
        let tool = self
            .get(name)
            .ok_or_else(|| McpError::ToolNotFound(name.to_string()))?;

        debug!(tool = name, "executing tool");
        let output = tool.call(arguments.clone())?;
        Ok(output.into_call_result())
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// JSON schema for an object whose properties are all strings
fn string_schema(properties: &[(&str, &str)], required: &[&str]) -> Value {
    let properties: Map<String, Value> = properties
        .iter()
        .map(|(name, description)| {
            (
                name.to_string(),
                json!({
                    "type": "string",
                    "description": description
                }),
            )
        })
        .collect();

    json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

/// Decode tool arguments into their typed form. Absent arguments decode as
/// an empty object so that missing fields are reported by name.
fn parse_args<T: DeserializeOwned>(arguments: Value) -> Result<T> {
    let arguments = match arguments {
        Value::Null => Value::Object(Map::new()),
        arguments @ Value::Object(_) => arguments,
        _ => {
            return Err(McpError::InvalidToolParameters(
                "Arguments must be an object".to_string(),
            )
            .into())
        }
    };

    serde_json::from_value(arguments)
        .map_err(|e| McpError::InvalidToolParameters(e.to_string()).into())
}

/// Render an operation result as text, using the error's message on failure
fn render<T>(result: OpResult<T>, on_success: impl FnOnce(T) -> String) -> ToolOutput {
    match result {
        Ok(value) => ToolOutput::Text(on_success(value)),
        Err(e) => {
            debug!(kind = ?e.kind(), error = %e, "file operation failed");
            ToolOutput::Text(e.to_string())
        }
    }
}

#[derive(Deserialize)]
struct DirectoryArgs {
    directory_path: String,
}

#[derive(Deserialize)]
struct FileArgs {
    file_path: String,
}

#[derive(Deserialize)]
struct CreateFileArgs {
    file_path: String,
    #[serde(default)]
    content: String,
}

#[derive(Deserialize)]
struct AppendArgs {
    file_path: String,
    content: String,
}

#[derive(Deserialize)]
struct SearchArgs {
    file_path: String,
    search_term: String,
}

#[derive(Deserialize)]
struct RenameArgs {
    old_path: String,
    new_path: String,
}

fn list_files(arguments: Value) -> Result<ToolOutput> {
    let args: DirectoryArgs = parse_args(arguments)?;

    let names = match operations::list_files::list_files(&args.directory_path) {
        Ok(names) => names,
        Err(e) => {
            debug!(kind = ?e.kind(), error = %e, "file operation failed");
            vec![e.to_string()]
        }
    };
    Ok(ToolOutput::Lines(names))
}

fn create_file(arguments: Value) -> Result<ToolOutput> {
    let args: CreateFileArgs = parse_args(arguments)?;

    let result = operations::create_file::create_file(&args.file_path, &args.content);
    Ok(render(result, |()| {
        format!("Successfully created file: {}", args.file_path)
    }))
}

fn add_to_file(arguments: Value) -> Result<ToolOutput> {
    let args: AppendArgs = parse_args(arguments)?;

    let result = operations::add_to_file::add_to_file(&args.file_path, &args.content);
    Ok(render(result, |()| {
        format!("Successfully added content to: {}", args.file_path)
    }))
}

fn read_file(arguments: Value) -> Result<ToolOutput> {
    let args: FileArgs = parse_args(arguments)?;

    let result = operations::read_file::read_file(&args.file_path);
    Ok(render(result, |content| content))
}

fn delete_file(arguments: Value) -> Result<ToolOutput> {
    let args: FileArgs = parse_args(arguments)?;

    let result = operations::delete_file::delete_file(&args.file_path);
    Ok(render(result, |()| {
        format!("Successfully deleted file: {}", args.file_path)
    }))
}

fn search_in_file(arguments: Value) -> Result<ToolOutput> {
    let args: SearchArgs = parse_args(arguments)?;

    let result = operations::search_in_file::search_in_file(&args.file_path, &args.search_term);
    Ok(render(result, |matches| {
        format_matches(&matches, &args.search_term, &args.file_path)
    }))
}

fn rename_file(arguments: Value) -> Result<ToolOutput> {
    let args: RenameArgs = parse_args(arguments)?;

    let result = operations::rename_file::rename_file(&args.old_path, &args.new_path);
    Ok(render(result, |()| {
        format!(
            "Successfully moved/renamed file from {} to {}",
            args.old_path, args.new_path
        )
    }))
}

fn format_matches(matches: &[LineMatch], search_term: &str, file_path: &str) -> String {
    if matches.is_empty() {
        return format!("No matches found for '{}' in {}", search_term, file_path);
    }

    matches
        .iter()
        .map(|m| format!("Line {}: {}", m.line_number, m.text))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn call_text(registry: &ToolRegistry, name: &str, arguments: Value) -> String {
        let result = registry.execute_tool(name, &arguments).unwrap();
        assert_eq!(result["isError"], false);
        let content = result["content"].as_array().unwrap();
        assert_eq!(content.len(), 1, "expected a single content item: {result}");
        content[0]["text"].as_str().unwrap().to_string()
    }

    fn call_lines(registry: &ToolRegistry, name: &str, arguments: Value) -> Vec<String> {
        let result = registry.execute_tool(name, &arguments).unwrap();
        result["content"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["text"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_list_tools() {
        let registry = ToolRegistry::new();
        let tools = registry.list_tools();
        let names: Vec<&str> = tools
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();

        assert_eq!(
            names,
            vec![
                "list_files",
                "create_file",
                "add_to_file",
                "read_file",
                "delete_file",
                "search_in_file",
                "rename_file"
            ]
        );
        assert_eq!(tools[1]["inputSchema"]["required"], json!(["file_path"]));
        assert_eq!(
            tools[1]["inputSchema"]["properties"]["content"]["type"],
            "string"
        );
    }

    #[test]
    fn test_create_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.txt");
        let path = path.to_str().unwrap();
        let registry = ToolRegistry::new();

        let created = call_text(&registry, "create_file", json!({"file_path": path, "content": "abc"}));
        assert_eq!(created, format!("Successfully created file: {}", path));

        let content = call_text(&registry, "read_file", json!({"file_path": path}));
        assert_eq!(content, "abc");
    }

    #[test]
    fn test_create_defaults_to_empty_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.txt");
        let registry = ToolRegistry::new();

        call_text(&registry, "create_file", json!({"file_path": path.to_str().unwrap()}));
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_domain_errors_are_text_results() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.txt");
        let path = path.to_str().unwrap();
        let registry = ToolRegistry::new();

        let text = call_text(&registry, "add_to_file", json!({"file_path": path, "content": "x"}));
        assert_eq!(text, format!("Error: File '{}' does not exist", path));
    }

    #[test]
    fn test_list_files_error_is_single_item() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let missing = missing.to_str().unwrap();
        let registry = ToolRegistry::new();

        let lines = call_lines(&registry, "list_files", json!({"directory_path": missing}));
        assert_eq!(lines, vec![format!("Error: Directory '{}' does not exist", missing)]);
    }

    #[test]
    fn test_list_files_one_item_per_entry() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("one"), "").unwrap();
        fs::write(dir.path().join("two"), "").unwrap();
        let registry = ToolRegistry::new();

        let mut lines = call_lines(
            &registry,
            "list_files",
            json!({"directory_path": dir.path().to_str().unwrap()}),
        );
        lines.sort();
        assert_eq!(lines, vec!["one", "two"]);
    }

    #[test]
    fn test_search_rendering() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("s.txt");
        fs::write(&path, "foo\nbar term\nbaz\nterm again\n").unwrap();
        let path = path.to_str().unwrap();
        let registry = ToolRegistry::new();

        let text = call_text(
            &registry,
            "search_in_file",
            json!({"file_path": path, "search_term": "term"}),
        );
        assert_eq!(text, "Line 2: bar term\nLine 4: term again");

        let text = call_text(
            &registry,
            "search_in_file",
            json!({"file_path": path, "search_term": "zzz"}),
        );
        assert_eq!(text, format!("No matches found for 'zzz' in {}", path));
    }

    #[test]
    fn test_search_rendering_edge_inputs() {
        let dir = TempDir::new().unwrap();
        let empty = dir.path().join("empty.txt");
        fs::write(&empty, "").unwrap();
        let empty = empty.to_str().unwrap();
        let lines = dir.path().join("lines.txt");
        fs::write(&lines, "a\nb\n").unwrap();
        let lines = lines.to_str().unwrap();
        let registry = ToolRegistry::new();

        let text = call_text(
            &registry,
            "search_in_file",
            json!({"file_path": empty, "search_term": "x"}),
        );
        assert_eq!(text, format!("No matches found for 'x' in {}", empty));

        let text = call_text(
            &registry,
            "search_in_file",
            json!({"file_path": lines, "search_term": ""}),
        );
        assert_eq!(text, "Line 1: a\nLine 2: b");
    }

    #[test]
    fn test_rename_and_delete_messages() {
        let dir = TempDir::new().unwrap();
        let old = dir.path().join("old.txt");
        let new = dir.path().join("new.txt");
        fs::write(&old, "x").unwrap();
        let (old, new) = (old.to_str().unwrap(), new.to_str().unwrap());
        let registry = ToolRegistry::new();

        let text = call_text(&registry, "rename_file", json!({"old_path": old, "new_path": new}));
        assert_eq!(
            text,
            format!("Successfully moved/renamed file from {} to {}", old, new)
        );

        let text = call_text(&registry, "delete_file", json!({"file_path": new}));
        assert_eq!(text, format!("Successfully deleted file: {}", new));
    }

    #[test]
    fn test_unknown_tool() {
        let registry = ToolRegistry::new();
        let err = registry.execute_tool("format_disk", &json!({})).unwrap_err();
        assert!(err.to_string().contains("Tool not found: format_disk"));
    }

    #[test]
    fn test_missing_argument_is_named() {
        let registry = ToolRegistry::new();
        let err = registry.execute_tool("read_file", &Value::Null).unwrap_err();
        assert!(err.to_string().contains("file_path"), "got: {err}");

        let err = registry
            .execute_tool("add_to_file", &json!({"file_path": "x"}))
            .unwrap_err();
        assert!(err.to_string().contains("content"), "got: {err}");
    }

    #[test]
    fn test_non_object_arguments_rejected() {
        let registry = ToolRegistry::new();
        let err = registry.execute_tool("read_file", &json!(["a"])).unwrap_err();
        assert!(err.to_string().contains("Arguments must be an object"));
    }
}
