//! Tool definitions advertised to the model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A callable tool as the model sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Must match the name the tool is registered under
    pub name: String,
    pub description: String,
    /// JSON Schema of the arguments object
    pub input_schema: Value,
}

impl ToolDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

/// JSON Schema fragments for tool inputs
pub mod schema {
    use serde_json::{Value, json};

    /// Object schema with the given properties and required keys
    ///
    /// ```
    /// use crew_llm::tools::schema;
    /// use serde_json::json;
    ///
    /// let schema = schema::object(
    ///     json!({ "ticker": schema::string("Stock symbol") }),
    ///     &["ticker"],
    /// );
    /// assert_eq!(schema["required"][0], "ticker");
    /// ```
    pub fn object(properties: Value, required: &[&str]) -> Value {
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    pub fn string(description: &str) -> Value {
        json!({ "type": "string", "description": description })
    }

    pub fn integer(description: &str, minimum: i64, maximum: i64) -> Value {
        json!({
            "type": "integer",
            "description": description,
            "minimum": minimum,
            "maximum": maximum,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_definition_carries_schema() {
        let input_schema = schema::object(
            json!({
                "query": schema::string("Search query"),
                "max_results": schema::integer("How many", 1, 25),
            }),
            &["query"],
        );

        let tool = ToolDefinition::new("news_search", "Search recent news", input_schema.clone());
        assert_eq!(tool.name, "news_search");
        assert_eq!(tool.input_schema, input_schema);
        assert_eq!(tool.input_schema["properties"]["max_results"]["maximum"], 25);
    }
}
