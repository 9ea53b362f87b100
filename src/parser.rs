use crate::canvas::Canvas;
use crate::config::LayoutConfig;
use crate::error::{CanvasError, Result};
use crate::ir::{CanvasInput, EdgeInput, FileNodeInput, GroupInput, NodeInput, TextNodeInput};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Key some generators attach to every record; it carries no meaning here.
const IGNORED_KEY: &str = "kind";

pub fn parse_canvas_input(input: &str) -> Result<CanvasInput> {
    let root: Value = serde_json::from_str(input)?;
    let Value::Object(mut root) = root else {
        return Err(CanvasError::InvalidInput(
            "top-level JSON value must be an object".to_string(),
        ));
    };

    let nodes = records(&mut root, "nodes")?
        .into_iter()
        .enumerate()
        .map(|(idx, record)| {
            if record.contains_key("file") {
                decode::<FileNodeInput>("nodes", idx, record).map(NodeInput::File)
            } else {
                decode::<TextNodeInput>("nodes", idx, record).map(NodeInput::Text)
            }
        })
        .collect::<Result<Vec<_>>>()?;

    let groups = records(&mut root, "groups")?
        .into_iter()
        .enumerate()
        .map(|(idx, record)| decode::<GroupInput>("groups", idx, record))
        .collect::<Result<Vec<_>>>()?;

    let edges = records(&mut root, "edges")?
        .into_iter()
        .enumerate()
        .map(|(idx, record)| decode::<EdgeInput>("edges", idx, record))
        .collect::<Result<Vec<_>>>()?;

    let output = match root.remove("output") {
        None | Some(Value::Null) => None,
        Some(Value::String(path)) => Some(PathBuf::from(path)),
        Some(other) => {
            return Err(CanvasError::InvalidInput(format!(
                "'output' must be a string, got {other}"
            )));
        }
    };

    Ok(CanvasInput {
        nodes,
        groups,
        edges,
        output,
    })
}

/// Applies every record: nodes, then groups, then edges.
pub fn build_canvas(input: CanvasInput, config: LayoutConfig) -> Result<Canvas> {
    let mut canvas = Canvas::with_config(config);
    for node in input.nodes {
        match node {
            NodeInput::Text(text) => canvas.add_text_node(text)?,
            NodeInput::File(file) => canvas.add_file_node(file)?,
        };
    }
    for group in input.groups {
        canvas.add_group(group)?;
    }
    for edge in input.edges {
        canvas.add_edge(edge)?;
    }
    Ok(canvas)
}

fn records(root: &mut Map<String, Value>, key: &str) -> Result<Vec<Map<String, Value>>> {
    let items = match root.remove(key) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(CanvasError::InvalidInput(format!("'{key}' must be an array")));
        }
    };
    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| match item {
            Value::Object(mut record) => {
                record.remove(IGNORED_KEY);
                Ok(record)
            }
            _ => Err(CanvasError::InvalidInput(format!(
                "{key}[{idx}] must be an object"
            ))),
        })
        .collect()
}

fn decode<T: DeserializeOwned>(key: &str, idx: usize, record: Map<String, Value>) -> Result<T> {
    serde_json::from_value(Value::Object(record))
        .map_err(|err| CanvasError::InvalidInput(format!("{key}[{idx}]: {err}")))
}
