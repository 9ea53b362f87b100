use crate::canvas::Canvas;
use crate::error::Result;
use crate::model::{Edge, Node, NodeKind, Side};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Serialized canvas document: `{"nodes": [...], "edges": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasFile {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRecord {
    pub id: String,
    pub from_node: String,
    pub from_side: Side,
    pub to_node: String,
    pub to_side: Side,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOptions {
    pub resolve_layout: bool,
    pub pretty: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            resolve_layout: true,
            pretty: true,
        }
    }
}

impl From<&Node> for NodeRecord {
    fn from(node: &Node) -> Self {
        let (text, file, label) = match &node.kind {
            NodeKind::Text { text } => (Some(text.clone()), None, None),
            NodeKind::File { file } => (None, Some(file.clone()), None),
            NodeKind::Group { label } => (None, None, Some(label.clone())),
        };
        NodeRecord {
            id: node.id.clone(),
            node_type: node.kind.type_name().to_string(),
            x: node.x,
            y: node.y,
            width: node.width,
            height: node.height,
            color: non_empty(&node.color),
            text,
            file,
            label,
        }
    }
}

impl From<&Edge> for EdgeRecord {
    fn from(edge: &Edge) -> Self {
        EdgeRecord {
            id: edge.id.clone(),
            from_node: edge.from_node.clone(),
            from_side: edge.from_side,
            to_node: edge.to_node.clone(),
            to_side: edge.to_side,
            label: non_empty(&edge.label),
            color: non_empty(&edge.color),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.is_empty()).cloned()
}

impl Canvas {
    /// Snapshot of the current geometry. Groups come first so renderers
    /// draw them underneath; everything else keeps insertion order.
    pub fn to_file(&self) -> CanvasFile {
        let (groups, others): (Vec<&Node>, Vec<&Node>) =
            self.nodes().iter().partition(|node| node.is_group());
        CanvasFile {
            nodes: groups
                .into_iter()
                .chain(others)
                .map(NodeRecord::from)
                .collect(),
            edges: self.edges().iter().map(EdgeRecord::from).collect(),
        }
    }

    /// Resolves group overlaps once, then writes pretty JSON to `path`.
    /// Returns the absolute path written.
    pub fn save(&mut self, path: &Path) -> Result<PathBuf> {
        self.save_with(path, SaveOptions::default())
    }

    pub fn save_with(&mut self, path: &Path, options: SaveOptions) -> Result<PathBuf> {
        if options.resolve_layout {
            self.resolve_layout();
        }
        let json = render_json(&self.to_file(), options.pretty)?;
        write_output_json(&json, Some(path))?;
        let absolute = std::path::absolute(path)?;
        log::info!("canvas written to {}", absolute.display());
        Ok(absolute)
    }
}

pub fn render_json(file: &CanvasFile, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(file)?
    } else {
        serde_json::to_string(file)?
    };
    Ok(json)
}

pub fn write_output_json(json: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
        }
        None => {
            println!("{}", json);
        }
    }
    Ok(())
}
