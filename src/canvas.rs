use crate::config::LayoutConfig;
use crate::error::{CanvasError, Result};
use crate::ir::{EdgeInput, FileNodeInput, GroupInput, TextNodeInput};
use crate::layout::{
    GroupShift, MAX_COORDINATE, Rect, auto_edge_sides, estimate_text_height, resolve_collisions,
};
use crate::model::{Edge, Node, NodeKind, Side};
use std::collections::{BTreeMap, HashMap, HashSet};

/// In-memory canvas document.
///
/// Nodes keep insertion order (groups are hoisted only when serialized) and
/// edges are never reordered. Group membership is recorded once, when a group
/// is sized from its members, and is never re-derived from geometry.
#[derive(Debug, Clone)]
pub struct Canvas {
    pub(crate) config: LayoutConfig,
    pub(crate) nodes: Vec<Node>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) members: BTreeMap<String, Vec<String>>,
    node_index: HashMap<String, usize>,
    edge_ids: HashSet<String>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::with_config(LayoutConfig::default())
    }

    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            config,
            nodes: Vec::new(),
            edges: Vec::new(),
            members: BTreeMap::new(),
            node_index: HashMap::new(),
            edge_ids: HashSet::new(),
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.node_index.get(id).map(|&idx| &self.nodes[idx])
    }

    /// Members recorded for `group_id`; empty for explicitly sized groups.
    pub fn members(&self, group_id: &str) -> &[String] {
        self.members.get(group_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_member(&self, group_id: &str, node_id: &str) -> bool {
        self.members(group_id).iter().any(|id| id == node_id)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.node_index.contains_key(id) || self.edge_ids.contains(id)
    }

    pub fn add_text_node(&mut self, input: TextNodeInput) -> Result<String> {
        let width = input.width.unwrap_or(self.config.default_text_width);
        let height = input
            .height
            .unwrap_or_else(|| estimate_text_height(&input.text, width, &self.config));
        check_geometry("text node", Rect::new(input.x, input.y, width, height))?;
        let id = self.claim_id(input.id)?;
        self.register_node(Node {
            id: id.clone(),
            kind: NodeKind::Text { text: input.text },
            x: input.x,
            y: input.y,
            width,
            height,
            color: input.color,
        });
        Ok(id)
    }

    pub fn add_file_node(&mut self, input: FileNodeInput) -> Result<String> {
        let rect = Rect::new(
            input.x,
            input.y,
            input.width.unwrap_or(self.config.default_file_width),
            input.height.unwrap_or(self.config.default_file_height),
        );
        check_geometry("file node", rect)?;
        let id = self.claim_id(input.id)?;
        self.register_node(Node {
            id: id.clone(),
            kind: NodeKind::File { file: input.file },
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            color: input.color,
        });
        Ok(id)
    }

    /// Adds a group node.
    ///
    /// Returns `Ok(None)` without creating anything when member ids were
    /// given but none of them names an existing node.
    pub fn add_group(&mut self, input: GroupInput) -> Result<Option<String>> {
        let requested = input.nodes_in_group.unwrap_or_default();
        let (rect, members) = if requested.is_empty() {
            let rect = Rect::new(
                input.x.unwrap_or(0),
                input.y.unwrap_or(0),
                input.width.unwrap_or(self.config.default_group_width),
                input.height.unwrap_or(self.config.default_group_height),
            );
            check_geometry("group", rect)?;
            (rect, None)
        } else {
            let members = self.resolve_members(&input.label, &requested);
            let Some(bounds) = Rect::bounding(members.iter().filter_map(|id| {
                self.node(id).map(Node::rect)
            })) else {
                log::warn!(
                    "group {:?}: none of {:?} are known nodes, group skipped",
                    input.label,
                    requested
                );
                return Ok(None);
            };
            (self.group_bounds(bounds), Some(members))
        };

        let id = self.claim_id(input.id)?;
        self.register_node(Node {
            id: id.clone(),
            kind: NodeKind::Group { label: input.label },
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            color: input.color,
        });
        if let Some(members) = members {
            self.members.insert(id.clone(), members);
        }
        Ok(Some(id))
    }

    pub fn add_edge(&mut self, input: EdgeInput) -> Result<String> {
        let from_side = Side::parse_optional(input.from_side.as_deref())?;
        let to_side = Side::parse_optional(input.to_side.as_deref())?;

        let (from_side, to_side) = match (from_side, to_side) {
            (Some(from), Some(to)) => (from, to),
            _ => match (self.node(&input.from_node), self.node(&input.to_node)) {
                (Some(from), Some(to)) => {
                    let (auto_from, auto_to) = auto_edge_sides(&from.rect(), &to.rect());
                    (from_side.unwrap_or(auto_from), to_side.unwrap_or(auto_to))
                }
                _ => {
                    log::warn!(
                        "edge {} -> {}: endpoint not found, using default sides",
                        input.from_node,
                        input.to_node
                    );
                    (
                        from_side.unwrap_or(Side::Bottom),
                        to_side.unwrap_or(Side::Top),
                    )
                }
            },
        };

        let id = self.new_id();
        self.edge_ids.insert(id.clone());
        self.edges.push(Edge {
            id: id.clone(),
            from_node: input.from_node,
            to_node: input.to_node,
            from_side,
            to_side,
            label: input.label,
            color: input.color,
        });
        Ok(id)
    }

    /// Runs the group overlap passes once, moving groups in place.
    pub fn resolve_layout(&mut self) -> Vec<GroupShift> {
        let shifts = resolve_collisions(self);
        log::debug!("layout resolved with {} group moves", shifts.len());
        shifts
    }

    /// Moves a node and, when it is a group, every recorded member with it.
    pub(crate) fn shift_group(&mut self, group_id: &str, dx: i64, dy: i64) {
        let Some(&idx) = self.node_index.get(group_id) else {
            return;
        };
        self.nodes[idx].translate(dx, dy);
        if let Some(members) = self.members.get(group_id) {
            for member in members {
                if let Some(&member_idx) = self.node_index.get(member) {
                    self.nodes[member_idx].translate(dx, dy);
                }
            }
        }
    }

    pub(crate) fn node_at(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    fn resolve_members(&self, label: &str, requested: &[String]) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut members = Vec::new();
        for id in requested {
            if !self.node_index.contains_key(id) {
                log::warn!("group {label:?}: unknown member {id:?} ignored");
                continue;
            }
            if seen.insert(id.as_str()) {
                members.push(id.clone());
            }
        }
        members
    }

    fn group_bounds(&self, members: Rect) -> Rect {
        let pad = self.config.group_padding;
        let x = members.left() - pad;
        let y = members.top() - pad - self.config.group_header_height;
        let width = (members.right() - x) + pad;
        let height = (members.bottom() - y) + pad + self.config.group_bottom_buffer;
        Rect::new(x, y, width, height)
    }

    fn claim_id(&self, requested: Option<String>) -> Result<String> {
        match requested.filter(|id| !id.is_empty()) {
            Some(id) if self.contains_id(&id) => Err(CanvasError::DuplicateId(id)),
            Some(id) => Ok(id),
            None => Ok(self.new_id()),
        }
    }

    fn new_id(&self) -> String {
        loop {
            let mut candidate = uuid::Uuid::new_v4().simple().to_string();
            candidate.truncate(16);
            if !self.contains_id(&candidate) {
                return candidate;
            }
        }
    }

    fn register_node(&mut self, node: Node) {
        self.node_index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
    }
}

/// Rejects geometry whose sums could overflow during layout.
fn check_geometry(what: &str, rect: Rect) -> Result<()> {
    let fields = [
        ("x", rect.x),
        ("y", rect.y),
        ("width", rect.width),
        ("height", rect.height),
    ];
    match fields
        .into_iter()
        .find(|(_, value)| value.unsigned_abs() > MAX_COORDINATE as u64)
    {
        Some((name, value)) => Err(CanvasError::InvalidInput(format!(
            "{what} {name} {value} is outside ±{MAX_COORDINATE}"
        ))),
        None => Ok(()),
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}
