use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextNodeInput {
    pub text: String,
    #[serde(deserialize_with = "coerce::int")]
    pub x: i64,
    #[serde(deserialize_with = "coerce::int")]
    pub y: i64,
    #[serde(default, deserialize_with = "coerce::opt_int")]
    pub width: Option<i64>,
    /// Estimated from the text when absent.
    #[serde(default, deserialize_with = "coerce::opt_int")]
    pub height: Option<i64>,
    #[serde(default, deserialize_with = "coerce::opt_color")]
    pub color: Option<String>,
    #[serde(default, alias = "node_id")]
    pub id: Option<String>,
}

impl TextNodeInput {
    pub fn new(text: impl Into<String>, x: i64, y: i64) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            width: None,
            height: None,
            color: None,
            id: None,
        }
    }

    pub fn with_width(mut self, width: i64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_height(mut self, height: i64) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileNodeInput {
    /// Stored verbatim; never opened.
    pub file: String,
    #[serde(deserialize_with = "coerce::int")]
    pub x: i64,
    #[serde(deserialize_with = "coerce::int")]
    pub y: i64,
    #[serde(default, deserialize_with = "coerce::opt_int")]
    pub width: Option<i64>,
    #[serde(default, deserialize_with = "coerce::opt_int")]
    pub height: Option<i64>,
    #[serde(default, deserialize_with = "coerce::opt_color")]
    pub color: Option<String>,
    #[serde(default, alias = "node_id")]
    pub id: Option<String>,
}

impl FileNodeInput {
    pub fn new(file: impl Into<String>, x: i64, y: i64) -> Self {
        Self {
            file: file.into(),
            x,
            y,
            width: None,
            height: None,
            color: None,
            id: None,
        }
    }

    pub fn with_size(mut self, width: i64, height: i64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupInput {
    pub label: String,
    /// When non-empty, bounds come from these nodes and the explicit
    /// geometry below is ignored.
    #[serde(default, alias = "member_ids")]
    pub nodes_in_group: Option<Vec<String>>,
    #[serde(default, deserialize_with = "coerce::opt_int")]
    pub x: Option<i64>,
    #[serde(default, deserialize_with = "coerce::opt_int")]
    pub y: Option<i64>,
    #[serde(default, deserialize_with = "coerce::opt_int")]
    pub width: Option<i64>,
    #[serde(default, deserialize_with = "coerce::opt_int")]
    pub height: Option<i64>,
    #[serde(default, deserialize_with = "coerce::opt_color")]
    pub color: Option<String>,
    #[serde(default, alias = "node_id")]
    pub id: Option<String>,
}

impl GroupInput {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            nodes_in_group: None,
            x: None,
            y: None,
            width: None,
            height: None,
            color: None,
            id: None,
        }
    }

    pub fn around<I, S>(label: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut group = Self::new(label);
        group.nodes_in_group = Some(members.into_iter().map(Into::into).collect());
        group
    }

    pub fn with_bounds(mut self, x: i64, y: i64, width: i64, height: i64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EdgeInput {
    pub from_node: String,
    pub to_node: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_color")]
    pub color: Option<String>,
    /// Kept as text so an unknown side is reported when the edge is added.
    #[serde(default)]
    pub from_side: Option<String>,
    #[serde(default)]
    pub to_side: Option<String>,
}

impl EdgeInput {
    pub fn new(from_node: impl Into<String>, to_node: impl Into<String>) -> Self {
        Self {
            from_node: from_node.into(),
            to_node: to_node.into(),
            label: None,
            color: None,
            from_side: None,
            to_side: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_sides(mut self, from_side: impl Into<String>, to_side: impl Into<String>) -> Self {
        self.from_side = Some(from_side.into());
        self.to_side = Some(to_side.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeInput {
    Text(TextNodeInput),
    File(FileNodeInput),
}

/// A whole input document, in the order its records are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanvasInput {
    pub nodes: Vec<NodeInput>,
    pub groups: Vec<GroupInput>,
    pub edges: Vec<EdgeInput>,
    pub output: Option<PathBuf>,
}

mod coerce {
    use crate::layout::MAX_COORDINATE;
    use serde::de::{self, Deserializer};
    use serde::Deserialize;
    use serde_json::Value;

    pub fn int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let value = Value::deserialize(deserializer)?;
        value_to_int(&value).map_err(de::Error::custom)
    }

    pub fn opt_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(None),
            value => value_to_int(&value).map(Some).map_err(de::Error::custom),
        }
    }

    pub fn opt_color<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s)),
            Value::Number(n) => Ok(Some(n.to_string())),
            other => Err(de::Error::custom(format!(
                "expected a color string, got {other}"
            ))),
        }
    }

    fn value_to_int(value: &Value) -> Result<i64, String> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| {
                    n.as_f64()
                        .filter(|f| f.abs() <= MAX_COORDINATE as f64)
                        .map(|f| f.trunc() as i64)
                })
                .filter(|&v| in_range(v))
                .ok_or_else(|| format!("number out of range: {n}")),
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| format!("invalid integer literal: {s:?}"))
                .and_then(|v| {
                    if in_range(v) {
                        Ok(v)
                    } else {
                        Err(format!("number out of range: {v}"))
                    }
                }),
            other => Err(format!("expected an integer, got {other}")),
        }
    }

    fn in_range(value: i64) -> bool {
        value.unsigned_abs() <= MAX_COORDINATE as u64
    }
}
