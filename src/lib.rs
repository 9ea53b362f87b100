pub mod canvas;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod ir;
pub mod layout;
pub mod model;
pub mod parser;
pub mod render;

pub use canvas::Canvas;
#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{LayoutConfig, load_config};
pub use error::CanvasError;
pub use ir::{CanvasInput, EdgeInput, FileNodeInput, GroupInput, NodeInput, TextNodeInput};
pub use layout::{GroupShift, Pass, Rect, resolve_collisions};
pub use model::{Edge, Node, NodeKind, Side};
pub use parser::{build_canvas, parse_canvas_input};
pub use render::{CanvasFile, EdgeRecord, NodeRecord, SaveOptions, render_json};
