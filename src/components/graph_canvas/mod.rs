mod canvas;
mod component;
pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod geometry;
pub mod interaction;
pub mod render;
pub mod scene;
pub mod scheduler;
pub mod state;
pub mod style;
pub mod surface;
pub mod types;
pub mod viewport;

pub use canvas::Canvas2dSurface;
pub use component::GraphCanvas;
pub use config::{EngineConfig, ViewOptions};
pub use engine::{GraphEngine, NodeSummary};
pub use error::EngineError;
pub use filter::{CategoryFilter, visible_nodes};
pub use geometry::{Point, QuadCurve, Size};
pub use scheduler::{AnimationFrames, AnimationScheduler, FrameRequester, SchedulerState};
pub use state::ViewState;
pub use surface::{DrawCommand, DrawSurface, RecordingSurface};
pub use types::{Category, EdgeKind, GraphData, GraphEdge, GraphNode, NodeMetrics, Status};
pub use viewport::ViewportTransform;
