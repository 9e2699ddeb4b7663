//! stepgraph core - Steppable graph traversal engine.
//!
//! Runs breadth-first search, depth-first search and Dijkstra's shortest-path
//! algorithm one discrete step at a time under external control. A host drives
//! the engine through a small command surface (start, tick, manual step, pause,
//! resume, reset) and polls a read-only query surface after every call.
//!
//! # Architecture
//!
//! ```text
//! GraphInput -> GraphStore (immutable) --+
//!                                        +--> Traversal (BFS | DFS | Dijkstra) -> Overlay
//! StepScheduler (run/pause/step flags) --+                                   -> Path
//! ```
//!
//! # Usage
//!
//! ```
//! use stepgraph_core::{Algorithm, EdgePolicy, GraphInput, StepScheduler};
//!
//! let input = GraphInput::new(3, vec![(1, 2, 1), (2, 3, 1)], 1, 3);
//! let (graph, endpoints) = input.build(EdgePolicy::Drop).unwrap();
//!
//! let mut scheduler = StepScheduler::new(graph);
//! scheduler.start_run(Algorithm::Bfs, endpoints.start, Some(endpoints.end)).unwrap();
//! while scheduler.is_running() {
//!     scheduler.tick();
//! }
//! assert_eq!(scheduler.visit_order(), &[1, 2, 3]);
//! ```

pub mod error;
pub mod graph;
pub mod overlay;
pub mod path;
pub mod scheduler;
pub mod traversal;
pub mod types;

pub use error::{GraphError, Result};
pub use graph::{EdgeInput, EdgePolicy, Endpoints, GraphInput, GraphStore};
pub use overlay::Overlay;
pub use scheduler::{Snapshot, StepScheduler, StepStats};
pub use traversal::Traversal;
pub use types::*;
