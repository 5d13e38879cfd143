//! Retained surface tree for player widgets.
//!
//! This crate provides the element structure a widget is built from and the
//! two host-loop primitives widgets rely on: typed input bindings and
//! deferred one-shot actions.

pub mod element;
pub mod events;
pub mod node;
pub mod props;
pub mod timers;
pub mod tree;

pub use element::{ElementData, TagName};
pub use events::{BindingMap, InputEvent, InputKind};
pub use node::{Node, NodeData, NodeId};
pub use props::PropertyMap;
pub use timers::{TimerId, TimerQueue};
pub use tree::SurfaceTree;
