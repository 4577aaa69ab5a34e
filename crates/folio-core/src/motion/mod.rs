//! Animation orchestration for UI wrappers
//!
//! Wrappers own a set of nodes and hand them to an [`AnimationDriver`] once
//! mounted, optionally after a delay. The driver does the actual animating;
//! this module only owns the lifecycle: schedule on mount, cancel and
//! release on unmount or when the wrapper is toggled off.

pub mod mount;
pub mod presets;

pub use mount::{mount, mount_form, AnimationDriver, MountHandle, NodeRef, Wrapper};
pub use presets::{stagger_delays, Ease, Frame, Preset, RevealKind, Variant};
