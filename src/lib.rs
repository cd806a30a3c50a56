//! UI state for file intake widgets, the dropdown menu, and the theme toggle.
//!
//! Nothing here touches a browser. A view layer forwards DOM events as plain
//! calls or [`dispatch::IntakeEvent`]s and renders from the state these
//! types expose, which keeps every decision testable on the host.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`controller`] | [`controller::FileIntakeController`] and the rendered [`controller::IntakeView`] |
//! | [`dispatch`] | Single-threaded event loop driving a controller and its previews |
//! | [`policy`] | Accept/reject/ignore rules for documents and images |
//! | [`candidate`] | The selected file and its display metadata |
//! | [`payload`] | The file staged for form submission |
//! | [`preview`] | Data-URI previews tagged with the candidate they belong to |
//! | [`observe`] | Per-field change callbacks |
//! | [`size`] | Human-readable byte sizes |
//! | [`file`] | Dropped/picked file handle |
//! | [`config`] | Environment configuration |
//! | [`theme`] | Dark/light preference with write-through persistence |
//! | [`dropdown`] | Dropdown open state and keyboard handling |
//! | [`error`] | Error types |

pub mod candidate;
pub mod config;
pub mod controller;
pub mod dispatch;
pub mod dropdown;
pub mod error;
pub mod file;
pub mod observe;
pub mod payload;
pub mod policy;
pub mod preview;
pub mod size;
pub mod theme;

pub use config::IntakeConfig;
pub use controller::{FileIntakeController, IntakeView};
pub use dispatch::{EventLoop, IntakeEvent};
pub use error::{ConfigError, IntakeError, ThemeError};
pub use file::SourceFile;
pub use observe::Field;
pub use policy::{DocumentPolicy, ImagePolicy, IntakePolicy, Verdict};
pub use size::format_size;
