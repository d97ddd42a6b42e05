//! Output formats
//!
//!     - [changes]: the flat, timestamped `AIChange` records consumed by prompt
//!       assembly and the editor
//!     - [summary]: one human readable line per change
//!     - [treeviz]: a one line per node view of a forest

pub mod changes;
pub mod summary;
pub mod treeviz;

pub use changes::{to_ai_changes, AIChange, ChangeElement, ChangeType};
pub use summary::describe;
pub use treeviz::to_treeviz_str;
