pub mod batch;
pub mod fill;
pub mod handles;
pub mod history;
pub mod input;
pub mod session;

pub use batch::EditBatch;
pub use fill::{FillEngine, FloodFill};
pub use handles::{Anchor, Handle, HandleSet, Side};
pub use history::History;
pub use input::{InputEvent, PointerButton};
pub use session::{ResizeCommit, Session, SessionState, Tool};
