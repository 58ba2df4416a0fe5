//! Interactive picker over an enumerated path list.
//!
//! The picker is split the usual way: [`model`] holds the state and its pure
//! transition function, [`keys`] is the key binding table, and [`session`]
//! owns the terminal loop that ties them together.
pub mod keys;
pub mod model;
pub mod session;

pub use keys::key_action;
pub use model::{update, Outcome, PickerAction, PickerModel};
pub use session::run_picker;
