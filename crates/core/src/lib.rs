#![forbid(unsafe_code)]

pub mod form;
pub mod format;
pub mod history;
pub mod options;
pub mod problem;
pub mod solution;
pub mod traits;

pub use form::*;
pub use format::*;
pub use history::*;
pub use options::*;
pub use problem::*;
pub use solution::*;
pub use traits::*;
