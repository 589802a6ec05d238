// crates/mht-runtime/src/lib.rs

pub mod storage;
pub mod bookmarks;
pub mod session;
pub mod navigation;
pub mod screen;
pub mod config;

pub use storage::*;
pub use bookmarks::*;
pub use session::*;
pub use navigation::*;
pub use screen::GuidelinesScreen;
pub use config::*;
