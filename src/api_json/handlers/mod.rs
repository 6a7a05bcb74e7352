pub mod courses;
pub mod docs;
pub mod files;
pub mod schedule;
pub mod user_input;

pub use courses::*;
pub use docs::*;
pub use files::*;
pub use schedule::*;
pub use user_input::*;
