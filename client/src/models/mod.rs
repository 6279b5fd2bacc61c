pub mod schedule;
pub mod search;
pub mod time;

pub use schedule::*;
pub use search::*;
pub use time::*;
