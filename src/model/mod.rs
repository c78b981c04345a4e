pub mod config;
pub mod record;
pub mod todo;

pub use config::*;
pub use record::*;
pub use todo::*;
