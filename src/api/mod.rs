pub mod favorites;
pub mod movies;
pub mod types;

pub use favorites::*;
pub use movies::*;
pub use types::*;
