pub mod catalog;
pub mod errors;
pub mod events;
pub mod value_objects;

pub use catalog::{Book, Member};
pub use errors::*;
pub use events::*;
pub use value_objects::*;
