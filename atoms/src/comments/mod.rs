pub mod model;

pub use model::Comment;
