pub mod flower;
pub mod hashtag;

pub use flower::{format_created_at, Flower, FlowerWithTags};
pub use hashtag::Hashtag;
