mod article;
mod render;

pub use article::{Article, CONTRIBUTOR_NOT_AVAILABLE, THUMBNAIL_NOT_AVAILABLE};
pub use render::RenderModel;
