pub mod html;
pub mod normalize;
