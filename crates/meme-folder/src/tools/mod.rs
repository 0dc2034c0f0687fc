pub mod add_image_tag;
pub mod common;
pub mod favorites;
pub mod get_all_tags;
pub mod get_image_tags;
pub mod list_dir;
pub mod remove_image_tag;
pub mod set_image_tags;
