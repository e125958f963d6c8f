pub mod comment;
pub mod work_item;
