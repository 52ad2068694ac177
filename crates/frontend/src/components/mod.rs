pub mod controls;
pub mod header;
pub mod list_card;
pub mod notice;
pub mod sign_in;
pub mod task_item;
