pub mod branch_list;
pub mod delete_confirm;
pub mod error_bar;
pub mod search_bar;
