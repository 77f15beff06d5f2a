#![deny(warnings)]

// File operation implementations

pub mod add_to_file;
pub mod create_file;
pub mod delete_file;
pub mod list_files;
pub mod read_file;
pub mod rename_file;
pub mod search_in_file;
