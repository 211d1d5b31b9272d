pub mod custom_list_entry;

pub use custom_list_entry::*;
