mod commands;
mod handlers;
mod render;

pub use commands::{Cli, Commands};
pub use handlers::{
    handle_add, handle_delete, handle_edit, handle_get, handle_init, handle_list,
};
pub use render::{format_date, format_detail, format_summary, format_tags};
