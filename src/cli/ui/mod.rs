pub mod output;
pub mod prompts;
pub mod spinner;

pub use output::{active_badge, finish, print_table, status_badge, write_csv};
pub use prompts::{confirm, secret_or_prompt, text_or_prompt};
pub use spinner::with_spinner;
