pub mod output;
pub mod progress;

pub use output::{print_error, print_records, print_result};
pub use progress::{create_spinner, fail_spinner};
