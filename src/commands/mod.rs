pub mod action;
pub mod query;

pub use action::{invoke_action, run_action, ActionRequest};
pub use query::{list_query_results, run_query, QueryResults};
