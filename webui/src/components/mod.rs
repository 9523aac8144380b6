pub mod cli_equivalent;
pub mod data_table;
pub mod status;
pub mod task_view;
