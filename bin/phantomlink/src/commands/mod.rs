pub mod models_cmd;
pub mod run_cmd;
pub mod status;
pub mod tools_cmd;
