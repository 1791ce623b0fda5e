mod no_todo;
mod report_node_types;

pub use no_todo::NoTodo;
pub use report_node_types::ReportNodeTypes;
