pub mod descriptor;
pub mod entry_map;
pub mod module_rule;
pub mod plugin;
pub mod source_dialect;
