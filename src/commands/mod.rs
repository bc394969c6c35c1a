pub mod fragkon;
