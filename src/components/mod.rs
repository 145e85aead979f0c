pub mod form_view;
pub mod points_table;
