mod grid_table;
mod pagination_bar;
mod search_box;

pub(crate) use grid_table::GridTable;
