//! Demo shell hosting a user-directory grid.

use std::rc::Rc;

use gloo::console;
use gridline_core::{
    CellValue, Column, ColumnOption, ColumnType, GridRow, Record, RowAction, RowId, TableOptions,
};
use yew::prelude::*;

use crate::components::GridTable;
use crate::style::TableStyle;

const DEMO_ROWS: &str = r#"[
    {"id": "1", "name": "John Carter", "email": "john@example.com", "role": "admin", "age": 30, "joined": "2023-01-15", "active": true},
    {"id": "2", "name": "Bob Smith", "email": "bob@example.com", "role": "user", "age": 20, "joined": "2023-06-01", "active": false},
    {"id": "3", "name": "Joanna Lee", "email": "joanna@example.com", "role": "user", "age": 25, "joined": "2024-02-29", "active": true},
    {"id": "4", "name": "Priya Patel", "email": "priya@example.com", "role": "editor", "age": 41, "joined": "2022-11-03", "active": true},
    {"id": "5", "name": "Marco Rossi", "email": "marco@example.com", "role": "user", "age": 35, "joined": "2021-08-19", "active": false},
    {"id": "6", "name": "Aiko Tanaka", "email": "aiko@example.com", "role": "editor", "age": 28, "joined": "2024-05-12", "active": true},
    {"id": "7", "name": "Lena Fischer", "email": "lena@example.com", "role": "admin", "age": 52, "joined": "2020-03-27", "active": true},
    {"id": "8", "name": "Omar Haddad", "email": "omar@example.com", "role": "user", "age": 33, "joined": "2023-09-09", "active": true},
    {"id": "9", "name": "Sofia Costa", "email": "sofia@example.com", "role": "user", "age": 23, "joined": "2024-07-01", "active": false},
    {"id": "10", "name": "Tom Becker", "email": "tom@example.com", "role": "editor", "age": 46, "joined": "2019-12-14", "active": true},
    {"id": "11", "name": "Nia Okafor", "email": "nia@example.com", "role": "user", "age": 31, "joined": "2022-04-22", "active": true},
    {"id": "12", "name": "Ivan Petrov", "email": "ivan@example.com", "role": "user", "age": null, "joined": "2023-02-08", "active": false}
]"#;

fn demo_rows() -> Vec<Record> {
    serde_json::from_str(DEMO_ROWS).unwrap_or_else(|err| {
        console::error!("demo rows failed to parse", err.to_string());
        Vec::new()
    })
}

fn demo_columns() -> Vec<Column> {
    vec![
        Column::new("name", "Name"),
        Column::new("email", "Email"),
        Column::new("role", "Role").options(vec![
            ColumnOption::new("admin", "Admin"),
            ColumnOption::new("editor", "Editor"),
            ColumnOption::new("user", "User"),
        ]),
        Column::new("age", "Age").kind(ColumnType::Number),
        Column::new("joined", "Joined").kind(ColumnType::Date),
        Column::new("active", "Active")
            .kind(ColumnType::Boolean)
            .editable(false),
    ]
}

#[function_component(GridlineApp)]
fn gridline_app() -> Html {
    let rows = use_state(|| Rc::new(demo_rows()));
    let columns = use_memo(|_| demo_columns(), ());
    let options = TableOptions::default()
        .with_state_id("demo-users")
        .with_page_size(5);

    let on_cell_value_change = {
        let rows = rows.clone();
        Callback::from(move |(row_id, column_id, value): (RowId, String, CellValue)| {
            let mut next = (**rows).clone();
            if let Some(row) = next.iter_mut().find(|row| row.row_id() == row_id) {
                row.set_field(&column_id, value);
            }
            rows.set(Rc::new(next));
        })
    };
    let on_row_action = {
        let rows = rows.clone();
        Callback::from(move |(row_id, action): (RowId, RowAction)| match action {
            RowAction::Delete => {
                let next = rows
                    .iter()
                    .filter(|row| row.row_id() != row_id)
                    .cloned()
                    .collect();
                rows.set(Rc::new(next));
            }
            other => console::log!("row action", row_id.to_string(), format!("{other:?}")),
        })
    };
    let on_reorder = {
        let rows = rows.clone();
        Callback::from(move |order: Vec<RowId>| {
            let next = order
                .iter()
                .filter_map(|id| rows.iter().find(|row| &row.row_id() == id).cloned())
                .collect();
            rows.set(Rc::new(next));
        })
    };

    html! {
        <main class="min-h-screen bg-base-200 p-6" data-theme="light">
            <h1 class="mb-4 text-2xl font-semibold">{"Gridline"}</h1>
            <GridTable
                rows={(*rows).clone()}
                columns={columns}
                options={options}
                style={TableStyle::default()}
                on_cell_value_change={on_cell_value_change}
                on_row_action={on_row_action}
                on_reorder={on_reorder}
            />
        </main>
    }
}

/// Mount the demo into `#root`, or the document body when that element is missing.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<GridlineApp>::with_root(root).render();
    } else {
        yew::Renderer::<GridlineApp>::new().render();
    }
}
