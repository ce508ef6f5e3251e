//! Data grid bound to a [`TableController`].
//!
//! # Design
//! - The controller lives in a `use_mut_ref` cell for the component's lifetime; every
//!   handler mutates it through [`TableHandle`] and then forces a redraw.
//! - Caller callbacks are re-read from the latest props on each invocation, so parents can
//!   pass fresh closures without remounting the table.
//! - View data is snapshotted out of the controller before rendering; no borrow is held
//!   while the virtual DOM is built.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use gloo::console;
use gridline_core::{
    CellValue, Column, ColumnOption, EditKey, EditingCell, FilterOp, GridRow, JsonStore, PageItem, PageSummary,
    Record, RowAction, RowId, SearchInput, SearchTicket, TableController, TableFeatures,
    TableOptions, ViewState,
};
use web_sys::{DragEvent, HtmlInputElement, HtmlSelectElement, KeyboardEvent};
use yew::functional::UseForceUpdateHandle;
use yew::prelude::*;

use super::pagination_bar::PaginationBar;
use super::search_box::SearchBox;
use crate::storage::LocalStorageStore;
use crate::style::{
    self, ButtonSize, ButtonVariant, RowFlags, TableStyle, button_classes, checkbox_flags,
    filter_button_variant, filter_placeholder,
};

#[derive(Properties, PartialEq)]
pub(crate) struct GridTableProps {
    pub rows: Rc<Vec<Record>>,
    pub columns: Rc<Vec<Column>>,
    #[prop_or_default]
    pub options: TableOptions,
    #[prop_or_default]
    pub style: TableStyle,
    #[prop_or_default]
    pub on_cell_value_change: Option<Callback<(RowId, String, CellValue)>>,
    #[prop_or_default]
    pub on_row_action: Option<Callback<(RowId, RowAction)>>,
    #[prop_or_default]
    pub on_reorder: Option<Callback<Vec<RowId>>>,
}

#[derive(Default)]
struct Listeners {
    on_cell_value_change: Option<Callback<(RowId, String, CellValue)>>,
    on_row_action: Option<Callback<(RowId, RowAction)>>,
    on_reorder: Option<Callback<Vec<RowId>>>,
}

impl Listeners {
    fn from_props(props: &GridTableProps) -> Self {
        Self {
            on_cell_value_change: props.on_cell_value_change.clone(),
            on_row_action: props.on_row_action.clone(),
            on_reorder: props.on_reorder.clone(),
        }
    }
}

type SharedTable = Rc<RefCell<TableController<Record>>>;
type SharedListeners = Rc<RefCell<Listeners>>;

fn mount(props: &GridTableProps, listeners: &SharedListeners) -> TableController<Record> {
    let mut builder = TableController::builder((*props.rows).clone(), (*props.columns).clone())
        .options(props.options.clone())
        .store(JsonStore::new(LocalStorageStore));
    if props.on_cell_value_change.is_some() {
        let listeners = Rc::clone(listeners);
        builder = builder.on_cell_value_change(move |row_id, column_id, value| {
            let callback = listeners.borrow().on_cell_value_change.clone();
            if let Some(callback) = callback {
                callback.emit((row_id.clone(), column_id.to_string(), value.clone()));
            }
        });
    }
    if props.on_row_action.is_some() {
        let listeners = Rc::clone(listeners);
        builder = builder.on_row_action(move |row: &Record, action| {
            let callback = listeners.borrow().on_row_action.clone();
            if let Some(callback) = callback {
                callback.emit((row.row_id(), action.clone()));
            }
        });
    }
    {
        let listeners = Rc::clone(listeners);
        builder = builder.on_reorder(move |rows: &[Record]| {
            let callback = listeners.borrow().on_reorder.clone();
            if let Some(callback) = callback {
                callback.emit(rows.iter().map(Record::row_id).collect());
            }
        });
    }
    builder.build()
}

#[derive(Clone)]
struct TableHandle {
    table: SharedTable,
    redraw: UseForceUpdateHandle,
}

impl TableHandle {
    fn callback<E: 'static>(
        &self,
        apply: impl Fn(&mut TableController<Record>, E) + 'static,
    ) -> Callback<E> {
        let handle = self.clone();
        Callback::from(move |event: E| {
            apply(&mut handle.table.borrow_mut(), event);
            handle.redraw.force_update();
        })
    }
}

struct Snapshot {
    rows: Vec<Record>,
    all_columns: Vec<Column>,
    columns: Vec<Column>,
    view: ViewState,
    features: TableFeatures,
    editing: Option<EditingCell>,
    can_edit: bool,
    search_value: String,
    recent: Vec<String>,
    select_all: (bool, bool),
    column_drag: (Option<String>, Option<String>),
    row_drag: (Option<RowId>, Option<RowId>),
    summary: PageSummary,
    page_items: Vec<PageItem>,
    page_count: usize,
    page_size_options: Vec<usize>,
    filter_choices: BTreeMap<String, Vec<ColumnOption>>,
    presets: Vec<String>,
    state_id: String,
}

impl Snapshot {
    fn take(table: &mut TableController<Record>) -> Self {
        let rows = table.visible_rows().into_iter().cloned().collect();
        let select_all = checkbox_flags(table.select_all_state());
        let summary = table.page_summary();
        let page_items = table.page_items();
        let page_count = table.page_count();
        let columns: Vec<Column> = table.visible_columns().into_iter().cloned().collect();
        let filter_choices = columns
            .iter()
            .filter_map(|column| {
                table
                    .filter_choices(&column.id)
                    .map(|choices| (column.id.clone(), choices))
            })
            .collect();
        Self {
            rows,
            all_columns: table.columns().to_vec(),
            columns,
            view: table.view().clone(),
            features: table.options().features,
            editing: table.editing_cell().cloned(),
            can_edit: table.can_edit(),
            search_value: table.search().raw_input().to_string(),
            recent: table.search().recent().to_vec(),
            select_all,
            column_drag: (
                table.column_drag().source().cloned(),
                table.column_drag().target().cloned(),
            ),
            row_drag: (
                table.row_drag().source().cloned(),
                table.row_drag().target().cloned(),
            ),
            summary,
            page_items,
            page_count,
            page_size_options: table.options().page_size_options.clone(),
            filter_choices,
            presets: table
                .filter_presets()
                .iter()
                .map(|preset| preset.name.clone())
                .collect(),
            state_id: table
                .options()
                .state_id
                .clone()
                .unwrap_or_else(|| "grid".to_string()),
        }
    }

    fn is_drop_target<K: PartialEq>(drag: &(Option<K>, Option<K>), key: &K) -> bool {
        drag.1.as_ref() == Some(key) && drag.0.as_ref() != Some(key)
    }
}

fn display_value(column: &Column, value: Option<CellValue>) -> String {
    let text = value.unwrap_or_default().to_display_string();
    column.label_for(&text).map(ToString::to_string).unwrap_or(text)
}

fn mark_drag(event: &DragEvent, key: &str) {
    if let Some(transfer) = event.data_transfer() {
        if let Err(err) = transfer.set_data("text/plain", key) {
            console::error!("drag payload unavailable", err);
        }
    }
}

#[function_component(GridTable)]
pub(crate) fn grid_table(props: &GridTableProps) -> Html {
    let listeners = use_mut_ref(Listeners::default);
    *listeners.borrow_mut() = Listeners::from_props(props);
    let table = use_mut_ref(|| mount(props, &listeners));
    let handle = TableHandle {
        table: table.clone(),
        redraw: use_force_update(),
    };
    let select_all_ref = use_node_ref();

    {
        let handle = handle.clone();
        use_effect_with_deps(
            move |rows: &Rc<Vec<Record>>| {
                let changed = handle.table.borrow().rows() != rows.as_slice();
                if changed {
                    handle.table.borrow_mut().set_rows((**rows).clone());
                    handle.redraw.force_update();
                }
                || ()
            },
            props.rows.clone(),
        );
    }
    {
        let table = table.clone();
        use_effect_with_deps(move |_| move || table.borrow_mut().unmount(), ());
    }

    let snapshot = Snapshot::take(&mut table.borrow_mut());
    {
        let select_all_ref = select_all_ref.clone();
        let indeterminate = snapshot.select_all.1;
        use_effect(move || {
            if let Some(input) = select_all_ref.cast::<HtmlInputElement>() {
                input.set_indeterminate(indeterminate);
            }
            || ()
        });
    }

    let style = props.style;
    let features = snapshot.features;
    let has_actions = props.on_row_action.is_some();
    let leading = 1 + usize::from(features.row_expansion) + usize::from(features.draggable_rows);
    let colspan = leading + snapshot.columns.len() + usize::from(has_actions);

    let toolbar = render_toolbar(&handle, &snapshot);
    let header = render_header(&handle, &snapshot, style, &select_all_ref, has_actions);
    let body = if snapshot.rows.is_empty() {
        html! {
            <tr>
                <td colspan={colspan.to_string()} class="py-8 text-center text-base-content/60">
                    {"No matching rows"}
                </td>
            </tr>
        }
    } else {
        snapshot
            .rows
            .iter()
            .map(|row| render_row(&handle, &snapshot, style, row, has_actions, colspan))
            .collect::<Html>()
    };
    let footer = if features.pagination {
        html! {
            <PaginationBar
                summary={snapshot.summary}
                items={snapshot.page_items.clone()}
                current={snapshot.view.page().page}
                page_count={snapshot.page_count}
                page_size={snapshot.view.page().page_size}
                page_size_options={snapshot.page_size_options.clone()}
                on_page={handle.callback(|table, page: usize| {
                    table.set_page(page);
                })}
                on_page_size={handle.callback(|table, size: usize| {
                    table.set_page_size(size);
                })}
                on_jump={handle.callback(|table, input: String| {
                    table.jump_to_page(&input);
                })}
            />
        }
    } else {
        html! {}
    };

    html! {
        <div class="w-full rounded-box border border-base-300 bg-base-100 shadow-sm">
            {toolbar}
            <div class="overflow-x-auto">
                <table class={classes!(style.table_classes())}>
                    {header}
                    <tbody>{body}</tbody>
                </table>
            </div>
            {footer}
        </div>
    }
}

fn render_toolbar(handle: &TableHandle, snapshot: &Snapshot) -> Html {
    let on_search_input = {
        let handle = handle.clone();
        Callback::from(move |text: String| -> Option<SearchTicket> {
            let outcome = handle.table.borrow_mut().search_input(text);
            match outcome {
                SearchInput::Scheduled(ticket) => Some(ticket),
                SearchInput::Applied(_) => {
                    handle.redraw.force_update();
                    None
                }
            }
        })
    };
    let on_search_fire = handle.callback(|table, ticket: SearchTicket| {
        table.search_timer_fired(ticket);
    });
    let clear_filters = handle.callback(|table, _: MouseEvent| {
        table.clear_filters();
        table.clear_search();
    });
    let clear_selection = handle.callback(|table, _: MouseEvent| {
        table.clear_selection();
    });
    let filters_active = !snapshot.view.filters().is_empty() || !snapshot.search_value.is_empty();
    let selected = snapshot.view.selected_rows().len();

    let visibility = snapshot.all_columns.iter().map(|column| {
        let id = column.id.clone();
        let onchange = handle.callback(move |table, _: Event| {
            table.toggle_column_visibility(&id);
        });
        html! {
            <li>
                <label class="label cursor-pointer gap-2">
                    <input
                        type="checkbox"
                        class="checkbox checkbox-xs"
                        checked={snapshot.view.is_visible(&column.id)}
                        onchange={onchange}
                    />
                    {column.header.clone()}
                </label>
            </li>
        }
    });

    html! {
        <div class="flex flex-wrap items-center justify-between gap-2 border-b border-base-300 p-4">
            <SearchBox
                value={AttrValue::from(snapshot.search_value.clone())}
                placeholder={AttrValue::from("Search...")}
                recent={snapshot.recent.clone()}
                list_id={AttrValue::from(format!("{}-recent-searches", snapshot.state_id))}
                on_input={on_search_input}
                on_fire={on_search_fire}
            />
            <div class="flex items-center gap-2">
                {if selected > 0 {
                    html! {
                        <button class={classes!(button_classes(ButtonVariant::Ghost, ButtonSize::Sm))} onclick={clear_selection}>
                            {format!("{selected} selected ✕")}
                        </button>
                    }
                } else {
                    html! {}
                }}
                <button
                    class={classes!(button_classes(filter_button_variant(filters_active), ButtonSize::Sm))}
                    disabled={!filters_active}
                    onclick={clear_filters}>
                    {"Clear filters"}
                </button>
                {render_presets(handle, snapshot)}
                <div class="dropdown dropdown-end">
                    <div tabindex="0" role="button" class={classes!(button_classes(ButtonVariant::Outline, ButtonSize::Sm))}>
                        {"Columns"}
                    </div>
                    <ul tabindex="0" class="dropdown-content menu z-20 w-52 rounded-box bg-base-100 p-2 shadow">
                        {for visibility}
                    </ul>
                </div>
            </div>
        </div>
    }
}

fn render_presets(handle: &TableHandle, snapshot: &Snapshot) -> Html {
    let can_save = !snapshot.view.filters().is_empty();
    let name_ref = NodeRef::default();
    let save = {
        let name_ref = name_ref.clone();
        handle.callback(move |table, _: MouseEvent| {
            if let Some(input) = name_ref.cast::<HtmlInputElement>() {
                if table.save_filter_preset(&input.value()) {
                    input.set_value("");
                }
            }
        })
    };
    let saved = snapshot.presets.iter().map(|name| {
        let apply = {
            let name = name.clone();
            handle.callback(move |table, _: MouseEvent| {
                table.apply_filter_preset(&name);
            })
        };
        let remove = {
            let name = name.clone();
            handle.callback(move |table, _: MouseEvent| {
                table.remove_filter_preset(&name);
            })
        };
        html! {
            <li class="flex flex-row items-center justify-between">
                <button class={classes!(button_classes(ButtonVariant::Ghost, ButtonSize::Xs))} onclick={apply}>
                    {name.clone()}
                </button>
                <button
                    class={classes!(button_classes(ButtonVariant::Link, ButtonSize::Xs))}
                    aria-label={format!("Remove preset {name}")}
                    onclick={remove}>
                    {"✕"}
                </button>
            </li>
        }
    });
    html! {
        <div class="dropdown dropdown-end">
            <div tabindex="0" role="button" class={classes!(button_classes(ButtonVariant::Outline, ButtonSize::Sm))}>
                {"Presets"}
            </div>
            <ul tabindex="0" class="dropdown-content menu z-20 w-64 rounded-box bg-base-100 p-2 shadow">
                <li class="flex flex-row gap-1">
                    <input ref={name_ref} class="input input-xs flex-1" placeholder="Preset name" />
                    <button
                        class={classes!(button_classes(ButtonVariant::Primary, ButtonSize::Xs))}
                        disabled={!can_save}
                        onclick={save}>
                        {"Save"}
                    </button>
                </li>
                {for saved}
            </ul>
        </div>
    }
}

fn render_filter_cell(handle: &TableHandle, snapshot: &Snapshot, column: &Column) -> Html {
    let current = snapshot.view.filters().get(&column.id);
    let value = current.map(|filter| filter.value.clone()).unwrap_or_default();
    let op = current.map_or_else(|| FilterOp::default_for(column.kind), |filter| filter.op);
    let ops = FilterOp::supported_for(column.kind);

    let op_picker = if ops.len() > 1 {
        let id = column.id.clone();
        let onchange = handle.callback(move |table, event: Event| {
            let picked = event
                .target_dyn_into::<HtmlSelectElement>()
                .and_then(|select| FilterOp::parse(&select.value()));
            if let Some(op) = picked {
                table.set_filter_op(&id, op);
            }
        });
        html! {
            <select
                class="select select-xs w-full"
                aria-label={format!("Filter operator for {}", column.header)}
                onchange={onchange}>
                {for ops.iter().map(|candidate| html! {
                    <option value={candidate.as_str()} selected={*candidate == op}>
                        {candidate.label()}
                    </option>
                })}
            </select>
        }
    } else {
        html! {}
    };

    let choices = snapshot
        .filter_choices
        .get(&column.id)
        .filter(|_| op == FilterOp::Equals || !column.options.is_empty());
    let value_input = if let Some(choices) = choices {
        let id = column.id.clone();
        let onchange = handle.callback(move |table, event: Event| {
            if let Some(select) = event.target_dyn_into::<HtmlSelectElement>() {
                table.set_filter(&id, select.value());
            }
        });
        html! {
            <select
                class="select select-xs w-full"
                aria-label={format!("Filter {}", column.header)}
                onchange={onchange}>
                <option value="" selected={value.is_empty()}>{"All"}</option>
                {for choices.iter().map(|choice| html! {
                    <option value={choice.value.clone()} selected={choice.value == value}>
                        {choice.label.clone()}
                    </option>
                })}
            </select>
        }
    } else {
        let id = column.id.clone();
        let oninput = handle.callback(move |table, event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                table.set_filter(&id, input.value());
            }
        });
        html! {
            <input
                class="input input-xs w-full"
                placeholder={filter_placeholder(op)}
                aria-label={format!("Filter {}", column.header)}
                value={value}
                oninput={oninput}
            />
        }
    };

    html! {
        <th>
            <div class="flex flex-col gap-1">
                {op_picker}
                {value_input}
            </div>
        </th>
    }
}

fn render_header(
    handle: &TableHandle,
    snapshot: &Snapshot,
    style: TableStyle,
    select_all_ref: &NodeRef,
    has_actions: bool,
) -> Html {
    let features = snapshot.features;
    let toggle_all = handle.callback(|table, _: Event| {
        table.toggle_select_all();
    });
    let draggable = if features.draggable_columns { "true" } else { "false" };

    let headers = snapshot.columns.iter().enumerate().map(|(index, column)| {
        let id = column.id.clone();
        let direction = snapshot.view.sort().direction_for(&id);
        let drop_target = Snapshot::is_drop_target(&snapshot.column_drag, &id);
        let onclick = {
            let id = id.clone();
            handle.callback(move |table, _: MouseEvent| {
                table.sort_by(&id);
            })
        };
        let ondragstart = {
            let id = id.clone();
            handle.callback(move |table, event: DragEvent| {
                mark_drag(&event, &id);
                table.column_drag_start(&id);
            })
        };
        let ondragover = handle.callback(move |table, event: DragEvent| {
            event.prevent_default();
            table.column_drag_over(&id);
        });
        let ondragend = handle.callback(|table, _: DragEvent| {
            table.column_drag_end();
        });
        html! {
            <th
                class={classes!(style.header_classes(index == 0, column.sortable, drop_target))}
                aria-sort={style::aria_sort(direction)}
                draggable={draggable}
                onclick={onclick}
                ondragstart={ondragstart}
                ondragover={ondragover}
                ondrop={Callback::from(|event: DragEvent| event.prevent_default())}
                ondragend={ondragend}>
                {column.header.clone()}
                <span class="ml-1">{style::sort_indicator(direction)}</span>
            </th>
        }
    });

    let filters = snapshot
        .columns
        .iter()
        .map(|column| render_filter_cell(handle, snapshot, column));

    let (checked, _) = snapshot.select_all;
    html! {
        <thead>
            <tr>
                <th class="w-8">
                    <input
                        ref={select_all_ref.clone()}
                        type="checkbox"
                        class="checkbox checkbox-sm"
                        checked={checked}
                        disabled={!features.multi_select}
                        aria-label="Select all rows"
                        onchange={toggle_all}
                    />
                </th>
                {if features.row_expansion { html! { <th class="w-8"></th> } } else { html! {} }}
                {if features.draggable_rows { html! { <th class="w-8"></th> } } else { html! {} }}
                {for headers}
                {if has_actions { html! { <th>{"Actions"}</th> } } else { html! {} }}
            </tr>
            <tr>
                <th></th>
                {if features.row_expansion { html! { <th></th> } } else { html! {} }}
                {if features.draggable_rows { html! { <th></th> } } else { html! {} }}
                {for filters}
                {if has_actions { html! { <th></th> } } else { html! {} }}
            </tr>
        </thead>
    }
}

fn render_row(
    handle: &TableHandle,
    snapshot: &Snapshot,
    style: TableStyle,
    row: &Record,
    has_actions: bool,
    colspan: usize,
) -> Html {
    let features = snapshot.features;
    let row_id = row.row_id();
    let flags = RowFlags {
        selected: snapshot.view.selected_rows().contains(&row_id),
        expanded: snapshot.view.expanded_rows().contains(&row_id),
        dragging: snapshot.row_drag.0.as_ref() == Some(&row_id),
        drop_target: Snapshot::is_drop_target(&snapshot.row_drag, &row_id),
    };

    let toggle_selected = {
        let row_id = row_id.clone();
        handle.callback(move |table, _: Event| {
            table.toggle_row_selected(&row_id);
        })
    };
    let toggle_expanded = {
        let row_id = row_id.clone();
        handle.callback(move |table, _: MouseEvent| {
            table.toggle_row_expanded(&row_id);
        })
    };
    let ondragstart = {
        let row_id = row_id.clone();
        handle.callback(move |table, event: DragEvent| {
            mark_drag(&event, row_id.as_str());
            table.row_drag_start(&row_id);
        })
    };
    let ondragover = {
        let row_id = row_id.clone();
        handle.callback(move |table, event: DragEvent| {
            event.prevent_default();
            table.row_drag_over(&row_id);
        })
    };
    let ondragend = handle.callback(|table, _: DragEvent| {
        table.row_drag_end();
    });

    let cells = snapshot.columns.iter().enumerate().map(|(index, column)| {
        let editable = snapshot.can_edit && column.is_editable();
        let ondblclick = {
            let row_id = row_id.clone();
            let column_id = column.id.clone();
            handle.callback(move |table, _: MouseEvent| {
                table.cell_double_click(&row_id, &column_id);
            })
        };
        let content = match snapshot
            .editing
            .as_ref()
            .filter(|cell| cell.row_id == row_id && cell.column_id == column.id)
        {
            Some(cell) => render_editor(handle, cell),
            None => html! { {display_value(column, row.field(&column.id))} },
        };
        html! {
            <td class={classes!(style.cell_classes(index == 0, editable))} ondblclick={ondblclick}>
                {content}
            </td>
        }
    });

    let actions = if has_actions {
        let action_button = |action: RowAction, variant: ButtonVariant, label: &'static str| {
            let row_id = row_id.clone();
            let onclick = handle.callback(move |table, _: MouseEvent| {
                table.row_action(&row_id, &action);
            });
            html! {
                <button class={classes!(button_classes(variant, ButtonSize::Sm))} onclick={onclick}>
                    {label}
                </button>
            }
        };
        html! {
            <td>
                <div class="flex gap-1">
                    {action_button(RowAction::Edit, ButtonVariant::Primary, "Edit")}
                    {action_button(RowAction::Delete, ButtonVariant::Destructive, "Delete")}
                </div>
            </td>
        }
    } else {
        html! {}
    };

    let details = if flags.expanded && features.row_expansion {
        html! {
            <tr>
                <td colspan={colspan.to_string()} class="bg-base-200">
                    <dl class="grid grid-cols-2 gap-x-4 gap-y-1 text-sm md:grid-cols-4">
                        {for snapshot.all_columns.iter().map(|column| html! {
                            <>
                                <dt class="font-semibold">{column.header.clone()}</dt>
                                <dd>{display_value(column, row.field(&column.id))}</dd>
                            </>
                        })}
                    </dl>
                </td>
            </tr>
        }
    } else {
        html! {}
    };

    html! {
        <>
            <tr
                class={classes!(style.row_classes(flags))}
                draggable={if features.draggable_rows { "true" } else { "false" }}
                ondragstart={ondragstart}
                ondragover={ondragover}
                ondrop={Callback::from(|event: DragEvent| event.prevent_default())}
                ondragend={ondragend}>
                <td>
                    <input
                        type="checkbox"
                        class="checkbox checkbox-sm"
                        checked={flags.selected}
                        aria-label={format!("Select row {row_id}")}
                        onchange={toggle_selected}
                    />
                </td>
                {if features.row_expansion {
                    html! {
                        <td>
                            <button
                                class={classes!(button_classes(ButtonVariant::Ghost, ButtonSize::Icon), "btn-xs")}
                                aria-expanded={flags.expanded.to_string()}
                                onclick={toggle_expanded}>
                                {if flags.expanded { "▾" } else { "▸" }}
                            </button>
                        </td>
                    }
                } else {
                    html! {}
                }}
                {if features.draggable_rows {
                    html! { <td class="cursor-move text-base-content/50">{"⠿"}</td> }
                } else {
                    html! {}
                }}
                {for cells}
                {actions}
            </tr>
            {details}
        </>
    }
}

fn render_editor(handle: &TableHandle, cell: &EditingCell) -> Html {
    let oninput = handle.callback(|table, event: InputEvent| {
        if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
            table.edit_input(input.value());
        }
    });
    let onkeydown = handle.callback(|table, event: KeyboardEvent| {
        table.edit_key(EditKey::from_key(&event.key()));
    });
    let onblur = handle.callback(|table, _: FocusEvent| {
        table.edit_blur();
    });
    html! {
        <input
            class="input input-sm w-full"
            value={cell.draft.clone()}
            oninput={oninput}
            onkeydown={onkeydown}
            onblur={onblur}
        />
    }
}
