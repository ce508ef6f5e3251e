//! Page navigation footer.

use gridline_core::{PageItem, PageSummary};
use web_sys::{HtmlInputElement, HtmlSelectElement, KeyboardEvent};
use yew::prelude::*;

use crate::style::{ButtonSize, ButtonVariant, button_classes, page_button_variant};

#[derive(Properties, PartialEq)]
pub(crate) struct PaginationBarProps {
    pub summary: PageSummary,
    pub items: Vec<PageItem>,
    pub current: usize,
    pub page_count: usize,
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
    pub on_page: Callback<usize>,
    pub on_page_size: Callback<usize>,
    pub on_jump: Callback<String>,
}

#[function_component(PaginationBar)]
pub(crate) fn pagination_bar(props: &PaginationBarProps) -> Html {
    let current = props.current;
    let page_count = props.page_count;
    let nav_classes = |variant| classes!(button_classes(variant, ButtonSize::Sm), "join-item");

    let go_prev = {
        let on_page = props.on_page.clone();
        Callback::from(move |_| {
            if current > 1 {
                on_page.emit(current - 1);
            }
        })
    };
    let go_next = {
        let on_page = props.on_page.clone();
        Callback::from(move |_| {
            if current < page_count {
                on_page.emit(current + 1);
            }
        })
    };
    let on_size = {
        let on_page_size = props.on_page_size.clone();
        Callback::from(move |event: Event| {
            let Some(select) = event.target_dyn_into::<HtmlSelectElement>() else {
                return;
            };
            if let Ok(size) = select.value().parse::<usize>() {
                on_page_size.emit(size);
            }
        })
    };
    let on_jump = {
        let on_jump = props.on_jump.clone();
        Callback::from(move |event: KeyboardEvent| {
            if event.key() != "Enter" {
                return;
            }
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                on_jump.emit(input.value());
                input.set_value("");
            }
        })
    };

    let buttons = props.items.iter().map(|item| match *item {
        PageItem::Page { number, current } => {
            let on_page = props.on_page.clone();
            html! {
                <button
                    class={nav_classes(page_button_variant(current))}
                    aria-current={current.then_some("page")}
                    onclick={Callback::from(move |_| on_page.emit(number))}>
                    {number}
                </button>
            }
        }
        PageItem::Ellipsis => html! {
            <button class={nav_classes(ButtonVariant::Ghost)} disabled={true}>{"…"}</button>
        },
    });

    let summary = props.summary;
    html! {
        <div class="flex flex-wrap items-center justify-between gap-x-4 gap-y-2 border-t border-base-300 px-4 py-3">
            <span class="text-sm text-base-content/70">
                {format!("Showing {} to {} of {}", summary.first, summary.last, summary.total)}
            </span>
            <div class="flex items-center gap-2">
                <select class="select select-sm" aria-label="Rows per page" onchange={on_size}>
                    {for props.page_size_options.iter().map(|size| html! {
                        <option value={size.to_string()} selected={*size == props.page_size}>
                            {format!("{size} / page")}
                        </option>
                    })}
                </select>
                <div class="join">
                    <button class={nav_classes(ButtonVariant::Outline)} disabled={current <= 1} onclick={go_prev}>{"«"}</button>
                    {for buttons}
                    <button class={nav_classes(ButtonVariant::Outline)} disabled={current >= page_count} onclick={go_next}>{"»"}</button>
                </div>
                <input
                    class="input input-sm w-20"
                    type="number"
                    min="1"
                    max={page_count.max(1).to_string()}
                    placeholder="Go to"
                    aria-label="Jump to page"
                    onkeydown={on_jump}
                />
            </div>
        </div>
    }
}
