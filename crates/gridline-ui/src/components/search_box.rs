//! Debounced global search box.
//!
//! # Design
//! - Keep local input state for immediate typing feedback.
//! - The table decides whether a keystroke applies now or yields a ticket; tickets wait in
//!   a `Timeout` and are handed back when it elapses.
//! - Replacing the stored `Timeout` drops the previous one, which cancels it.

use gloo_timers::callback::Timeout;
use gridline_core::SearchTicket;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct SearchBoxProps {
    #[prop_or_default]
    pub value: AttrValue,
    #[prop_or_default]
    pub placeholder: Option<AttrValue>,
    #[prop_or_default]
    pub recent: Vec<String>,
    pub list_id: AttrValue,
    #[prop_or_default]
    pub disabled: bool,
    pub on_input: Callback<String, Option<SearchTicket>>,
    pub on_fire: Callback<SearchTicket>,
}

#[function_component(SearchBox)]
pub(crate) fn search_box(props: &SearchBoxProps) -> Html {
    let value_state = use_state(|| props.value.to_string());
    let timer = use_mut_ref(|| None as Option<Timeout>);

    {
        let value_state = value_state.clone();
        let incoming = props.value.clone();
        use_effect_with_deps(
            move |incoming| {
                let next = incoming.to_string();
                if *value_state != next {
                    value_state.set(next);
                }
                || ()
            },
            incoming,
        );
    }

    {
        let timer = timer.clone();
        use_effect_with_deps(
            move |_| {
                move || {
                    timer.borrow_mut().take();
                }
            },
            (),
        );
    }

    let oninput = {
        let on_input = props.on_input.clone();
        let on_fire = props.on_fire.clone();
        let value_state = value_state.clone();
        Callback::from(move |event: InputEvent| {
            let Some(input) = event.target_dyn_into::<HtmlInputElement>() else {
                return;
            };
            let next = input.value();
            value_state.set(next.clone());
            let scheduled = on_input.emit(next).map(|ticket| {
                let on_fire = on_fire.clone();
                Timeout::new(ticket.delay_ms, move || on_fire.emit(ticket))
            });
            *timer.borrow_mut() = scheduled;
        })
    };

    html! {
        <label class={classes!("input", "input-sm", "w-full", "max-w-xs")}>
            <span class="iconify lucide--search text-base-content/80 size-3.5"></span>
            <input
                class="grow"
                type="search"
                list={props.list_id.clone()}
                placeholder={props.placeholder.clone()}
                value={AttrValue::from((*value_state).clone())}
                aria-label="Search table"
                disabled={props.disabled}
                oninput={oninput}
            />
            <datalist id={props.list_id.clone()}>
                {for props.recent.iter().map(|term| html! { <option value={term.clone()} /> })}
            </datalist>
        </label>
    }
}
