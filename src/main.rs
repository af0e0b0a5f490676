//! Main module for the contractors dashboard using Yew.
//! Wires UI components to the dashboard state machine and the address bar.

use contractor_dashboard::{
    controller::{dispatch_with_apply, Dashboard, DashboardAction, DropdownId},
    debounce::{Debouncer, TimeoutScheduler},
    defaults::DEBOUNCE_MS,
    filters::{FilterKey, FilterValue},
    url_sync::{load_from_address_bar, write_to_address_bar},
    SAMPLE_CONTRACTORS,
};
use log::info;
use std::rc::Rc;
use yew::prelude::*;

mod components;
mod config;
mod hooks;
mod utils;

use components::{
    render_contractors_table, DistancePresets, RangeSlider, SearchableSelectView, SummaryCards,
    TierBadges,
};
use config::*;
use hooks::use_document_click;
use utils::input_value;

/// Primary application component wiring state, effects, and UI elements.
#[function_component(Main)]
fn main_component() -> Html {
    let dashboard = use_reducer(|| {
        let filters = load_from_address_bar();
        info!("Initial filters: {:?}", filters);
        Dashboard::new(Rc::new(SAMPLE_CONTRACTORS.to_vec()), filters)
    });
    let debouncer = use_memo((), |_| Debouncer::new(TimeoutScheduler, DEBOUNCE_MS));

    // Every user action goes through here so it is followed by the right
    // kind of apply cycle.
    let send = {
        let dispatcher = dashboard.dispatcher();
        let debouncer = debouncer.clone();
        Callback::from(move |action: DashboardAction| {
            let dispatcher = dispatcher.clone();
            dispatch_with_apply(action, &debouncer, move |next| dispatcher.dispatch(next));
        })
    };

    // Mirror each apply cycle into the address bar
    {
        let applied = dashboard.applied().clone();
        use_effect_with((dashboard.apply_count(), applied), |(_, applied)| {
            write_to_address_bar(applied);
            || ()
        });
    }

    // A click anywhere outside a dropdown widget closes the open ones
    use_document_click(send.reform(|_: ()| DashboardAction::CloseDropdowns));

    let on_search = send.reform(|e: InputEvent| DashboardAction::SearchInput(input_value(&e)));
    let on_tier = send.reform(|value: &'static str| {
        DashboardAction::TierSelected(FilterValue::coerce(value))
    });
    let on_distance = send.reform(DashboardAction::DistanceSlid);
    let on_preset = send.reform(DashboardAction::DistancePreset);
    let on_reviews = send.reform(DashboardAction::ReviewsSlid);
    let on_clear = send.reform(|_: MouseEvent| DashboardAction::ClearFilters);
    let on_apply = send.reform(|_: MouseEvent| DashboardAction::Apply);

    let tier_active: Vec<bool> = TIER_BADGES
        .iter()
        .map(|(value, _)| dashboard.tier_is_active(&FilterValue::coerce(value)))
        .collect();

    let dropdown = |id: DropdownId| {
        html! {
            <SearchableSelectView
                {id}
                select={dashboard.dropdown(id).clone()}
                ontoggle={send.reform(move |_: ()| DashboardAction::ToggleDropdown(id))}
                onquery={send.reform(move |query: String| DashboardAction::DropdownQuery(id, query))}
                onselect={send.reform(move |value: String| DashboardAction::SelectOption(id, value))}
            />
        }
    };

    let view = dashboard.view();

    html! {
        <div class="container">
            <header class="header">
                <h1>{ PAGE_TITLE }</h1>
            </header>

            <SummaryCards slots={view.slots.clone()} />

            <div class="filters-panel">
                <div class="form-group">
                    <input
                        id="search-input"
                        type="text"
                        placeholder="Search by name or city..."
                        value={dashboard.search_text()}
                        oninput={on_search}
                    />
                </div>

                <TierBadges active={tier_active} onselect={on_tier} />

                { dropdown(DropdownId::State) }
                { dropdown(DropdownId::Service) }

                <RangeSlider
                    id="distance-slider"
                    label="Max Distance (miles)"
                    min={DISTANCE_MIN}
                    max={DISTANCE_MAX}
                    step={DISTANCE_STEP}
                    value={dashboard.slider_value(FilterKey::MaxDistance)}
                    oninput={on_distance}
                />
                <DistancePresets onselect={on_preset} />

                <RangeSlider
                    id="reviews-slider"
                    label="Minimum Reviews"
                    min={REVIEWS_MIN}
                    max={REVIEWS_MAX}
                    step={REVIEWS_STEP}
                    value={dashboard.slider_value(FilterKey::MinReviews)}
                    oninput={on_reviews}
                />

                <div class="filter-actions">
                    <button id="clear-filters" class="btn-secondary" onclick={on_clear}>
                        { "Clear Filters" }
                    </button>
                    <button id="apply-filters" class="btn-primary" onclick={on_apply}>
                        { "Apply Filters" }
                    </button>
                </div>
            </div>

            // Results section
            <div class="results-area">
                { render_contractors_table(&view.rows) }
            </div>
        </div>
    }
}

/// App wrapper.
#[function_component]
pub fn App() -> Html {
    html! {
        <Main />
    }
}

/// Entry point: installs the panic hook and initializes the Yew renderer.
fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
