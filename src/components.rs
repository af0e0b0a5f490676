//! Yew view components for the contractors dashboard.
//!
//! Components only render what they are given and report user input
//! through callbacks; all filter logic lives in the library.

use crate::config::{DISTANCE_PRESETS, TIER_BADGES};
use crate::hooks::use_element_width;
use crate::utils::{bubble_offset, input_value, slider_number};
use contractor_dashboard::controller::{DropdownId, SearchableSelect};
use contractor_dashboard::render::{SummarySlots, TableRow, TABLE_HEADERS};
use yew::prelude::*;

/// Renders the contractor grid: header cells followed by four cells per row.
pub fn render_contractors_table(rows: &[TableRow]) -> Html {
    html! {
        <div id="contractors-table" class="contractors-table">
            { TABLE_HEADERS.iter().map(|header| html! {
                <div class="contractor-header">{ *header }</div>
            }).collect::<Html>() }
            { rows.iter().map(|row| html! {
                <>
                    { row.cells.iter().map(|cell| html! {
                        <div class="contractor-row">{ cell.clone() }</div>
                    }).collect::<Html>() }
                </>
            }).collect::<Html>() }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct SummaryCardsProps {
    pub slots: SummarySlots,
}

#[function_component(SummaryCards)]
pub fn summary_cards(props: &SummaryCardsProps) -> Html {
    html! {
        <div class="stats">
            <div class="stat-card">
                <span id="active-count" class="stat-value">{ props.slots.active_count.clone() }</span>
                <span class="stat-label">{ "Active Contractors" }</span>
            </div>
            <div class="stat-card">
                <span id="jobs-count" class="stat-value">{ props.slots.jobs_count.clone() }</span>
                <span class="stat-label">{ "Jobs" }</span>
            </div>
            <div class="stat-card">
                <span id="miles-count" class="stat-value">{ props.slots.miles_count.clone() }</span>
                <span class="stat-label">{ "Total Miles" }</span>
            </div>
        </div>
    }
}

/// Tier selector; `active[i]` marks the badge at `TIER_BADGES[i]`.
#[derive(Properties, PartialEq)]
pub struct TierBadgesProps {
    pub active: Vec<bool>,
    pub onselect: Callback<&'static str>,
}

#[function_component(TierBadges)]
pub fn tier_badges(props: &TierBadgesProps) -> Html {
    html! {
        <div class="tier-badges">
            { TIER_BADGES.iter().enumerate().map(|(i, (value, caption))| {
                let onselect = props.onselect.clone();
                let value: &'static str = value;
                let active = props.active.get(i).copied().unwrap_or(false);
                html! {
                    <button
                        class={classes!("tier-badge", active.then_some("active"))}
                        data-tier={value}
                        onclick={Callback::from(move |_| onselect.emit(value))}
                    >
                        { *caption }
                    </button>
                }
            }).collect::<Html>() }
        </div>
    }
}

/// Range input with a floating bubble showing its value.
#[derive(Properties, PartialEq)]
pub struct RangeSliderProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub min: u32,
    pub max: u32,
    pub step: u32,
    pub value: f64,
    pub oninput: Callback<f64>,
}

#[function_component(RangeSlider)]
pub fn range_slider(props: &RangeSliderProps) -> Html {
    let slider_ref = use_node_ref();
    let track_width = use_element_width(slider_ref.clone(), props.value);
    let offset = bubble_offset(
        props.value,
        f64::from(props.min),
        f64::from(props.max),
        track_width,
    );

    let oninput = {
        let oninput = props.oninput.clone();
        Callback::from(move |e: InputEvent| oninput.emit(slider_number(&input_value(&e))))
    };

    html! {
        <div class="form-group">
            <label for={props.id.clone()}>{ props.label.clone() }</label>
            <div class="slider-with-bubble">
                <input type="range"
                    id={props.id.clone()}
                    ref={slider_ref}
                    min={props.min.to_string()}
                    max={props.max.to_string()}
                    step={props.step.to_string()}
                    value={props.value.to_string()}
                    {oninput}
                />
                <span
                    id={format!("{}-bubble", props.id.trim_end_matches("-slider"))}
                    class="slider-bubble"
                    style={format!("left: {}px", offset)}
                >
                    { props.value.to_string() }
                </span>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct DistancePresetsProps {
    pub onselect: Callback<f64>,
}

#[function_component(DistancePresets)]
pub fn distance_presets(props: &DistancePresetsProps) -> Html {
    html! {
        <div class="distance-presets">
            { DISTANCE_PRESETS.iter().map(|&miles| {
                let onselect = props.onselect.clone();
                html! {
                    <button
                        class="preset-btn"
                        data-value={miles.to_string()}
                        onclick={Callback::from(move |_| onselect.emit(f64::from(miles)))}
                    >
                        { format!("{} mi", miles) }
                    </button>
                }
            }).collect::<Html>() }
        </div>
    }
}

/// Dropdown with an option search box.
#[derive(Properties, PartialEq)]
pub struct SearchableSelectViewProps {
    pub id: DropdownId,
    pub select: SearchableSelect,
    pub ontoggle: Callback<()>,
    pub onquery: Callback<String>,
    pub onselect: Callback<String>,
}

#[function_component(SearchableSelectView)]
pub fn searchable_select_view(props: &SearchableSelectViewProps) -> Html {
    // Clicks inside the widget must not reach the document click listener.
    let onclick_inside = Callback::from(|e: MouseEvent| e.stop_propagation());
    let ontoggle = {
        let ontoggle = props.ontoggle.clone();
        Callback::from(move |_: MouseEvent| ontoggle.emit(()))
    };
    let onquery = {
        let onquery = props.onquery.clone();
        Callback::from(move |e: InputEvent| onquery.emit(input_value(&e)))
    };

    html! {
        <div
            id={props.id.element_id()}
            class={classes!("searchable-select", props.select.is_open().then_some("open"))}
            onclick={onclick_inside}
        >
            <input
                class="select-input"
                readonly=true
                value={props.select.caption().to_string()}
                onclick={ontoggle}
            />
            <div class="select-dropdown">
                <input
                    class="search-box"
                    placeholder="Search..."
                    value={props.select.query().to_string()}
                    oninput={onquery}
                />
                { props.select.options().iter().map(|option| {
                    let onselect = props.onselect.clone();
                    let value = option.value.clone();
                    let display = if props.select.is_visible(option) { "block" } else { "none" };
                    html! {
                        <div
                            class="option"
                            data-value={option.value.clone()}
                            style={format!("display: {}", display)}
                            onclick={Callback::from(move |_| onselect.emit(value.clone()))}
                        >
                            { option.label.clone() }
                        </div>
                    }
                }).collect::<Html>() }
            </div>
        </div>
    }
}
