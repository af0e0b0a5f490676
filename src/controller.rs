//! Dashboard state machine driven by user actions.
//!
//! `Dashboard` owns the live filter state and the snapshot last applied to
//! the table. Actions mutate the live state; only `DashboardAction::Apply`
//! copies it into the snapshot, which is what the renderer and the address
//! bar read.

use crate::debounce::{Debouncer, Scheduler};
use crate::filters::{FilterKey, FilterState, FilterValue};
use crate::predicate::filter_contractors;
use crate::render::DashboardView;
use crate::{defaults, observed_service_types, observed_states, Contractor};
use log::{debug, warn};
use std::rc::Rc;
use yew::functional::Reducible;

/// The two searchable select widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropdownId {
    State,
    Service,
}

impl DropdownId {
    pub const ALL: [DropdownId; 2] = [DropdownId::State, DropdownId::Service];

    pub fn filter_key(self) -> FilterKey {
        match self {
            DropdownId::State => FilterKey::State,
            DropdownId::Service => FilterKey::ServiceType,
        }
    }

    /// Caption shown while the "all" option is selected.
    pub fn all_caption(self) -> &'static str {
        match self {
            DropdownId::State => "All States",
            DropdownId::Service => "All Services",
        }
    }

    /// Element id of the widget container.
    pub fn element_id(self) -> &'static str {
        match self {
            DropdownId::State => "state-filter",
            DropdownId::Service => "service-filter",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Open/closed state, option search and caption of one dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchableSelect {
    options: Vec<SelectOption>,
    open: bool,
    query: String,
    caption: String,
}

impl SearchableSelect {
    /// Builds a widget whose first option is "all" with `all_caption`.
    pub fn new(all_caption: &str, options: impl IntoIterator<Item = SelectOption>) -> Self {
        let mut all = vec![SelectOption {
            value: defaults::ALL.to_string(),
            label: all_caption.to_string(),
        }];
        all.extend(options);
        Self {
            options: all,
            open: false,
            query: String::new(),
            caption: all_caption.to_string(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Options whose label contains the search box text, ignoring case.
    pub fn visible_options(&self) -> Vec<&SelectOption> {
        self.options
            .iter()
            .filter(|option| self.is_visible(option))
            .collect()
    }

    pub fn is_visible(&self, option: &SelectOption) -> bool {
        option
            .label
            .to_lowercase()
            .contains(&self.query.to_lowercase())
    }

    fn option(&self, value: &str) -> Option<&SelectOption> {
        self.options.iter().find(|option| option.value == value)
    }

    /// Show the caption of the option matching `value`. Values with no
    /// matching option leave the caption alone.
    fn sync_caption(&mut self, value: &FilterValue) {
        let label = self
            .option(&value.to_string())
            .map(|option| option.label.clone());
        if let Some(label) = label {
            self.caption = label;
        }
    }
}

/// One user interaction, or the apply cycle itself.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardAction {
    SearchInput(String),
    TierSelected(FilterValue),
    DistanceSlid(f64),
    DistancePreset(f64),
    ReviewsSlid(f64),
    ToggleDropdown(DropdownId),
    DropdownQuery(DropdownId, String),
    SelectOption(DropdownId, String),
    CloseDropdowns,
    ClearFilters,
    /// Recompute the table and summary from the live filters.
    Apply,
}

/// When an action is followed by an apply cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyMode {
    Immediate,
    Debounced,
    None,
}

impl DashboardAction {
    pub fn apply_mode(&self) -> ApplyMode {
        match self {
            DashboardAction::SearchInput(_)
            | DashboardAction::DistanceSlid(_)
            | DashboardAction::ReviewsSlid(_) => ApplyMode::Debounced,
            DashboardAction::TierSelected(_)
            | DashboardAction::DistancePreset(_)
            | DashboardAction::SelectOption(..)
            | DashboardAction::ClearFilters => ApplyMode::Immediate,
            // Apply is the cycle; the rest never touch filter state.
            DashboardAction::ToggleDropdown(_)
            | DashboardAction::DropdownQuery(..)
            | DashboardAction::CloseDropdowns
            | DashboardAction::Apply => ApplyMode::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    contractors: Rc<Vec<Contractor>>,
    filters: FilterState,
    applied: FilterState,
    apply_count: u64,
    state_select: SearchableSelect,
    service_select: SearchableSelect,
}

impl Dashboard {
    /// Dashboard showing `filters` as already applied, with every widget
    /// synchronized to them.
    pub fn new(contractors: Rc<Vec<Contractor>>, filters: FilterState) -> Self {
        let state_select = SearchableSelect::new(
            DropdownId::State.all_caption(),
            observed_states(&contractors)
                .into_iter()
                .map(|code| SelectOption {
                    label: code.clone(),
                    value: code,
                }),
        );
        let service_select = SearchableSelect::new(
            DropdownId::Service.all_caption(),
            observed_service_types(&contractors)
                .into_iter()
                .map(|service| SelectOption {
                    label: capitalize(&service),
                    value: service,
                }),
        );

        let mut dashboard = Self {
            contractors,
            applied: filters.clone(),
            filters,
            apply_count: 1,
            state_select,
            service_select,
        };
        dashboard.sync_captions();
        dashboard
    }

    pub fn contractors(&self) -> &[Contractor] {
        &self.contractors
    }

    /// Live filter state, updated by every action.
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Filter state as of the last apply cycle.
    pub fn applied(&self) -> &FilterState {
        &self.applied
    }

    /// Number of apply cycles run, the initial render included.
    pub fn apply_count(&self) -> u64 {
        self.apply_count
    }

    pub fn dropdown(&self, id: DropdownId) -> &SearchableSelect {
        match id {
            DropdownId::State => &self.state_select,
            DropdownId::Service => &self.service_select,
        }
    }

    fn dropdown_mut(&mut self, id: DropdownId) -> &mut SearchableSelect {
        match id {
            DropdownId::State => &mut self.state_select,
            DropdownId::Service => &mut self.service_select,
        }
    }

    pub fn search_text(&self) -> String {
        self.filters.get(FilterKey::Search).to_string()
    }

    pub fn tier_is_active(&self, badge: &FilterValue) -> bool {
        let tier = self.filters.get(FilterKey::Tier);
        if tier.is_all() || badge.is_all() {
            return tier.is_all() && badge.is_all();
        }
        // "2" from a badge and 2 from the address are the same tier
        matches!((tier.as_number(), badge.as_number()), (Some(a), Some(b)) if a == b)
    }

    /// Slider position for a numeric filter; non-numeric values show the default.
    pub fn slider_value(&self, key: FilterKey) -> f64 {
        self.filters
            .get(key)
            .as_number()
            .or_else(|| key.default_value().as_number())
            .unwrap_or_default()
    }

    /// Table rows and summary slots for the applied snapshot.
    pub fn view(&self) -> DashboardView {
        DashboardView::build(&filter_contractors(&self.contractors, &self.applied))
    }

    pub fn handle(&mut self, action: DashboardAction) {
        debug!("Handling {:?}", action);
        match action {
            DashboardAction::SearchInput(text) => {
                self.filters.set(FilterKey::Search, FilterValue::Text(text))
            }
            DashboardAction::TierSelected(tier) => self.filters.set(FilterKey::Tier, tier),
            DashboardAction::DistanceSlid(miles) | DashboardAction::DistancePreset(miles) => {
                self.filters.set(FilterKey::MaxDistance, miles)
            }
            DashboardAction::ReviewsSlid(count) => self.filters.set(FilterKey::MinReviews, count),
            DashboardAction::ToggleDropdown(id) => {
                let open = !self.dropdown(id).is_open();
                self.close_dropdowns();
                self.dropdown_mut(id).open = open;
            }
            DashboardAction::DropdownQuery(id, query) => self.dropdown_mut(id).query = query,
            DashboardAction::SelectOption(id, value) => self.select_option(id, value),
            DashboardAction::CloseDropdowns => self.close_dropdowns(),
            DashboardAction::ClearFilters => {
                self.filters.reset();
                self.sync_captions();
            }
            DashboardAction::Apply => {
                self.applied = self.filters.clone();
                self.apply_count += 1;
            }
        }
    }

    fn select_option(&mut self, id: DropdownId, value: String) {
        let select = self.dropdown_mut(id);
        let Some(label) = select.option(&value).map(|option| option.label.clone()) else {
            warn!("Ignoring unknown option '{}' for {}", value, id.element_id());
            return;
        };
        select.caption = label;
        select.open = false;
        self.filters.set(id.filter_key(), FilterValue::Text(value));
    }

    fn close_dropdowns(&mut self) {
        for id in DropdownId::ALL {
            self.dropdown_mut(id).open = false;
        }
    }

    fn sync_captions(&mut self) {
        for id in DropdownId::ALL {
            let value = self.filters.get(id.filter_key()).clone();
            self.dropdown_mut(id).sync_caption(&value);
        }
    }
}

impl Reducible for Dashboard {
    type Action = DashboardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.handle(action);
        Rc::new(next)
    }
}

/// Dispatch `action` and follow it with an apply cycle according to its
/// `ApplyMode`: right away, through `debouncer`, or not at all.
pub fn dispatch_with_apply<S, F>(action: DashboardAction, debouncer: &Debouncer<S>, dispatch: F)
where
    S: Scheduler,
    F: Fn(DashboardAction) + Clone + 'static,
{
    let mode = action.apply_mode();
    dispatch(action);
    match mode {
        ApplyMode::Immediate => dispatch(DashboardAction::Apply),
        ApplyMode::Debounced => debouncer.call(move || dispatch(DashboardAction::Apply)),
        ApplyMode::None => {}
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
