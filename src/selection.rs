//! Option Selection & Aggregation Engine.
//!
//! A [`CostSheet`] holds the priced options surfaced for one derivation,
//! tracks which option is selected per category, and recomputes the grand
//! total on demand from current state — there is no cached total to go
//! stale. Sheets are built fresh every time the option lists are derived,
//! so a recompute resets every selection by construction.

use serde::Serialize;
use uuid::Uuid;

use crate::pricing::modes::{cheapest, CostCategory, ModeEstimate, PricedOption};

/// Selection state for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryState {
    /// The category contributes its base value: the default option's cost,
    /// or 0 when the category has no default (inactive, or an opt-in line
    /// item like the moving truck).
    #[default]
    Unselected,
    /// The category contributes exactly this option's cost.
    Selected(Uuid),
}

/// One selectable category: its options, the option backing the base cost,
/// and the current selection.
#[derive(Debug, Clone, Default)]
pub struct CategorySlot {
    options: Vec<PricedOption>,
    default_id: Option<Uuid>,
    state: CategoryState,
    used_fallback: bool,
}

impl CategorySlot {
    pub fn new(options: Vec<PricedOption>, default_id: Option<Uuid>, used_fallback: bool) -> Self {
        Self {
            options,
            default_id,
            state: CategoryState::Unselected,
            used_fallback,
        }
    }

    /// A slot with no options at all; contributes 0 until the query
    /// activates the category.
    pub fn inactive() -> Self {
        Self::default()
    }

    pub fn from_estimate(estimate: ModeEstimate) -> Self {
        Self::new(estimate.options, estimate.default_id, estimate.used_fallback)
    }

    /// Options with a default backed by the cheapest row.
    pub fn with_cheapest_default(options: Vec<PricedOption>, used_fallback: bool) -> Self {
        let default_id = cheapest(&options).map(|o| o.id);
        Self::new(options, default_id, used_fallback)
    }

    pub fn options(&self) -> &[PricedOption] {
        &self.options
    }

    pub fn state(&self) -> CategoryState {
        self.state
    }

    pub fn default_id(&self) -> Option<Uuid> {
        self.default_id
    }

    pub fn used_fallback(&self) -> bool {
        self.used_fallback
    }

    fn cost_of(&self, id: Uuid) -> Option<i64> {
        self.options.iter().find(|o| o.id == id).map(|o| o.cost)
    }

    /// What this category currently adds to the grand total.
    pub fn contribution(&self) -> i64 {
        match self.state {
            CategoryState::Selected(id) => self.cost_of(id).unwrap_or(0),
            CategoryState::Unselected => self
                .default_id
                .and_then(|id| self.cost_of(id))
                .unwrap_or(0),
        }
    }

    /// Toggle `id` within this slot. Returns false if the option does not
    /// belong here (or is not selectable), leaving the state untouched.
    fn toggle(&mut self, id: Uuid) -> bool {
        let Some(option) = self.options.iter().find(|o| o.id == id) else {
            return false;
        };
        if !option.selectable {
            return false;
        }
        self.state = if self.state == CategoryState::Selected(id) {
            CategoryState::Unselected
        } else {
            CategoryState::Selected(id)
        };
        true
    }
}

/// The four category totals and their sum. Always derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GrandTotal {
    pub housing: i64,
    pub travel: i64,
    pub moving_truck: i64,
    pub moving_help: i64,
    pub total: i64,
}

/// Selection state machine over one derivation's priced options.
#[derive(Debug, Clone)]
pub struct CostSheet {
    housing: i64,
    housing_fallback: bool,
    travel: CategorySlot,
    moving_truck: CategorySlot,
    moving_help: CategorySlot,
}

impl CostSheet {
    pub fn new(
        housing: i64,
        housing_fallback: bool,
        travel: CategorySlot,
        moving_truck: CategorySlot,
        moving_help: CategorySlot,
    ) -> Self {
        Self {
            housing,
            housing_fallback,
            travel,
            moving_truck,
            moving_help,
        }
    }

    pub fn housing(&self) -> i64 {
        self.housing
    }

    pub fn housing_used_fallback(&self) -> bool {
        self.housing_fallback
    }

    pub fn slot(&self, category: CostCategory) -> &CategorySlot {
        match category {
            CostCategory::Travel => &self.travel,
            CostCategory::MovingTruck => &self.moving_truck,
            CostCategory::MovingHelp => &self.moving_help,
        }
    }

    /// Toggle one option: selecting it if it is not the current selection
    /// for its category, deselecting it if it is. Other categories are
    /// never affected. Returns the recomputed total, or `None` for an
    /// unknown option id.
    pub fn toggle(&mut self, id: Uuid) -> Option<GrandTotal> {
        let hit = self.travel.toggle(id)
            || self.moving_truck.toggle(id)
            || self.moving_help.toggle(id);
        hit.then(|| self.grand_total())
    }

    /// Current grand total, recomputed from state on every call.
    pub fn grand_total(&self) -> GrandTotal {
        let housing = self.housing;
        let travel = self.travel.contribution();
        let moving_truck = self.moving_truck.contribution();
        let moving_help = self.moving_help.contribution();
        GrandTotal {
            housing,
            travel,
            moving_truck,
            moving_help,
            total: housing + travel + moving_truck + moving_help,
        }
    }
}
