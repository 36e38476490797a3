//! Non-medical add-on services and the scopes they are configured at.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::numeric::deserialize_amount;

/// The fixed set of add-on services a program can sell alongside products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    PortalAccess,
    BmiCalculator,
    ProteinCalculator,
    CalorieDeficitCalculator,
    EasyShopping,
}

impl ServiceKind {
    /// All services, in display order.
    pub const ALL: [ServiceKind; 5] = [
        ServiceKind::PortalAccess,
        ServiceKind::BmiCalculator,
        ServiceKind::ProteinCalculator,
        ServiceKind::CalorieDeficitCalculator,
        ServiceKind::EasyShopping,
    ];

    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            ServiceKind::PortalAccess => "Portal access",
            ServiceKind::BmiCalculator => "BMI calculator",
            ServiceKind::ProteinCalculator => "Protein intake calculator",
            ServiceKind::CalorieDeficitCalculator => "Calorie deficit calculator",
            ServiceKind::EasyShopping => "Easy shopping",
        }
    }
}

/// One service toggle with its price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceOption {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub price: f64,
}

impl ServiceOption {
    pub fn new(enabled: bool, price: f64) -> Self {
        Self { enabled, price }
    }

    /// Price counted towards COGS: the stored price when enabled, else 0.
    #[inline]
    pub fn contribution(&self) -> f64 {
        if self.enabled {
            self.price
        } else {
            0.0
        }
    }
}

/// Enabled/price pairs for every [`ServiceKind`].
///
/// Missing entries deserialize as disabled with a zero price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSelection {
    pub portal_access: ServiceOption,
    pub bmi_calculator: ServiceOption,
    pub protein_calculator: ServiceOption,
    pub calorie_deficit_calculator: ServiceOption,
    pub easy_shopping: ServiceOption,
}

impl ServiceSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: ServiceKind) -> &ServiceOption {
        match kind {
            ServiceKind::PortalAccess => &self.portal_access,
            ServiceKind::BmiCalculator => &self.bmi_calculator,
            ServiceKind::ProteinCalculator => &self.protein_calculator,
            ServiceKind::CalorieDeficitCalculator => &self.calorie_deficit_calculator,
            ServiceKind::EasyShopping => &self.easy_shopping,
        }
    }

    pub fn get_mut(&mut self, kind: ServiceKind) -> &mut ServiceOption {
        match kind {
            ServiceKind::PortalAccess => &mut self.portal_access,
            ServiceKind::BmiCalculator => &mut self.bmi_calculator,
            ServiceKind::ProteinCalculator => &mut self.protein_calculator,
            ServiceKind::CalorieDeficitCalculator => &mut self.calorie_deficit_calculator,
            ServiceKind::EasyShopping => &mut self.easy_shopping,
        }
    }

    /// Builder-style setter, mostly useful in tests and fixtures.
    pub fn with(mut self, kind: ServiceKind, enabled: bool, price: f64) -> Self {
        *self.get_mut(kind) = ServiceOption::new(enabled, price);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (ServiceKind, &ServiceOption)> + '_ {
        ServiceKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }

    /// Sum of prices of the enabled services.
    pub fn total(&self) -> f64 {
        self.iter().map(|(_, option)| option.contribution()).sum()
    }

    pub fn enabled_count(&self) -> usize {
        self.iter().filter(|(_, option)| option.enabled).count()
    }
}

/// Which scope supplies a product's service selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingMode {
    /// One selection shared by every product in the program.
    #[default]
    Unified,
    /// Each product carries its own selection.
    PerProduct,
}

/// Result of asking [`ServiceScopes`] to change mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeSwitch {
    /// Already in the requested mode.
    Unchanged,
    /// The switch would drop per-product records; nothing was changed.
    NeedsConfirmation { discarded: usize },
    /// Mode changed. `discarded` per-product records were dropped.
    Switched { discarded: usize },
}

/// Service selections at both scopes plus the mode choosing between them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceScopes {
    pub mode: PricingMode,
    pub unified: ServiceSelection,
    pub per_product: HashMap<String, ServiceSelection>,
}

impl ServiceScopes {
    pub fn new(mode: PricingMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// The selection in effect for `product_id` under the current mode.
    ///
    /// In per-product mode a product without a record has every service off.
    pub fn active_for(&self, product_id: &str) -> ServiceSelection {
        match self.mode {
            PricingMode::Unified => self.unified,
            PricingMode::PerProduct => self
                .per_product
                .get(product_id)
                .copied()
                .unwrap_or_default(),
        }
    }

    /// Mutable access to the selection a product edits under the current mode.
    pub fn active_for_mut(&mut self, product_id: &str) -> &mut ServiceSelection {
        match self.mode {
            PricingMode::Unified => &mut self.unified,
            PricingMode::PerProduct => self
                .per_product
                .entry(product_id.to_string())
                .or_default(),
        }
    }

    /// Change mode. Moving to unified discards per-product records, so it
    /// only happens when `confirmed` is set (or there is nothing to discard).
    pub fn request_mode(&mut self, target: PricingMode, confirmed: bool) -> ModeSwitch {
        if self.mode == target {
            return ModeSwitch::Unchanged;
        }

        let discarded = match target {
            PricingMode::Unified => self.per_product.len(),
            PricingMode::PerProduct => 0,
        };

        if discarded > 0 && !confirmed {
            return ModeSwitch::NeedsConfirmation { discarded };
        }

        if target == PricingMode::Unified {
            self.per_product.clear();
        }
        self.mode = target;
        tracing::debug!(mode = ?target, discarded, "pricing mode switched");

        ModeSwitch::Switched { discarded }
    }
}
