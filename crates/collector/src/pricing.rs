// Copyright 2025 Seekbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Per-provider pricing and cost calculation.
//!
//! The [`CostCalculator`] maps `(provider, billing units, test type)` to a
//! USD amount using a static rate table. It is the *fallback* pricing
//! source: the collector only consults it for records whose `cost_usd`
//! was not measured. Unknown providers cost zero.
//!
//! Rates can be overridden at runtime for enterprise/custom plans via
//! [`CostCalculator::set_custom_rate`]. Overrides are rare and reads are
//! frequent, so the table sits behind its own reader/writer lock,
//! independent of the collector's record lock.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::RwLock;
use tracing::debug;

use seekbench_core::TestType;

/// How a provider meters usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingModel {
    /// Provider-specific credits.
    PerCredit,
    /// Flat rate per API request.
    PerRequest,
    /// Flat rate per search query.
    PerQuery,
    /// Rate per thousand tokens processed.
    PerThousandTokens,
}

impl fmt::Display for BillingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BillingModel::PerCredit => write!(f, "per_credit"),
            BillingModel::PerRequest => write!(f, "per_request"),
            BillingModel::PerQuery => write!(f, "per_query"),
            BillingModel::PerThousandTokens => write!(f, "per_1k_tokens"),
        }
    }
}

/// Rate entry for one provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderRates {
    /// Billing model the rate is denominated in.
    pub billing: BillingModel,
    /// USD per billing unit.
    pub per_unit_usd: f64,
    /// USD per billing unit for content-retrieval operations (extract,
    /// crawl), when the provider bills those at a different sub-rate.
    pub content_per_unit_usd: Option<f64>,
}

impl ProviderRates {
    /// Rate entry with a single flat rate.
    pub fn flat(billing: BillingModel, per_unit_usd: f64) -> Self {
        Self {
            billing,
            per_unit_usd,
            content_per_unit_usd: None,
        }
    }

    /// Rate entry with a separate content-retrieval sub-rate.
    pub fn with_content_rate(
        billing: BillingModel,
        per_unit_usd: f64,
        content_per_unit_usd: f64,
    ) -> Self {
        Self {
            billing,
            per_unit_usd,
            content_per_unit_usd: Some(content_per_unit_usd),
        }
    }

    /// The rate that applies to a given operation.
    fn rate_for(&self, test_type: &TestType) -> f64 {
        if test_type.is_content_retrieval() {
            self.content_per_unit_usd.unwrap_or(self.per_unit_usd)
        } else {
            self.per_unit_usd
        }
    }
}

/// Deterministic USD cost computation from a per-provider rate table.
pub struct CostCalculator {
    rates: RwLock<HashMap<String, ProviderRates>>,
}

impl Default for CostCalculator {
    fn default() -> Self {
        Self::with_default_rates()
    }
}

impl CostCalculator {
    /// Calculator preloaded with the published pay-as-you-go rates of the
    /// benchmarked providers.
    pub fn with_default_rates() -> Self {
        let mut rates = HashMap::new();
        // Tavily bills extract/crawl at a content-retrieval sub-rate
        // distinct from search credits.
        rates.insert(
            "tavily".to_string(),
            ProviderRates::with_content_rate(BillingModel::PerCredit, 0.008, 0.012),
        );
        rates.insert(
            "firecrawl".to_string(),
            ProviderRates::flat(BillingModel::PerCredit, 0.001),
        );
        rates.insert(
            "exa".to_string(),
            ProviderRates::flat(BillingModel::PerRequest, 0.005),
        );
        rates.insert(
            "serper".to_string(),
            ProviderRates::flat(BillingModel::PerQuery, 0.001),
        );
        rates.insert(
            "jina".to_string(),
            ProviderRates::flat(BillingModel::PerThousandTokens, 0.00002),
        );
        rates.insert(
            "brave".to_string(),
            ProviderRates::flat(BillingModel::PerQuery, 0.005),
        );
        Self {
            rates: RwLock::new(rates),
        }
    }

    /// Calculator with an empty rate table; every provider costs zero
    /// until rates are set.
    pub fn empty() -> Self {
        Self {
            rates: RwLock::new(HashMap::new()),
        }
    }

    /// USD cost for `units` billing units of `test_type` against
    /// `provider`. Unknown providers return 0.
    pub fn provider_cost(&self, provider: &str, units: f64, test_type: &TestType) -> f64 {
        let rates = self.rates.read().unwrap();
        match rates.get(provider) {
            Some(entry) => units * entry.rate_for(test_type),
            None => {
                debug!(provider, "no rate entry, costing zero");
                0.0
            }
        }
    }

    /// Install or replace the rate entry for a provider (enterprise or
    /// custom-plan override).
    pub fn set_custom_rate(&self, provider: impl Into<String>, rates: ProviderRates) {
        let provider = provider.into();
        debug!(%provider, "overriding rate entry");
        self.rates.write().unwrap().insert(provider, rates);
    }

    /// Display-oriented view of the rate table: provider to attribute map,
    /// both levels sorted for deterministic rendering.
    pub fn pricing_info(&self) -> BTreeMap<String, BTreeMap<String, String>> {
        let rates = self.rates.read().unwrap();
        rates
            .iter()
            .map(|(provider, entry)| {
                let mut attrs = BTreeMap::new();
                attrs.insert("billing_model".to_string(), entry.billing.to_string());
                attrs.insert(
                    "per_unit_usd".to_string(),
                    format!("{:.6}", entry.per_unit_usd),
                );
                if let Some(content) = entry.content_per_unit_usd {
                    attrs.insert(
                        "content_per_unit_usd".to_string(),
                        format!("{:.6}", content),
                    );
                }
                (provider.clone(), attrs)
            })
            .collect()
    }

    /// The current rate entry for a provider, if any.
    pub fn rate_entry(&self, provider: &str) -> Option<ProviderRates> {
        self.rates.read().unwrap().get(provider).cloned()
    }

    /// Providers present in the rate table, sorted.
    pub fn known_providers(&self) -> Vec<String> {
        let rates = self.rates.read().unwrap();
        let mut providers: Vec<String> = rates.keys().cloned().collect();
        providers.sort();
        providers
    }
}
