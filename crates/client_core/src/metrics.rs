use shared::{domain::CampaignStatus, records::Campaign};

/// Derived campaign performance. A `None` means the denominator was zero and
/// the value must be rendered as a placeholder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CampaignMetrics {
    pub ctr: Option<f64>,
    pub conversion_rate: Option<f64>,
    pub cpc: Option<f64>,
    /// Percentage in `[0, 100]`; absent when there is no budget.
    pub budget_usage_pct: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricInputs {
    pub impressions: f64,
    pub clicks: f64,
    pub conversions: f64,
    pub spent: f64,
    pub budget: f64,
}

impl From<&Campaign> for MetricInputs {
    fn from(campaign: &Campaign) -> Self {
        Self {
            impressions: campaign.impressions as f64,
            clicks: campaign.clicks as f64,
            conversions: campaign.conversions as f64,
            spent: campaign.spent,
            budget: campaign.budget,
        }
    }
}

impl CampaignMetrics {
    pub fn compute(inputs: MetricInputs) -> Self {
        Self {
            ctr: ratio(inputs.clicks, inputs.impressions),
            conversion_rate: ratio(inputs.conversions, inputs.clicks),
            cpc: ratio(inputs.spent, inputs.clicks),
            budget_usage_pct: budget_usage_pct(inputs.spent, inputs.budget),
        }
    }

    pub fn for_campaign(campaign: &Campaign) -> Self {
        Self::compute(campaign.into())
    }

    /// Mirrors the dashboard, which only shows the performance row once a
    /// campaign has clicks.
    pub fn has_performance(&self) -> bool {
        self.conversion_rate.is_some()
    }
}

fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator > 0.0 && numerator.is_finite() && denominator.is_finite() {
        Some(numerator / denominator)
    } else {
        None
    }
}

pub fn budget_usage_pct(spent: f64, budget: f64) -> Option<f64> {
    if !(budget > 0.0) || !budget.is_finite() {
        return None;
    }
    // `max` discards a NaN operand, so a NaN spend collapses to 0.
    Some((spent * 100.0 / budget).max(0.0).min(100.0))
}

/// Roll-up over a campaign list for the analytics page.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignSummary {
    pub campaigns: usize,
    pub totals: MetricInputs,
    pub metrics: CampaignMetrics,
    pub status_counts: Vec<(CampaignStatus, usize)>,
}

impl CampaignSummary {
    pub fn from_campaigns<'a, I>(campaigns: I) -> Self
    where
        I: IntoIterator<Item = &'a Campaign>,
    {
        let mut count = 0;
        let mut totals = MetricInputs::default();
        let mut status_counts: Vec<(CampaignStatus, usize)> = Vec::new();

        for campaign in campaigns {
            count += 1;
            let inputs = MetricInputs::from(campaign);
            totals.impressions += inputs.impressions;
            totals.clicks += inputs.clicks;
            totals.conversions += inputs.conversions;
            totals.spent += inputs.spent;
            totals.budget += inputs.budget;

            match status_counts
                .iter_mut()
                .find(|(status, _)| *status == campaign.status)
            {
                Some((_, n)) => *n += 1,
                None => status_counts.push((campaign.status, 1)),
            }
        }

        Self {
            campaigns: count,
            totals,
            metrics: CampaignMetrics::compute(totals),
            status_counts,
        }
    }
}

#[cfg(test)]
#[path = "tests/metrics_tests.rs"]
mod tests;
