//! Plain-text rendering of each page.

use std::fmt::Write as _;

use client_core::{
    format::{
        format_count, format_currency, format_date, format_optional_currency, format_rate,
        format_timestamp, status_label,
    },
    view::empty_state_hint,
    CampaignMetrics, CampaignSummary, EditableRecord, FilterCriteria,
};
use shared::{
    domain::CampaignStatus,
    records::{Application, Campaign, Profile},
};

const DEFAULT_AVATAR: &str = "/default-avatar.png";

pub fn campaign_list(campaigns: &[&Campaign], criteria: &FilterCriteria<CampaignStatus>) -> String {
    if campaigns.is_empty() {
        return format!("No campaigns found\n{}\n", empty_state_hint(criteria));
    }

    let mut out = String::new();
    for campaign in campaigns {
        out.push_str(&campaign_card(campaign));
        out.push('\n');
    }
    out
}

pub fn campaign_card(campaign: &Campaign) -> String {
    let metrics = CampaignMetrics::for_campaign(campaign);
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} [{}]",
        campaign.name,
        status_label(campaign.status.as_str())
    );
    let _ = writeln!(
        out,
        "  Start Date: {}  End Date: {}",
        format_date(campaign.start_date),
        format_date(campaign.end_date)
    );
    let _ = writeln!(
        out,
        "  Budget: {}  Spent: {}",
        format_currency(campaign.budget),
        format_currency(campaign.spent)
    );
    let _ = writeln!(
        out,
        "  Impressions: {}  Clicks: {}",
        format_count(campaign.impressions),
        format_count(campaign.clicks)
    );
    if let Some(pct) = metrics.budget_usage_pct {
        let _ = writeln!(out, "  Budget Usage: {pct:.0}%");
    }
    if metrics.has_performance() {
        let _ = writeln!(
            out,
            "  CTR: {}  Conversion Rate: {}  CPC: {}",
            format_rate(metrics.ctr),
            format_rate(metrics.conversion_rate),
            format_optional_currency(metrics.cpc)
        );
    }
    out
}

pub fn summary(summary: &CampaignSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Campaigns: {}", summary.campaigns);
    for (status, count) in &summary.status_counts {
        let _ = writeln!(out, "  {}: {count}", status_label(status.as_str()));
    }
    let _ = writeln!(
        out,
        "Budget: {}  Spent: {}",
        format_currency(summary.totals.budget),
        format_currency(summary.totals.spent)
    );
    if let Some(pct) = summary.metrics.budget_usage_pct {
        let _ = writeln!(out, "Budget Usage: {pct:.0}%");
    }
    let _ = writeln!(
        out,
        "CTR: {}  Conversion Rate: {}  CPC: {}",
        format_rate(summary.metrics.ctr),
        format_rate(summary.metrics.conversion_rate),
        format_optional_currency(summary.metrics.cpc)
    );
    out
}

pub fn application(application: &Application) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Application Status");
    let _ = writeln!(out, "Application ID: {}", application.id);
    let _ = writeln!(out, "Current Status: {}", application.status.label());
    let _ = writeln!(out, "  Application Type: {}", application.kind);
    let _ = writeln!(out, "  Submitted: {}", format_timestamp(application.submitted_at));
    let _ = writeln!(out, "  Last Updated: {}", format_timestamp(application.updated_at));
    if let Some(eta) = application.estimated_completion {
        let _ = writeln!(out, "  Estimated Completion: {}", format_timestamp(eta));
    }

    if !application.timeline.is_empty() {
        let _ = writeln!(out, "Application Timeline");
        for event in &application.timeline {
            let _ = writeln!(out, "  - {} ({})", event.title, format_timestamp(event.date));
            if let Some(description) = &event.description {
                let _ = writeln!(out, "    {description}");
            }
        }
    }

    if !application.documents.is_empty() {
        let _ = writeln!(out, "Related Documents");
        for doc in &application.documents {
            let _ = writeln!(
                out,
                "  - {} ({}) {}",
                doc.name,
                format_timestamp(doc.uploaded_at),
                doc.url
            );
        }
    }

    if let Some(notes) = &application.notes {
        let _ = writeln!(out, "Additional Notes");
        let _ = writeln!(out, "  {notes}");
    }
    out
}

pub fn profile(profile: &Profile) -> String {
    let mut out = String::new();
    let avatar = if profile.avatar.is_empty() {
        DEFAULT_AVATAR
    } else {
        &profile.avatar
    };
    let bio = if profile.bio.is_empty() {
        "No bio added yet."
    } else {
        &profile.bio
    };
    let _ = writeln!(out, "User Profile");
    let _ = writeln!(out, "  Avatar: {avatar}");
    let _ = writeln!(out, "  Name: {}", profile.name);
    let _ = writeln!(out, "  Email: {}", profile.email);
    let _ = writeln!(out, "  Bio: {bio}");
    out
}

/// Failed save: the unsaved edits plus the store's message.
pub fn profile_edit_failed(session: &EditableRecord<Profile>) -> String {
    let mut out = profile(session.working());
    if let Some(error) = session.error() {
        let _ = writeln!(out, "Error: {error}");
    }
    let _ = writeln!(out, "Your changes were not saved; fix them and run the edit again.");
    out
}

/// Body of the brand overview. Each half renders independently so one failed
/// load does not hide the other.
pub fn overview(
    profile: Result<&Profile, &str>,
    campaigns: Result<&CampaignSummary, &str>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Brand Dashboard");
    match profile {
        Ok(profile) => {
            let _ = writeln!(out, "Welcome, {}", profile.name);
        }
        Err(message) => {
            let _ = writeln!(out, "Profile unavailable: {message}");
        }
    }
    match campaigns {
        Ok(summary) => {
            let active = summary
                .status_counts
                .iter()
                .find(|(status, _)| *status == CampaignStatus::Active)
                .map_or(0, |(_, n)| *n);
            let _ = writeln!(
                out,
                "Campaign Overview: {active} active of {} total",
                summary.campaigns
            );
            let _ = writeln!(
                out,
                "Analytics: {} spent, CTR {}",
                format_currency(summary.totals.spent),
                format_rate(summary.metrics.ctr)
            );
        }
        Err(message) => {
            let _ = writeln!(out, "Campaigns unavailable: {message}");
        }
    }
    out
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
