use super::*;

use client_core::{derive_view, StatusFilter};
use serde_json::json;
use shared::records::Campaign;

fn campaign(value: serde_json::Value) -> Campaign {
    serde_json::from_value(value).expect("campaign")
}

fn summer_sale() -> Campaign {
    campaign(json!({
        "id": "1", "name": "Summer Sale 2024", "status": "active",
        "startDate": "2024-06-01", "endDate": "2024-08-31",
        "budget": 50000, "spent": 32500,
        "impressions": 1250000, "clicks": 25000, "conversions": 850
    }))
}

fn holiday() -> Campaign {
    campaign(json!({
        "id": "3", "name": "Holiday Promotions", "status": "draft",
        "startDate": "2024-11-01", "endDate": "2024-12-31",
        "budget": 75000
    }))
}

#[test]
fn card_shows_budget_usage_and_performance() {
    let card = campaign_card(&summer_sale());
    assert!(card.starts_with("Summer Sale 2024 [Active]"), "{card}");
    assert!(card.contains("Start Date: 6/1/2024"));
    assert!(card.contains("Budget: $50,000.00  Spent: $32,500.00"));
    assert!(card.contains("Impressions: 1,250,000  Clicks: 25,000"));
    assert!(card.contains("Budget Usage: 65%"));
    assert!(card.contains("CTR: 2.00%  Conversion Rate: 3.40%  CPC: $1.30"));
}

#[test]
fn card_without_clicks_hides_performance_row() {
    let card = campaign_card(&holiday());
    assert!(card.contains("Budget Usage: 0%"));
    assert!(!card.contains("CTR"), "{card}");
    assert!(!card.contains("NaN"));
}

#[test]
fn empty_list_hint_depends_on_filters() {
    let items = vec![summer_sale(), holiday()];

    let unfiltered = FilterCriteria::default();
    let none: Vec<&Campaign> = Vec::new();
    let out = campaign_list(&none, &unfiltered);
    assert!(out.contains("No campaigns found"));
    assert!(out.contains("Get started by creating your first campaign."));

    let criteria = FilterCriteria::new("winter", StatusFilter::All);
    let visible = derive_view(&items, &criteria);
    let out = campaign_list(&visible, &criteria);
    assert!(out.contains("Try adjusting your search or filter criteria."));
}

#[test]
fn list_keeps_source_order() {
    let items = vec![summer_sale(), holiday()];
    let criteria = FilterCriteria::default();
    let out = campaign_list(&derive_view(&items, &criteria), &criteria);
    let summer = out.find("Summer Sale").expect("summer");
    let holiday = out.find("Holiday Promotions").expect("holiday");
    assert!(summer < holiday);
}

#[test]
fn summary_counts_statuses_and_totals() {
    let items = vec![summer_sale(), holiday()];
    let out = summary(&CampaignSummary::from_campaigns(&items));
    assert!(out.contains("Campaigns: 2"));
    assert!(out.contains("  Active: 1"));
    assert!(out.contains("  Draft: 1"));
    assert!(out.contains("Budget: $125,000.00  Spent: $32,500.00"));
    assert!(out.contains("Budget Usage: 26%"));
}

#[test]
fn profile_falls_back_for_missing_bio_and_avatar() {
    let out = profile(&Profile {
        name: "Dana".to_string(),
        email: "dana@brand.example".to_string(),
        ..Profile::default()
    });
    assert!(out.contains("Avatar: /default-avatar.png"));
    assert!(out.contains("Bio: No bio added yet."));
    assert!(out.contains("Email: dana@brand.example"));
}

#[test]
fn application_lists_timeline_documents_and_notes() {
    let app: Application = serde_json::from_value(json!({
        "id": "app-1", "status": "under review", "type": "Sponsorship",
        "submittedAt": "2024-05-01T09:00:00Z", "updatedAt": "2024-05-03T16:45:00Z",
        "timeline": [{ "title": "Application submitted", "date": "2024-05-01T09:00:00Z" }],
        "documents": [{
            "name": "media-kit.pdf",
            "uploadedAt": "2024-05-01T09:05:00Z",
            "url": "https://files.example.com/media-kit.pdf"
        }],
        "notes": "Bring numbers"
    }))
    .expect("application");

    let out = application(&app);
    assert!(out.contains("Current Status: under review"));
    assert!(out.contains("Last Updated: May 3, 2024, 04:45 PM"));
    assert!(!out.contains("Estimated Completion"));
    assert!(out.contains("  - Application submitted (May 1, 2024, 09:00 AM)"));
    assert!(out.contains("media-kit.pdf"));
    assert!(out.contains("Additional Notes\n  Bring numbers"));
}

#[test]
fn overview_renders_each_half_independently() {
    let items = vec![summer_sale(), holiday()];
    let summary = CampaignSummary::from_campaigns(&items);

    let out = overview(Err("sign in required"), Ok(&summary));
    assert!(out.contains("Profile unavailable: sign in required"));
    assert!(out.contains("Campaign Overview: 1 active of 2 total"));

    let manager = Profile {
        name: "Dana".to_string(),
        ..Profile::default()
    };
    let out = overview(Ok(&manager), Err("network failure: timed out"));
    assert!(out.contains("Welcome, Dana"));
    assert!(out.contains("Campaigns unavailable: network failure: timed out"));
}
