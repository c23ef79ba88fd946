//! Seed data for `--demo`, served from an in-memory store.

use client_core::{pages, MemoryDocumentSource};
use serde_json::json;

pub const DEMO_SUBJECT: &str = "demo-user";
pub const DEMO_APPLICATION: &str = "app-1001";

pub fn seeded_store() -> MemoryDocumentSource {
    let campaigns = [
        json!({
            "id": "1", "name": "Summer Sale 2024", "status": "active",
            "startDate": "2024-06-01", "endDate": "2024-08-31",
            "budget": 50000, "spent": 32500,
            "impressions": 1250000, "clicks": 25000, "conversions": 850
        }),
        json!({
            "id": "2", "name": "Back to School", "status": "scheduled",
            "startDate": "2024-08-15", "endDate": "2024-09-30",
            "budget": 30000, "spent": 0, "impressions": 0, "clicks": 0, "conversions": 0
        }),
        json!({
            "id": "3", "name": "Holiday Promotions", "status": "draft",
            "startDate": "2024-11-01", "endDate": "2024-12-31",
            "budget": 75000, "spent": 0, "impressions": 0, "clicks": 0, "conversions": 0
        }),
        json!({
            "id": "4", "name": "Q2 Product Launch", "status": "completed",
            "startDate": "2024-04-01", "endDate": "2024-06-30",
            "budget": 40000, "spent": 38500,
            "impressions": 980000, "clicks": 19600, "conversions": 720
        }),
    ];

    let mut store = MemoryDocumentSource::new();
    for campaign in campaigns {
        let id = campaign["id"].as_str().unwrap_or_default().to_string();
        store = store.with_record(pages::CAMPAIGNS, &id, campaign);
    }

    store
        .with_record(
            pages::USERS,
            DEMO_SUBJECT,
            json!({
                "name": "Demo Brand Manager",
                "email": "manager@brand.example",
                "bio": "",
                "avatar": ""
            }),
        )
        .with_record(
            pages::APPLICATIONS,
            DEMO_APPLICATION,
            json!({
                "id": DEMO_APPLICATION,
                "status": "Under Review",
                "type": "Sponsorship",
                "submittedAt": "2024-05-01T09:00:00Z",
                "updatedAt": "2024-05-03T16:45:00Z",
                "estimatedCompletion": "2024-05-20T17:00:00Z",
                "timeline": [
                    { "title": "Application submitted", "date": "2024-05-01T09:00:00Z" },
                    {
                        "title": "Review started",
                        "date": "2024-05-03T16:45:00Z",
                        "description": "Assigned to the partnerships team"
                    }
                ],
                "documents": [
                    {
                        "name": "media-kit.pdf",
                        "uploadedAt": "2024-05-01T09:05:00Z",
                        "url": "https://files.example.com/media-kit.pdf"
                    }
                ],
                "notes": "Please attach audience demographics if available."
            }),
        )
}
