//! Sample data for `--demo` runs without a backend.

use crate::adapters::gateway::MemoryGateway;
use serde_json::json;

/// Demo logins: `lincoln` / `union`, `roosevelt` / `deal`.
pub fn demo_gateway() -> MemoryGateway {
    MemoryGateway::with_tables([
        (
            "legacy_profiles",
            vec![
                json!({
                    "id": "p-roosevelt",
                    "name": "Franklin D. Roosevelt",
                    "image_url": "https://upload.wikimedia.org/wikipedia/commons/4/42/FDR_1944_Color_Portrait.jpg",
                    "description": "Led the country through the Great Depression and most of the Second World War.",
                    "one_liner": "The only thing we have to fear is fear itself.",
                    "tenure_start": "1933-03-04",
                    "tenure_end": "1945-04-12"
                }),
                json!({
                    "id": "p-lincoln",
                    "name": "Abraham Lincoln",
                    "image_url": "https://upload.wikimedia.org/wikipedia/commons/a/ab/Abraham_Lincoln_O-77_matte_collodion_print.jpg",
                    "description": "Preserved the Union and ended slavery.",
                    "one_liner": "A house divided against itself cannot stand.",
                    "tenure_start": "1861-03-04",
                    "tenure_end": "1865-04-15"
                }),
                json!({
                    "id": "p-steward",
                    "name": "Current Steward",
                    "image_url": "",
                    "description": "Still in office.",
                    "one_liner": "Keeping the lights on.",
                    "tenure_start": "2020-01-01",
                    "tenure_end": null
                }),
            ],
        ),
        (
            "legacy_auth",
            vec![
                json!({"username": "lincoln", "password": "union", "legacy_profile_id": "p-lincoln"}),
                json!({"username": "roosevelt", "password": "deal", "legacy_profile_id": "p-roosevelt"}),
            ],
        ),
        (
            "blogs",
            vec![
                json!({
                    "id": "b-gettysburg",
                    "title": "Remarks at Gettysburg",
                    "content": "Four score and seven years ago our fathers brought forth on this continent, a new nation.\n\nIt is for us the living, rather, to be dedicated here to the unfinished work.",
                    "created_at": "2024-01-10T09:00:00+00:00",
                    "legacy_profile_id": "p-lincoln"
                }),
                json!({
                    "id": "b-fireside",
                    "title": "On the Banking Crisis",
                    "content": "I want to talk for a few minutes with the people of the United States about banking.",
                    "created_at": "2024-02-02T20:00:00+00:00",
                    "legacy_profile_id": "p-roosevelt"
                }),
            ],
        ),
        (
            "forum_posts",
            vec![json!({
                "id": "f-welcome",
                "title": "Welcome",
                "content": "Introduce yourselves here.",
                "created_at": "2024-01-01T12:00:00+00:00",
                "legacy_profile_id": "p-roosevelt"
            })],
        ),
        (
            "contributions",
            vec![json!({
                "id": "c-proclamation",
                "title": "Emancipation Proclamation",
                "resource_url": "https://www.archives.gov/exhibits/featured-documents/emancipation-proclamation",
                "description": "Primary source transcript.",
                "created_at": "2024-01-15T08:30:00+00:00",
                "legacy_profile_id": "p-lincoln"
            })],
        ),
    ])
}
