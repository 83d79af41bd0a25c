//! Demo data seeding and cleanup / 演示数据填充与清理

use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::VideoStatus;

struct DemoVideo {
    title: &'static str,
    description: &'static str,
    status: VideoStatus,
    views: i64,
    duration_seconds: i64,
}

struct DemoCreator {
    username: &'static str,
    email: &'static str,
    /// (name, handle, description, subscribers)
    channel: Option<(&'static str, &'static str, &'static str, i64)>,
    videos: &'static [DemoVideo],
}

const DEMO_CREATORS: &[DemoCreator] = &[
    DemoCreator {
        username: "techvisionary",
        email: "hello@techvisionary.dev",
        channel: Some((
            "Tech Visionary",
            "@techvisionary",
            "Reviews, builds and deep dives into the newest gadgets.",
            182_000,
        )),
        videos: &[
            DemoVideo {
                title: "Top 10 Gadgets of the Year",
                description: "Our favourite hardware from the past twelve months.",
                status: VideoStatus::Ready,
                views: 48_210,
                duration_seconds: 1_124,
            },
            DemoVideo {
                title: "Building a Home Server From Scratch",
                description: "Parts list, assembly and first boot.",
                status: VideoStatus::Ready,
                views: 15_230,
                duration_seconds: 2_310,
            },
        ],
    },
    DemoCreator {
        username: "sciencesimplified",
        email: "team@sciencesimplified.org",
        channel: Some((
            "Science Simplified",
            "@sciencesimplified",
            "Big ideas in physics and astronomy, explained in plain language.",
            96_400,
        )),
        videos: &[
            DemoVideo {
                title: "Understanding Quantum Computing",
                description: "Qubits, superposition and entanglement without the math.",
                status: VideoStatus::Ready,
                views: 30_500,
                duration_seconds: 1_480,
            },
            DemoVideo {
                title: "Black Holes Explained",
                description: "What happens at the event horizon.",
                status: VideoStatus::Processing,
                views: 0,
                duration_seconds: 960,
            },
        ],
    },
    DemoCreator {
        username: "pixelgaming",
        email: "contact@pixelgaming.gg",
        channel: Some((
            "Pixel Gaming",
            "@pixelgaming",
            "Speedruns, retro reviews and co-op nights.",
            41_900,
        )),
        videos: &[
            DemoVideo {
                title: "Speedrunning Classic Platformers",
                description: "Route planning for retro favourites.",
                status: VideoStatus::Ready,
                views: 8_200,
                duration_seconds: 1_860,
            },
            DemoVideo {
                title: "Retro Console Restoration",
                description: "Cleaning, recapping and reviving an old console.",
                status: VideoStatus::Ready,
                views: 5_100,
                duration_seconds: 2_040,
            },
        ],
    },
    DemoCreator {
        username: "chefana",
        email: "ana@kitchenstories.io",
        channel: Some((
            "Kitchen Stories with Ana",
            "@chefana",
            "Weeknight recipes and baking basics.",
            57_300,
        )),
        videos: &[
            DemoVideo {
                title: "Perfect Snacks for Gaming Nights",
                description: "Crunchy, shareable and keyboard friendly.",
                status: VideoStatus::Ready,
                views: 61_000,
                duration_seconds: 740,
            },
            DemoVideo {
                title: "Sourdough for Beginners",
                description: "Starter, shaping and the first bake.",
                status: VideoStatus::Ready,
                views: 22_000,
                duration_seconds: 1_320,
            },
        ],
    },
    DemoCreator {
        username: "viewer",
        email: "viewer@example.com",
        channel: None,
        videos: &[],
    },
];

/// Password hash placeholder for demo accounts (login is handled elsewhere)
const DEMO_PASSWORD_HASH: &str = "!demo-account";

/// Replace all users, channels and videos with the demo set / 重置并填充演示数据
pub async fn seed_demo_data(pool: &SqlitePool) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM videos").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM channels").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM users").execute(&mut *tx).await?;

    let mut video_count = 0usize;
    for (creator_idx, creator) in DEMO_CREATORS.iter().enumerate() {
        let now = Utc::now().to_rfc3339();
        let user_id = Uuid::new_v4().to_string();

        sqlx::query(
            "INSERT INTO users (id, username, email, password_hash, avatar_url, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&user_id)
        .bind(creator.username)
        .bind(creator.email)
        .bind(DEMO_PASSWORD_HASH)
        .bind(format!("/avatars/{}.png", creator.username))
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        if let Some((name, handle, description, subscribers)) = creator.channel {
            sqlx::query(
                "INSERT INTO channels (id, user_id, name, handle, description, name_lower, handle_lower, description_lower, \
                 avatar_url, banner_url, subscriber_count, created_at, updated_at) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&user_id)
            .bind(name)
            .bind(handle)
            .bind(description)
            .bind(name.to_lowercase())
            .bind(handle.to_lowercase())
            .bind(description.to_lowercase())
            .bind(format!("/avatars/{}.png", creator.username))
            .bind(format!("/banners/{}.jpg", creator.username))
            .bind(subscribers)
            .bind(&now)
            .bind(&now)
            .execute(&mut *tx)
            .await?;
        }

        for (video_idx, video) in creator.videos.iter().enumerate() {
            let video_id = Uuid::new_v4().to_string();
            // Stagger upload dates so recency ordering is stable / 错开上传时间
            let created_at = (Utc::now() - chrono::Duration::days((creator_idx * 10 + video_idx) as i64)).to_rfc3339();
            let hls_url = (video.status == VideoStatus::Ready).then(|| format!("/media/{}/master.m3u8", video_id));

            sqlx::query(
                "INSERT INTO videos (id, user_id, title, description, title_lower, description_lower, status, views, \
                 duration_seconds, thumbnail_url, hls_url, created_at, updated_at) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&video_id)
            .bind(&user_id)
            .bind(video.title)
            .bind(video.description)
            .bind(video.title.to_lowercase())
            .bind(video.description.to_lowercase())
            .bind(video.status.as_str())
            .bind(video.views)
            .bind(video.duration_seconds)
            .bind(format!("/thumbnails/{}.jpg", video_id))
            .bind(hls_url)
            .bind(&created_at)
            .bind(&created_at)
            .execute(&mut *tx)
            .await?;
            video_count += 1;
        }
    }

    tx.commit().await?;
    tracing::info!("Seeded {} users and {} videos", DEMO_CREATORS.len(), video_count);
    Ok(())
}

/// Delete all videos, channels and users / 清理全部数据
pub async fn cleanup(pool: &SqlitePool) -> Result<()> {
    let mut tx = pool.begin().await?;
    let videos = sqlx::query("DELETE FROM videos").execute(&mut *tx).await?.rows_affected();
    let channels = sqlx::query("DELETE FROM channels").execute(&mut *tx).await?.rows_affected();
    let users = sqlx::query("DELETE FROM users").execute(&mut *tx).await?.rows_affected();
    tx.commit().await?;

    tracing::info!("Removed {} videos, {} channels, {} users", videos, channels, users);
    Ok(())
}
