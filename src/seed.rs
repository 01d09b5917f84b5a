use chrono::{Duration, Utc};
use tracing::info;

use crate::db::DbPool;

/// (id, username, age in days)
const USERS: &[(i32, &str, i64)] = &[
    (1, "customer1", 30),
    (2, "customer2", 20),
    (3, "customer3", 60),
];

/// (id, title, price in minor units, location, image url, description)
const PROPERTIES: &[(i32, &str, i64, &str, &str, &str)] = &[
    (
        1,
        "คอนโดหรูใจกลางเมือง",
        350_000_000,
        "สาทร, กรุงเทพมหานคร",
        "https://example.com/images/condo1.jpg",
        "คอนโดมิเนียมสุดหรู 2 ห้องนอน 2 ห้องน้ำ พร้อมสระว่ายน้ำและฟิตเนส",
    ),
    (
        2,
        "บ้านเดี่ยว 3 ชั้น ทำเลดี",
        890_000_000,
        "ลาดพร้าว, กรุงเทพมหานคร",
        "https://example.com/images/house1.jpg",
        "บ้านเดี่ยว 4 ห้องนอน 5 ห้องน้ำ พื้นที่ 250 ตร.ม. จอดรถได้ 3 คัน",
    ),
    (
        3,
        "ทาวน์เฮ้าส์สไตล์โมเดิร์น",
        420_000_000,
        "รังสิต, ปทุมธานี",
        "https://example.com/images/townhouse1.jpg",
        "ทาวน์เฮ้าส์ 3 ห้องนอน 3 ห้องน้ำ ตกแต่งครบพร้อมอยู่",
    ),
    (
        4,
        "คอนโดวิวทะเล ชั้น 15",
        560_000_000,
        "พัทยา, ชลบุรี",
        "https://example.com/images/condo2.jpg",
        "คอนโด 2 ห้องนอน วิวทะเลสวยงาม ใกล้ชายหาด",
    ),
    (
        5,
        "อพาร์ทเมนท์ใกล้ BTS",
        210_000_000,
        "อารีย์, กรุงเทพมหานคร",
        "https://example.com/images/apartment1.jpg",
        "สตูดิโอขนาด 30 ตร.ม. เดินไป BTS 5 นาที",
    ),
];

/// (user id, property id, age in days)
const FAVORITES: &[(i32, i32, i64)] = &[
    (1, 1, 5),
    (1, 3, 3),
    (2, 2, 7),
    (2, 4, 2),
    (3, 1, 10),
    (3, 2, 8),
    (3, 5, 1),
];

/// True until the first user or property has ever been written.
///
/// Deleting rows does not reset `sqlite_sequence`, so a store whose seed rows
/// were all removed through the API is not fresh.
pub async fn is_fresh(pool: &DbPool) -> anyhow::Result<bool> {
    let (written,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sqlite_sequence")
        .fetch_one(pool)
        .await?;
    Ok(written == 0)
}

/// Insert the fixed seed set. Rows that already exist are left alone, so this
/// is safe to run against a durable database on every start.
pub async fn seed(pool: &DbPool) -> anyhow::Result<()> {
    let now = Utc::now();

    let mut users = 0;
    for &(id, username, age_days) in USERS {
        let result = sqlx::query(
            r#"
            INSERT INTO users (id, username, created_at)
            VALUES (?, ?, ?)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(id)
        .bind(username)
        .bind(now - Duration::days(age_days))
        .execute(pool)
        .await?;
        users += result.rows_affected();
    }

    let mut properties = 0;
    for &(id, title, price, location, image_url, description) in PROPERTIES {
        let result = sqlx::query(
            r#"
            INSERT INTO properties (id, title, price, location, image_url, description)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(price)
        .bind(location)
        .bind(image_url)
        .bind(description)
        .execute(pool)
        .await?;
        properties += result.rows_affected();
    }

    // Skip links whose parents were deleted from a durable store.
    let mut favorites = 0;
    for &(user_id, property_id, age_days) in FAVORITES {
        let result = sqlx::query(
            r#"
            INSERT INTO favorites (user_id, property_id, created_at)
            SELECT ?1, ?2, ?3
            WHERE EXISTS (SELECT 1 FROM users WHERE id = ?1)
              AND EXISTS (SELECT 1 FROM properties WHERE id = ?2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(property_id)
        .bind(now - Duration::days(age_days))
        .execute(pool)
        .await?;
        favorites += result.rows_affected();
    }

    info!(users, properties, favorites, "seed data applied");
    Ok(())
}
