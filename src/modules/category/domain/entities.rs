use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A portfolio category. `order_index` defines display and filter order;
/// only relative order matters, contiguity is recomputed on reorder but
/// never hard-enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
}

/// The nine categories seeded on first run when the collection is empty.
pub const DEFAULT_CATEGORIES: [&str; 9] = [
    "Banner",
    "Story Estaticos",
    "Anuncio para ecommerce",
    "Arte para campanha",
    "Arte para feed",
    "Motion Video",
    "Video editado para campanha",
    "Landing Page",
    "Videos editados",
];
