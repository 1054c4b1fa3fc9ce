use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::Feedback;

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateFeedbackRequest {
    /// Customers always post as themselves.
    pub customer_id: Option<Uuid>,
    #[validate(length(max = 500))]
    pub content: Option<String>,
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FeedbackList {
    pub items: Vec<Feedback>,
}
