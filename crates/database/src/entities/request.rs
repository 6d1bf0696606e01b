//! Swap request entity definitions

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapRequest {
    pub id: i64,
    pub book_id: i64,
    pub requester_id: i64,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct NewRequest {
    pub book_id: i64,
    pub requester_id: i64,
}

/// Incoming-request row: the request joined with the requester's name and
/// the requested book's title.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomingRequest {
    #[serde(flatten)]
    pub request: SwapRequest,
    pub requester_name: Option<String>,
    pub book_title: String,
}
