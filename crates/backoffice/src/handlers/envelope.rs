//! The `{success, ...}` response envelope shared by every endpoint.

use axum::{http::StatusCode, Json};
use serde::Serialize;

use backoffice_core::storage::Paginated;

/// A single resource or aggregate.
#[derive(Debug, Serialize)]
pub struct DataEnvelope<T> {
    pub success: bool,
    pub data: T,
}

/// One page of a list plus the pagination that produced it.
#[derive(Debug, Serialize)]
pub struct ListEnvelope<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Serialize)]
pub struct MessageEnvelope {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: String,
}

impl<T> From<Paginated<T>> for ListEnvelope<T> {
    fn from(page: Paginated<T>) -> Self {
        Self {
            success: true,
            data: page.items,
            total: page.total,
            limit: page.limit,
            offset: page.offset,
        }
    }
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

pub fn ok<T: Serialize>(data: T) -> Json<DataEnvelope<T>> {
    Json(DataEnvelope {
        success: true,
        data,
    })
}

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<DataEnvelope<T>>) {
    (StatusCode::CREATED, ok(data))
}

pub fn list<T: Serialize>(page: Paginated<T>) -> Json<ListEnvelope<T>> {
    Json(page.into())
}

pub fn message(message: impl Into<String>) -> Json<MessageEnvelope> {
    Json(MessageEnvelope {
        success: true,
        message: message.into(),
    })
}
