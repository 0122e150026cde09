//! Request extractors whose rejections render as `AppError` JSON.

use axum::{
    Json,
    extract::{Path, Query},
};
use axum_extra::extract::WithRejection;

use crate::errors::AppError;

pub type JsonBody<T> = WithRejection<Json<T>, AppError>;

pub type PathParams<T> = WithRejection<Path<T>, AppError>;

pub type QueryParams<T> = WithRejection<Query<T>, AppError>;
