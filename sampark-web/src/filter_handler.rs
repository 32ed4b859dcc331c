use std::sync::Arc;
use std::time::Instant;

use axum::extract::Extension;
use axum::Json;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use sampark_core::index::LocationIndex;
use sampark_core::listing::{filter_by_location, recommend_by_location, Locatable, Matched};

const DEFAULT_RECOMMEND_LIMIT: usize = 10;

/// Job posting as the marketplace front-end sends it. Application count is
/// the popularity metric for ranking.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct JobListing {
    pub title: String,
    pub employer: Option<String>,
    pub location: String,
    #[serde(default)]
    pub applications: i64,
    pub daily_wage: Option<f64>,
}

impl Locatable for JobListing {
    fn location(&self) -> &str {
        &self.location
    }
}

/// Product listing. No application count here; ranking inside each match
/// partition keeps the order the seller feed came in.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ProductListing {
    pub name: String,
    pub seller: Option<String>,
    pub location: String,
    pub price: Option<f64>,
}

impl Locatable for ProductListing {
    fn location(&self) -> &str {
        &self.location
    }
}

#[derive(Debug, Deserialize)]
pub struct FilterRequest<L> {
    pub target_location: String,
    pub listings: Vec<L>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendRequest<L> {
    pub target_location: String,
    pub limit: Option<usize>,
    pub listings: Vec<L>,
}

#[derive(Serialize, JsonSchema)]
pub struct FilterResults<L> {
    time: String,
    target_location: String,
    results: Vec<Matched<L>>,
}

pub async fn filter_jobs_handler(
    Extension(index): Extension<Arc<LocationIndex>>,
    Json(req): Json<FilterRequest<JobListing>>,
) -> Json<FilterResults<JobListing>> {
    let start_time = Instant::now();
    let results = filter_by_location(&index, &req.listings, &req.target_location, |j| {
        j.applications
    });
    Json(FilterResults {
        time: format!("{:.2?}", start_time.elapsed()),
        target_location: req.target_location,
        results,
    })
}

pub async fn recommend_jobs_handler(
    Extension(index): Extension<Arc<LocationIndex>>,
    Json(req): Json<RecommendRequest<JobListing>>,
) -> Json<FilterResults<JobListing>> {
    let start_time = Instant::now();
    let limit = req.limit.unwrap_or(DEFAULT_RECOMMEND_LIMIT);
    let results = recommend_by_location(&index, &req.listings, &req.target_location, limit, |j| {
        j.applications
    });
    Json(FilterResults {
        time: format!("{:.2?}", start_time.elapsed()),
        target_location: req.target_location,
        results,
    })
}

pub async fn filter_products_handler(
    Extension(index): Extension<Arc<LocationIndex>>,
    Json(req): Json<FilterRequest<ProductListing>>,
) -> Json<FilterResults<ProductListing>> {
    let start_time = Instant::now();
    let results = filter_by_location(&index, &req.listings, &req.target_location, |_| 0);
    Json(FilterResults {
        time: format!("{:.2?}", start_time.elapsed()),
        target_location: req.target_location,
        results,
    })
}

pub async fn jobs_filter_schema_handler() -> String {
    let schema = schema_for!(FilterResults<JobListing>);
    serde_json::to_string(&schema).expect("json schema")
}

pub async fn products_filter_schema_handler() -> String {
    let schema = schema_for!(FilterResults<ProductListing>);
    serde_json::to_string(&schema).expect("json schema")
}
