use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::json;

use sampark_core::index::LocationIndex;
use sampark_core::matcher::Resolution;
use sampark_core::smallvec::SmallVec;

#[derive(Debug, Deserialize)]
pub struct NormalizeParams {
    q: String,
}

#[derive(Serialize, JsonSchema)]
pub struct ResolutionJson {
    pub raw: String,
    pub cleaned: String,
    pub normalized: String,
    pub kind: String,
}

impl ResolutionJson {
    fn from_resolution(raw: String, r: Resolution) -> Self {
        ResolutionJson {
            raw,
            cleaned: r.cleaned.clone(),
            kind: r.kind.to_string(),
            normalized: r.into_name(),
        }
    }
}

#[derive(Serialize, JsonSchema)]
pub struct NormalizeResults {
    time: String,
    result: ResolutionJson,
}

pub async fn normalize_handler(
    Query(params): Query<NormalizeParams>,
    Extension(index): Extension<Arc<LocationIndex>>,
) -> Json<NormalizeResults> {
    let start_time = Instant::now();
    let resolution = index.resolve(&params.q);
    Json(NormalizeResults {
        time: format!("{:.2?}", start_time.elapsed()),
        result: ResolutionJson::from_resolution(params.q, resolution),
    })
}

pub async fn normalize_schema_handler() -> String {
    let schema = schema_for!(NormalizeResults);
    serde_json::to_string(&schema).expect("json schema")
}

#[derive(Debug, Deserialize)]
pub struct MatchParams {
    a: String,
    b: String,
}

#[derive(Serialize, JsonSchema)]
pub struct MatchResults {
    time: String,
    a: ResolutionJson,
    b: ResolutionJson,
    matched: bool,
}

pub async fn match_handler(
    Query(params): Query<MatchParams>,
    Extension(index): Extension<Arc<LocationIndex>>,
) -> Json<MatchResults> {
    let start_time = Instant::now();
    let matched = index.matches(&params.a, &params.b);
    let a = index.resolve(&params.a);
    let b = index.resolve(&params.b);
    Json(MatchResults {
        time: format!("{:.2?}", start_time.elapsed()),
        a: ResolutionJson::from_resolution(params.a, a),
        b: ResolutionJson::from_resolution(params.b, b),
        matched,
    })
}

pub async fn match_schema_handler() -> String {
    let schema = schema_for!(MatchResults);
    serde_json::to_string(&schema).expect("json schema")
}

#[derive(Serialize, JsonSchema)]
pub struct VariantsResults {
    time: String,
    canonical: Option<String>,
    variants: SmallVec<[&'static str; 8]>,
}

pub async fn variants_handler(
    Path(path_params): Path<HashMap<String, String>>,
    Extension(index): Extension<Arc<LocationIndex>>,
) -> impl IntoResponse {
    let name = match path_params.get("name") {
        Some(name) => name,
        None => {
            return Err((
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Missing 'name' field" })),
            ));
        }
    };
    let start_time = Instant::now();
    let resolution = index.resolve(name);
    let canonical = resolution.canonical.map(|c| c.to_string());
    let variants = index
        .variants_of(name)
        .into_iter()
        .map(|v| v.as_str())
        .collect();
    Ok((
        StatusCode::OK,
        Json(VariantsResults {
            time: format!("{:.2?}", start_time.elapsed()),
            canonical,
            variants,
        }),
    ))
}

pub async fn variants_schema_handler() -> String {
    let schema = schema_for!(VariantsResults);
    serde_json::to_string(&schema).expect("json schema")
}
