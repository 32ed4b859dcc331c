use std::fs::File;
use std::io::BufReader;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::{AddExtensionLayer, Router};
use structopt::StructOpt;
use tower_http::trace::TraceLayer;
use tracing::info;

use sampark_core::config::VariantTable;
use sampark_core::index::LocationIndex;
use sampark_web::{filter_handler, init_logging, match_handler};

#[derive(StructOpt)]
struct CliArgs {
    #[structopt(long = "log-level", case_insensitive = true, default_value = "INFO")]
    log_level: tracing::Level,
    #[structopt(long = "port", default_value = "3001")]
    port: u16,
    /// Override the bundled location variant table with a JSON file.
    #[structopt(long = "locations")]
    locations: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let args = CliArgs::from_args();
    init_logging(args.log_level);

    let table = match &args.locations {
        Some(path) => {
            info!("loading location table from {path:?}");
            let fo = File::open(path).expect("cannot open locations file");
            let reader = BufReader::new(fo);
            VariantTable::from_json_reader(reader).expect("cannot decode locations file")
        }
        None => VariantTable::builtin(),
    };
    let index = Arc::new(LocationIndex::from_table(&table));

    let app = Router::new()
        .route("/normalize", get(match_handler::normalize_handler))
        .route("/normalize-schema", get(match_handler::normalize_schema_handler))
        .route("/match", get(match_handler::match_handler))
        .route("/match-schema", get(match_handler::match_schema_handler))
        .route("/variants/:name", get(match_handler::variants_handler))
        .route("/variants-schema", get(match_handler::variants_schema_handler))
        .route("/jobs/filter", post(filter_handler::filter_jobs_handler))
        .route("/jobs/recommend", post(filter_handler::recommend_jobs_handler))
        .route(
            "/jobs/filter-schema",
            get(filter_handler::jobs_filter_schema_handler),
        )
        .route(
            "/products/filter",
            post(filter_handler::filter_products_handler),
        )
        .route(
            "/products/filter-schema",
            get(filter_handler::products_filter_schema_handler),
        )
        .layer(AddExtensionLayer::new(index))
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    info!("listening on {addr}");
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .expect("server error");
}
