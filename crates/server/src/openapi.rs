use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String, pub timestamp: String }

#[derive(ToSchema)]
#[allow(non_snake_case)]
pub struct BannerDoc {
    pub message: String,
    pub timestamp: String,
    pub environment: String,
    pub store: String,
    pub totalProducts: Option<usize>,
}

/// `error` and `message` are present only when store initialization failed.
#[derive(ToSchema)]
pub struct DebugDoc {
    pub store: String,
    pub status: String,
    pub environment: String,
    pub error: Option<String>,
    pub message: Option<String>,
}

#[derive(ToSchema)]
pub struct ProductDoc { pub id: i64, pub name: String, pub price: f64, pub stock: i64 }

/// Create requires every field; update accepts any subset. Numeric fields may be sent as strings.
#[derive(ToSchema)]
pub struct ProductInputDoc {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
}

#[derive(ToSchema)]
pub struct DeleteOutputDoc { pub message: String, pub product: ProductDoc }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String, pub message: Option<String> }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::root,
        crate::routes::health,
        crate::routes::debug,
        crate::routes::products::list,
        crate::routes::products::get,
        crate::routes::products::create,
        crate::routes::products::update,
        crate::routes::products::delete,
    ),
    components(
        schemas(
            HealthResponse,
            BannerDoc,
            DebugDoc,
            ProductDoc,
            ProductInputDoc,
            DeleteOutputDoc,
            ErrorDoc,
            MessageDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "products")
    )
)]
pub struct ApiDoc;
