// File: crates/services/slotify_backend/src/main.rs
use axum::{routing::get, Router};
use slotify_common::services::ServiceFactory;
use slotify_config::load_config;
use slotify_db::{BookingRepository, BusinessRepository, DbClient};
use std::sync::Arc;
use tokio::net::TcpListener;

mod service_factory;
use service_factory::SlotifyServiceFactory;

#[cfg(feature = "notify")]
use slotify_notify::routes as notify_routes;

#[tokio::main]
async fn main() {
    let config = Arc::new(load_config().expect("Failed to load config"));
    slotify_common::logging::init();

    // Database and repositories are shared across all routers.
    let db_client = DbClient::new(&config)
        .await
        .expect("Failed to connect to database");
    let bookings = Arc::new(slotify_db::SqlBookingRepository::new(db_client.clone()));
    let businesses = Arc::new(slotify_db::SqlBusinessRepository::new(db_client));
    bookings
        .init_schema()
        .await
        .expect("Failed to initialize booking schema");
    businesses
        .init_schema()
        .await
        .expect("Failed to initialize business schema");

    let service_factory = SlotifyServiceFactory::new(config.clone());

    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to Slotify API!" }))
        .with_state(config.clone());

    #[cfg(feature = "booking")]
    let booking_router = slotify_booking::routes::routes(
        config.clone(),
        bookings.clone(),
        businesses.clone(),
        service_factory.notification_service(),
    );
    #[cfg(feature = "notify")]
    let notify_router = notify_routes::routes(config.clone());
    #[cfg(feature = "payments")]
    let payments_router = slotify_payments::routes::routes(config.clone(), bookings.clone());

    let api_router = Router::new().nest("/api", {
        #[allow(unused_mut)] // for the features it needs to be mutable
        let mut router = api_router;
        #[cfg(feature = "booking")]
        {
            router = router.merge(booking_router);
        }
        #[cfg(feature = "notify")]
        {
            router = router.merge(notify_router);
        }
        #[cfg(feature = "payments")]
        {
            router = router.merge(payments_router);
        }
        router
    });

    #[allow(unused_mut)]
    let mut app = api_router;

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        #[cfg(feature = "booking")]
        use slotify_booking::doc::BookingApiDoc;
        #[cfg(feature = "notify")]
        use slotify_notify::doc::NotifyApiDoc;
        #[cfg(feature = "payments")]
        use slotify_payments::doc::PaymentsApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        // Define the Merged OpenAPI Documentation struct
        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Slotify API",
                version = "0.1.0",
                description = "Slotify Service API Docs",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            components(),
            tags( (name = "Slotify", description = "Core service endpoints")),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        // Create the merged OpenAPI document
        #[allow(unused_mut)] // for the features it needs to be mutable
        let mut openapi_doc = ApiDoc::openapi();
        #[cfg(feature = "booking")]
        openapi_doc.merge(BookingApiDoc::openapi());
        #[cfg(feature = "notify")]
        openapi_doc.merge(NotifyApiDoc::openapi());
        #[cfg(feature = "payments")]
        openapi_doc.merge(PaymentsApiDoc::openapi());
        println!("📖 Adding Swagger UI at /api/docs");

        let swagger_ui =
            SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc.clone());
        app = app.merge(swagger_ui);
    }

    // Bind and serve
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await.unwrap();
    println!("Starting server at http://{}", addr);
    println!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .unwrap();
}
