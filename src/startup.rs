use crate::configuration::Settings;
use crate::db::ProductStore;
use crate::helpers::ImageStore;
use crate::routes;
use crate::services::ProductController;
use crate::views::Views;
use actix_files::Files;
use actix_multipart::form::MultipartFormConfig;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

pub async fn run(
    listener: TcpListener,
    store: Arc<dyn ProductStore>,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    let images = ImageStore::new(&settings.images.dir);
    // actix-files needs the directory to exist before the first upload
    tokio::fs::create_dir_all(images.dir()).await?;
    let image_dir = images.dir().to_path_buf();

    let controller = web::Data::new(ProductController::new(store, images));

    let views = Views::new().map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;
    let views = web::Data::new(views);

    let multipart_config = MultipartFormConfig::default()
        .total_limit(settings.images.max_upload_bytes + 64 * 1024)
        .memory_limit(settings.images.max_upload_bytes);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(middleware::NormalizePath::trim())
            .service(web::scope("/health_check").service(routes::health_check))
            .service(routes::index)
            .service(
                web::scope("/products")
                    .service(routes::product::list_handler)
                    .service(routes::product::create_page_handler)
                    .service(routes::product::create_handler)
                    .service(routes::product::edit_page_handler)
                    .service(routes::product::edit_handler)
                    .service(routes::product::delete_handler),
            )
            .service(Files::new("/images", &image_dir))
            .app_data(multipart_config.clone())
            .app_data(controller.clone())
            .app_data(views.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
