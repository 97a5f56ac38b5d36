use catalog::configuration::{DatabaseSettings, ImageSettings, Settings};
use catalog::db::MemoryProductStore;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

pub struct TestApp {
    pub address: String,
    pub store: Arc<MemoryProductStore>,
    pub images: TempDir,
    pub client: reqwest::Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub fn image_files(&self) -> Vec<String> {
        files_in(self.images.path())
    }
}

pub fn files_in(dir: &Path) -> Vec<String> {
    let mut files: Vec<String> = std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    files.sort();
    files
}

pub fn test_settings(port: u16, image_dir: &Path) -> Settings {
    Settings {
        database: DatabaseSettings {
            username: "postgres".to_string(),
            password: "postgres".to_string(),
            host: "127.0.0.1".to_string(),
            port: 5432,
            database_name: "catalog_test".to_string(),
            max_connections: 1,
        },
        app_port: port,
        app_host: "127.0.0.1".to_string(),
        images: ImageSettings {
            dir: image_dir.to_string_lossy().into_owned(),
            max_upload_bytes: 1024 * 1024,
        },
    }
}

// the server runs on the test runtime, products live in memory
pub async fn spawn_app() -> TestApp {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let images = tempfile::tempdir().expect("Failed to create image dir");
    let store = Arc::new(MemoryProductStore::new());
    let settings = test_settings(port, images.path());

    let server = catalog::startup::run(listener, store.clone(), settings)
        .await
        .expect("Failed to bind address.");
    let _ = tokio::spawn(server);
    println!("Used Port: {}", port);

    // redirects are asserted on, never followed
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        address,
        store,
        images,
        client,
    }
}

pub fn product_form(name: &str, price: &str) -> reqwest::multipart::Form {
    reqwest::multipart::Form::new()
        .text("name", name.to_string())
        .text("brand", "Acme")
        .text("category", "Tools")
        .text("price", price.to_string())
        .text("description", "A very useful widget")
}

pub fn with_image(form: reqwest::multipart::Form, bytes: &[u8], file_name: &str) -> reqwest::multipart::Form {
    form.part(
        "image_file",
        reqwest::multipart::Part::bytes(bytes.to_vec()).file_name(file_name.to_string()),
    )
}
