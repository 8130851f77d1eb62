use actix_files::{Files, NamedFile};
use actix_web::dev::Server;
use actix_web::{get, middleware, web, App, HttpRequest, HttpResponse, HttpServer};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use url::Url;

use crate::application::SitePagesUseCase;
use crate::domain::error::{AppError, Result};
use crate::domain::page::Page;
use crate::infrastructure::config::SiteConfig;
use crate::infrastructure::storage::join_within;
use crate::infrastructure::templates::{HtmlRenderer, PageRenderer};

/// Route name of the college info page, used to build its absolute URL.
pub const INFO_ROUTE: &str = "college_info";
const INFO_PATH: &str = "college";

pub struct HttpState {
    pub pages: Arc<SitePagesUseCase>,
    pub renderer: Arc<dyn PageRenderer + Send + Sync>,
    pub static_dir: PathBuf,
    pub qr_dir: PathBuf,
    /// Mount point of `qr_dir` below `/static`.
    pub qr_static_dir: String,
    pub public_base_url: Option<Url>,
}

impl HttpState {
    pub fn from_config(config: &SiteConfig) -> Result<Self> {
        let public_base_url = config.public_base_url()?.map(|mut url| {
            // join() treats a base without a trailing slash as a file
            let path = format!("{}/", url.path().trim_end_matches('/'));
            url.set_path(&path);
            url
        });

        let mut renderer = HtmlRenderer::new();
        if let Some(stylesheet) = &config.media.stylesheet {
            renderer = renderer.with_stylesheet(stylesheet.as_str());
        }

        Ok(Self {
            pages: Arc::new(SitePagesUseCase::from_config(config)),
            renderer: Arc::new(renderer),
            static_dir: config.paths.static_dir.clone(),
            qr_dir: config.qr_dir(),
            qr_static_dir: config.qr_static_dir(),
            public_base_url,
        })
    }

    fn qr_route(&self) -> String {
        format!("/static/{}/{{filename:.*}}", self.qr_static_dir)
    }
}

#[get("/")]
async fn index(req: HttpRequest, data: web::Data<HttpState>) -> Result<HttpResponse> {
    let info_url = info_page_url(&req, data.public_base_url.as_ref())?;
    let pages = Arc::clone(&data.pages);
    let page = web::block(move || pages.home(&info_url)).await?;
    render(&data, &page)
}

#[get("/college", name = "college_info")]
async fn college_info(req: HttpRequest, data: web::Data<HttpState>) -> Result<HttpResponse> {
    let info_url = info_page_url(&req, data.public_base_url.as_ref())?;
    let pages = Arc::clone(&data.pages);
    let page = web::block(move || pages.college_info(&info_url)).await??;
    render(&data, &page)
}

#[get("/staff")]
async fn staff_index(data: web::Data<HttpState>) -> Result<HttpResponse> {
    let pages = Arc::clone(&data.pages);
    let page = web::block(move || pages.staff_index()).await??;
    render(&data, &page)
}

#[get("/staff/department/{dept}")]
async fn staff_department(
    data: web::Data<HttpState>,
    dept: web::Path<String>,
) -> Result<HttpResponse> {
    let dept = dept.into_inner();
    let pages = Arc::clone(&data.pages);
    let page = web::block(move || pages.staff_department(&dept)).await??;
    render(&data, &page)
}

#[get("/facilities")]
async fn facilities_page(data: web::Data<HttpState>) -> Result<HttpResponse> {
    let pages = Arc::clone(&data.pages);
    let page = web::block(move || pages.facilities()).await??;
    render(&data, &page)
}

#[get("/companies")]
async fn companies_page(data: web::Data<HttpState>) -> Result<HttpResponse> {
    let pages = Arc::clone(&data.pages);
    let page = web::block(move || pages.companies()).await??;
    render(&data, &page)
}

#[get("/workshops")]
async fn workshops_page(data: web::Data<HttpState>) -> Result<HttpResponse> {
    let pages = Arc::clone(&data.pages);
    let page = web::block(move || pages.workshops()).await??;
    render(&data, &page)
}

#[get("/gallery")]
async fn gallery_page(data: web::Data<HttpState>) -> Result<HttpResponse> {
    render(&data, &data.pages.gallery())
}

/// Serve a file from the QR directory; nothing outside it is ever opened.
async fn qr_image(data: web::Data<HttpState>, filename: web::Path<String>) -> Result<NamedFile> {
    let filename = filename.into_inner();
    let path = join_within(&data.qr_dir, &filename)
        .filter(|path| path.is_file())
        .ok_or_else(|| AppError::NotFound(format!("QR image {}", filename)))?;

    NamedFile::open_async(&path)
        .await
        .map_err(|err| AppError::NotFound(format!("QR image {}: {}", filename, err)))
}

async fn not_found(req: HttpRequest) -> Result<HttpResponse> {
    Err(AppError::NotFound(req.path().to_string()))
}

/// Absolute URL of the college info page, as encoded in the QR image.
pub fn info_page_url(req: &HttpRequest, public_base_url: Option<&Url>) -> Result<String> {
    match public_base_url {
        Some(base) => Ok(base.join(INFO_PATH)?.to_string()),
        None => req
            .url_for_static(INFO_ROUTE)
            .map(|url| url.to_string())
            .map_err(|err| AppError::Internal(format!("Failed to build info page URL: {}", err))),
    }
}

fn render(data: &HttpState, page: &Page) -> Result<HttpResponse> {
    let body = data.renderer.render(page)?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body))
}

/// Register every route. The QR route must precede the generic static files.
pub fn configure(cfg: &mut web::ServiceConfig, state: web::Data<HttpState>) {
    let qr_route = state.qr_route();
    let static_dir = state.static_dir.clone();

    cfg.app_data(state)
        .service(index)
        .service(college_info)
        .service(staff_index)
        .service(staff_department)
        .service(facilities_page)
        .service(companies_page)
        .service(workshops_page)
        .service(gallery_page)
        .service(web::resource(qr_route).route(web::get().to(qr_image)))
        .service(Files::new("/static", static_dir));
}

pub fn start_server(config: &SiteConfig) -> Result<Server> {
    let state = web::Data::new(HttpState::from_config(config)?);
    let (host, port) = config.bind_addr();

    info!(
        host = %host,
        port,
        data_dir = %config.paths.data_dir.display(),
        static_dir = %config.paths.static_dir.display(),
        "Starting college site"
    );

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .configure(|cfg| configure(cfg, state.clone()))
            .default_service(web::route().to(not_found))
    });
    if let Some(workers) = config.server.workers {
        server = server.workers(workers);
    }

    let server = server.bind((host.as_str(), port))?.run();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::{header, StatusCode};
    use actix_web::test;
    use std::fs;
    use tempfile::TempDir;

    fn site(staff_csv: Option<&str>) -> (TempDir, SiteConfig) {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SiteConfig::default();
        config.paths.data_dir = dir.path().join("data");
        config.paths.static_dir = dir.path().join("static");
        fs::create_dir_all(&config.paths.data_dir).unwrap();
        if let Some(csv) = staff_csv {
            fs::write(config.paths.data_dir.join("staff.csv"), csv).unwrap();
        }
        (dir, config)
    }

    fn state(config: &SiteConfig) -> web::Data<HttpState> {
        web::Data::new(HttpState::from_config(config).unwrap())
    }

    const STAFF_CSV: &str = "name,department\nA,CSE\nB, cse \nC,\n";

    #[actix_web::test]
    async fn test_home_renders_and_writes_qr() {
        let (_dir, config) = site(None);
        let data = state(&config);
        let app = test::init_service(App::new().configure(|cfg| configure(cfg, data.clone()))).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("/static/images/qr/college_qr.png"));
        assert!(config.qr_path().is_file());

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/static/images/qr/college_qr.png")
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "image/png"
        );
    }

    #[actix_web::test]
    async fn test_staff_department_any_case() {
        let (_dir, config) = site(Some(STAFF_CSV));
        let data = state(&config);
        let app = test::init_service(App::new().configure(|cfg| configure(cfg, data.clone()))).await;

        for uri in ["/staff/department/CSE", "/staff/department/cse"] {
            let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(resp.status(), StatusCode::OK, "{}", uri);
            let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
            assert!(html.contains("<strong>A</strong>"));
            assert!(html.contains("<strong>B</strong>"));
            assert!(!html.contains("<strong>C</strong>"));
        }

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/staff/department/ECE")
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/staff/department/%20cse%20")
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_staff_index_groups_departments() {
        let (_dir, config) = site(Some(STAFF_CSV));
        let data = state(&config);
        let app = test::init_service(App::new().configure(|cfg| configure(cfg, data.clone()))).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/staff").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(html.contains(r#"href="/staff/department/CSE">CSE</a> <small>(2)</small>"#));
        assert!(html.contains(r#"href="/staff/department/Others">Others</a> <small>(1)</small>"#));
    }

    #[actix_web::test]
    async fn test_list_pages_with_missing_data() {
        let (_dir, config) = site(None);
        let data = state(&config);
        let app = test::init_service(App::new().configure(|cfg| configure(cfg, data.clone()))).await;

        for uri in ["/college", "/staff", "/facilities", "/companies", "/workshops", "/gallery"] {
            let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(resp.status(), StatusCode::OK, "{}", uri);
            assert_eq!(
                resp.headers().get(header::CONTENT_TYPE).unwrap(),
                "text/html; charset=utf-8"
            );
        }
    }

    #[actix_web::test]
    async fn test_qr_route_rejects_traversal() {
        let (_dir, config) = site(Some(STAFF_CSV));
        fs::create_dir_all(config.qr_dir()).unwrap();
        let data = state(&config);
        let app = test::init_service(App::new().configure(|cfg| configure(cfg, data.clone()))).await;

        for uri in [
            "/static/images/qr/..%2F..%2F..%2Fdata%2Fstaff.csv",
            "/static/images/qr/missing.png",
            "/static/images/qr/",
        ] {
            let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", uri);
        }
    }

    #[actix_web::test]
    async fn test_other_static_files_are_served() {
        let (_dir, config) = site(None);
        let css_dir = config.paths.static_dir.join("css");
        fs::create_dir_all(&css_dir).unwrap();
        fs::write(css_dir.join("site.css"), "body { margin: 0 }").unwrap();
        let data = state(&config);
        let app = test::init_service(App::new().configure(|cfg| configure(cfg, data.clone()))).await;

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/static/css/site.css").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            test::read_body(resp).await,
            web::Bytes::from_static(b"body { margin: 0 }")
        );
    }

    #[actix_web::test]
    async fn test_configured_stylesheet_is_linked() {
        let (_dir, mut config) = site(None);
        config.media.stylesheet = Some("css/site.css".to_string());
        let data = state(&config);
        let app = test::init_service(App::new().configure(|cfg| configure(cfg, data.clone()))).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/gallery").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(html.contains(r#"<link rel="stylesheet" href="/static/css/site.css">"#));
    }

    #[actix_web::test]
    async fn test_info_page_url_uses_public_base() {
        let req = test::TestRequest::default().to_http_request();

        let mut config = SiteConfig::default();
        config.server.public_base_url = Some("https://cit.example.edu/site".to_string());
        let state = HttpState::from_config(&config).unwrap();

        assert_eq!(
            info_page_url(&req, state.public_base_url.as_ref()).unwrap(),
            "https://cit.example.edu/site/college"
        );
    }
}
