use image::GenericImageView;
use stylefield_core::{
    FetchError, FetchOptions, Field, FieldError, ImageField, ImageLimits, ImageOrigin, ImageSource,
};
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

fn start_server(runtime: &Runtime) -> MockServer {
    let server = runtime.block_on(MockServer::start());
    let png = common::png_bytes(&common::gradient(120, 90));

    runtime.block_on(async {
        Mock::given(method("GET"))
            .and(path("/logo.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(png))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/moved.png"))
            .respond_with(
                ResponseTemplate::new(302)
                    .insert_header("Location", format!("{}/logo.png", server.uri())),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/missing.png"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/created.png"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/page.html"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;
    });

    server
}

fn source(server: &MockServer, route: &str) -> ImageSource {
    ImageSource::parse(&format!("{}{route}", server.uri())).unwrap()
}

#[test]
fn test_fetches_and_decodes_over_http() {
    let runtime = Runtime::new().unwrap();
    let server = start_server(&runtime);

    let field = ImageField::open(source(&server, "/logo.png"))
        .unwrap()
        .with_limits(ImageLimits::from_sentinels(40, 30).unwrap());

    assert!(matches!(field.raw(), ImageOrigin::Url(_)));
    assert_eq!(field.image().dimensions(), (120, 90));
    assert_eq!(field.adjust().unwrap().dimensions(), (40, 30));
}

#[test]
fn test_follows_redirects() {
    let runtime = Runtime::new().unwrap();
    let server = start_server(&runtime);

    let field = ImageField::from_url(&format!("{}/moved.png", server.uri())).unwrap();
    assert_eq!(field.image().dimensions(), (120, 90));
}

#[test]
fn test_not_found_never_yields_an_image() {
    let runtime = Runtime::new().unwrap();
    let server = start_server(&runtime);

    let result = ImageField::open(source(&server, "/missing.png"));
    assert!(matches!(
        result,
        Err(FieldError::Fetch(FetchError::Status(404)))
    ));
}

#[test]
fn test_only_200_is_success() {
    let runtime = Runtime::new().unwrap();
    let server = start_server(&runtime);

    let result = ImageField::open(source(&server, "/created.png"));
    assert!(matches!(
        result,
        Err(FieldError::Fetch(FetchError::Status(201)))
    ));
}

#[test]
fn test_non_image_body_fails_to_decode() {
    let runtime = Runtime::new().unwrap();
    let server = start_server(&runtime);

    let result = ImageField::open(source(&server, "/page.html"));
    assert!(matches!(result, Err(FieldError::Image(_))));
}

#[test]
fn test_async_constructor_inside_runtime() {
    let runtime = Runtime::new().unwrap();
    let server = start_server(&runtime);
    let options = FetchOptions {
        timeout_secs: Some(5),
        ..FetchOptions::default()
    };

    let field = runtime
        .block_on(ImageField::open_async(source(&server, "/logo.png"), &options))
        .unwrap();
    assert_eq!(field.image().dimensions(), (120, 90));
}

#[test]
fn test_blocking_constructor_refuses_nested_runtime() {
    let runtime = Runtime::new().unwrap();
    let server = start_server(&runtime);

    let result = runtime.block_on(async { ImageField::open(source(&server, "/logo.png")) });
    assert!(matches!(
        result,
        Err(FieldError::Fetch(FetchError::NestedRuntime))
    ));
}
