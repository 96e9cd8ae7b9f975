use super::*;
use image::{ImageFormat, Rgb, RgbImage};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;

// Serves one canned response to the first connection and returns its URL.
async fn serve_image(status: &'static str, body: Vec<u8>) -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let url = format!("http://{}/metroo/a.jpg", listener.local_addr()?);

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await?;
        // GET requests carry no body, the headers fit in one read
        let mut request = [0u8; 4096];
        tokio::io::AsyncReadExt::read(&mut stream, &mut request).await?;

        let head = format!(
            "HTTP/1.1 {}\r\ncontent-type: image/png\r\ncontent-length: {}\r\nconnection: close\r\n\r\n",
            status,
            body.len()
        );
        stream.write_all(head.as_bytes()).await?;
        stream.write_all(&body).await?;
        stream.shutdown().await?;
        Ok::<_, std::io::Error>(())
    });

    Ok(url)
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 0x7f])
    });
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

#[test]
fn test_minify_shrinks_to_max_width() {
    let jpeg = minify_jpeg(&png_bytes(60, 40), 8, 70).unwrap();

    // JPEG SOI marker
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);

    let decoded = image::load_from_memory(&jpeg).unwrap();
    assert_eq!(decoded.width(), 8);
    assert_eq!(decoded.height(), 5);
}

#[test]
fn test_minify_keeps_small_images() {
    let jpeg = minify_jpeg(&png_bytes(4, 3), 8, 70).unwrap();
    let decoded = image::load_from_memory(&jpeg).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (4, 3));
}

#[test]
fn test_minify_is_deterministic() {
    let source = png_bytes(30, 20);
    assert_eq!(
        minify_jpeg(&source, 8, 70).unwrap(),
        minify_jpeg(&source, 8, 70).unwrap()
    );
}

#[test]
fn test_minify_rejects_garbage() {
    assert!(minify_jpeg(b"definitely not an image", 8, 70).is_err());
}

#[test]
fn test_scaled_height_never_zero() {
    assert_eq!(scaled_height(6000, 4000, 8), 5);
    assert_eq!(scaled_height(10_000, 1, 8), 1);
    assert_eq!(scaled_height(0, 10, 8), 80);
}

#[test]
fn test_encode_bytes_as_data_uri() {
    assert_eq!(
        encode_bytes_as_data_uri(b"hello", "text/plain"),
        "data:text/plain;base64,aGVsbG8="
    );
}

#[tokio::test]
async fn test_encode_file_as_data_uri() -> Result<()> {
    let path = std::env::temp_dir()
        .join(format!("image-utils-test-{}.png", std::process::id()));
    tokio::fs::write(&path, png_bytes(2, 2)).await?;

    let uri = encode_file_as_data_uri(path.to_str().unwrap()).await?;
    tokio::fs::remove_file(&path).await?;

    assert!(uri.starts_with("data:image/png;base64,"));
    Ok(())
}

#[tokio::test]
async fn test_encode_missing_file_is_an_error() {
    let result = encode_file_as_data_uri("./does/not/exist.jpg").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_cache_computes_each_key_once() -> Result<()> {
    let cache = DataUriCache::new();
    let calls = AtomicUsize::new(0);

    for _ in 0..3 {
        let value = cache
            .get_or_try_insert_with("metroo/a", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok("data:a".to_string())
            })
            .await?;
        assert_eq!(value, "data:a");
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(cache.cached_count().await, 1);
    Ok(())
}

#[tokio::test]
async fn test_cache_does_not_store_failures() -> Result<()> {
    let cache = DataUriCache::new();

    let first = cache
        .get_or_try_insert_with("metroo/b", || async {
            Err(anyhow!("network down"))
        })
        .await;
    assert!(first.is_err());
    assert_eq!(cache.cached_count().await, 0);

    let second = cache
        .get_or_try_insert_with("metroo/b", || async { Ok("data:b".to_string()) })
        .await?;
    assert_eq!(second, "data:b");
    Ok(())
}

#[tokio::test]
async fn test_download_from_unreachable_host_fails() {
    let client = ReqwestClient::new();
    let result = get_image_bytes(&client, "http://127.0.0.1:9/a.jpg").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_download_error_status_fails() -> Result<()> {
    let url = serve_image("404 Not Found", b"missing".to_vec()).await?;

    let err = get_image_bytes(&ReqwestClient::new(), &url)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("404"));
    Ok(())
}

#[tokio::test]
async fn test_blur_data_uri_from_served_png() -> Result<()> {
    let url = serve_image("200 OK", png_bytes(60, 40)).await?;

    let uri = blur_data_uri(&ReqwestClient::new(), &url, 8, 70).await?;

    let encoded = uri
        .strip_prefix("data:image/jpeg;base64,")
        .expect("jpeg data uri");
    let jpeg = general_purpose::STANDARD.decode(encoded)?;
    let decoded = image::load_from_memory(&jpeg)?;
    assert_eq!((decoded.width(), decoded.height()), (8, 5));
    Ok(())
}
