//! Image Upload Handler
//!
//! Handles product-image uploads from authenticated users.
//! Supports multiple image formats (PNG, JPEG, WebP) and converts to JPG.

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Cursor;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// Maximum file size (5MB)
const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Supported image formats
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// JPEG quality for product images (keeps produce photos appealing while
/// controlling file size)
const JPEG_QUALITY: u8 = 85;

/// Upload response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
    pub filename: String,
    pub size: usize,
}

/// Calculate SHA256 hash of data
fn calculate_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Content-addressed filename: the same image uploaded twice maps to the
/// same file and URL
pub(crate) fn hashed_filename(data: &[u8]) -> String {
    let hash = calculate_hash(data);
    format!("{}.jpg", &hash[..16])
}

/// Validate image file
fn validate_image(data: &[u8], ext: &str) -> Result<(), AppError> {
    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::validation(format!(
            "File too large. Maximum size is {}MB",
            MAX_FILE_SIZE / 1024 / 1024
        )));
    }

    if !SUPPORTED_FORMATS.contains(&ext) {
        return Err(AppError::validation(format!(
            "Unsupported format '{}'. Supported: {}",
            ext,
            SUPPORTED_FORMATS.join(", ")
        )));
    }

    Ok(())
}

/// Decode and re-encode the image as JPEG
fn process_and_compress_image(data: &[u8]) -> Result<Vec<u8>, AppError> {
    let img = image::load_from_memory(data)
        .map_err(|e| AppError::validation(format!("Invalid image: {}", e)))?;

    let mut buffer = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buffer);
        let rgb_img = img.to_rgb8();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
        rgb_img
            .write_with_encoder(encoder)
            .map_err(|e| AppError::internal(format!("Failed to compress image: {}", e)))?;
    }

    Ok(buffer)
}

/// POST /api/upload/image - 上传商品图片
///
/// multipart 字段名为 `image`；返回 201 {url, filename, size}。
pub async fn upload(
    State(state): State<ServerState>,
    user: CurrentUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<UploadResponse>)> {
    let mut image_data: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("image") {
            continue;
        }

        let original_name = field.file_name().unwrap_or("upload.png").to_string();
        let ext = original_name
            .rsplit('.')
            .next()
            .unwrap_or("png")
            .to_ascii_lowercase();
        let data = field.bytes().await?.to_vec();
        image_data = Some((ext, data));
        break;
    }

    let Some((ext, data)) = image_data else {
        return Err(AppError::validation("No image file provided"));
    };

    validate_image(&data, &ext)?;

    let jpeg = process_and_compress_image(&data)?;
    let filename = hashed_filename(&jpeg);

    let uploads_dir = state.uploads_dir();
    let file_path = uploads_dir.join(&filename);

    // Same content hash means the file is already on disk
    if !file_path.exists() {
        fs::write(&file_path, &jpeg)
            .map_err(|e| AppError::internal(format!("Failed to store image: {}", e)))?;
    }

    let size = jpeg.len();
    tracing::info!(user_id = %user.id, filename = %filename, size, "Image uploaded");

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            url: format!("/api/uploads/{}", filename),
            filename,
            size,
        }),
    ))
}
