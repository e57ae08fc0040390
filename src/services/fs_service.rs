use crate::error::{AppError, ClassifyError};
use crate::models::wardrobe_types::ImageRef;
use base64::Engine;
use image::ImageFormat;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "webp", "tiff", "tif", "heic", "heif",
];

pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.'))
        .unwrap_or(false)
}

/// List image files in a folder, sorted case-insensitively by path.
/// Hidden files and folders are skipped.
pub fn list_image_files(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>, AppError> {
    if !dir.is_dir() {
        return Err(format!("Not a directory: {}", dir.display()).into());
    }

    let walker = WalkDir::new(dir).max_depth(if recursive { usize::MAX } else { 1 });

    let mut images: Vec<PathBuf> = walker
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && is_image_file(entry.path()))
        .map(|entry| entry.into_path())
        .collect();

    images.sort_by_key(|p| p.to_string_lossy().to_lowercase());

    Ok(images)
}

/// Expand CLI inputs into image references.
///
/// URIs (`data:`, `http(s)://`) are kept as-is, folders are listed, files must
/// look like images. Duplicates are dropped, first occurrence wins.
pub fn collect_image_refs(inputs: &[String], recursive: bool) -> Result<Vec<ImageRef>, AppError> {
    let mut seen = HashSet::new();
    let mut refs = Vec::new();

    for input in inputs {
        let candidate = ImageRef::new(input.as_str());
        if candidate.is_data_uri() || candidate.is_remote() {
            if seen.insert(candidate.clone()) {
                refs.push(candidate);
            }
            continue;
        }

        let path = Path::new(input);
        if path.is_dir() {
            for file in list_image_files(path, recursive)? {
                let image = ImageRef::new(file.to_string_lossy());
                if seen.insert(image.clone()) {
                    refs.push(image);
                }
            }
        } else if path.is_file() {
            if !is_image_file(path) {
                return Err(format!("Not an image file: {}", input).into());
            }
            if seen.insert(candidate.clone()) {
                refs.push(candidate);
            }
        } else {
            return Err(format!("Path does not exist: {}", input).into());
        }
    }

    Ok(refs)
}

/// MIME type for an image path. Unknown extensions are sent as JPEG.
pub fn mime_type_for(path: &str) -> &'static str {
    ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or("image/jpeg")
}

fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    let b64 = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{};base64,{}", mime, b64)
}

/// Load an image into a base64 `data:` URI suitable for the vision model.
pub async fn to_data_uri(client: &reqwest::Client, image: &ImageRef) -> Result<String, ClassifyError> {
    if image.is_data_uri() {
        return Ok(image.as_str().to_string());
    }

    if image.is_remote() {
        let response = client.get(image.as_str()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClassifyError::Status {
                status: status.as_u16(),
                body: format!("failed to fetch {}", image.short()),
            });
        }
        let mime = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|v| v.starts_with("image/"))
            .map(str::to_string)
            .unwrap_or_else(|| {
                let path = image.as_str().split(['?', '#']).next().unwrap_or_default();
                mime_type_for(path).to_string()
            });
        let bytes = response.bytes().await?;
        return Ok(encode_data_uri(&mime, &bytes));
    }

    let bytes = tokio::fs::read(image.as_str())
        .await
        .map_err(|source| ClassifyError::ImageRead {
            path: image.as_str().to_string(),
            source,
        })?;
    Ok(encode_data_uri(mime_type_for(image.as_str()), &bytes))
}
